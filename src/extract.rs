// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Walking a page's block tree into a term stream.
//!
//! Depth-first, parent before children, runs in block order: reading order.
//! The order doesn't affect scores but it fixes term-id assignment, so it has to
//! be reproducible.
//!
//! Whether terms carry formatting context is decided once per build by
//! [`WeightingMode`], and the answer is baked into the [`Term`] variant. Nothing
//! downstream re-checks the mode.
//!
//! A failed fetch of a child collection costs only that subtree: the failure is
//! logged, recorded, and the walk continues with the next sibling.
//!
//! A block listed among its own descendants has its text indexed but its
//! children are not fetched again, and nesting stops at [`MAX_BLOCK_DEPTH`].
//! Both cut a subtree, so both are recorded as failures.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::source::DocumentSource;
use crate::tokenize::tokenize;
use crate::types::{Annotations, Block, PageMeta, TextRun};

/// Synthetic tag attached to title terms in rich mode.
pub const TITLE_TAG: &str = "title";

/// Child collections nested deeper than this are not fetched.
pub const MAX_BLOCK_DEPTH: usize = 64;

/// Whether occurrences are weighted by their formatting context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingMode {
    /// Every occurrence weighs 1: index weights are raw term frequencies.
    #[default]
    Plain,
    /// Occurrences are weighted by block type and annotations.
    Rich,
}

/// Set of tag names (block type + active annotations) of one occurrence.
///
/// A set, so a tag never applies twice to the same occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermContext(BTreeSet<String>);

impl TermContext {
    /// Context of a text run inside a block of type `block_kind`.
    ///
    /// Falls back to the run's own type tag when the block has none.
    pub fn for_run(block_kind: &str, annotations: &Annotations) -> Self {
        let mut tags: BTreeSet<String> =
            annotations.active().map(|a| a.name().to_string()).collect();
        tags.insert(block_kind.to_string());
        TermContext(tags)
    }

    fn for_text_run(block_kind: &str, run: &TextRun) -> Self {
        let kind = if block_kind.is_empty() {
            run.kind.as_str()
        } else {
            block_kind
        };
        Self::for_run(kind, &run.annotations)
    }

    pub fn title() -> Self {
        TermContext(BTreeSet::from([TITLE_TAG.to_string()]))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// One extracted occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Plain(String),
    Rich { text: String, context: TermContext },
}

impl Term {
    pub fn text(&self) -> &str {
        match self {
            Term::Plain(text) => text,
            Term::Rich { text, .. } => text,
        }
    }
}

/// A fetch that failed while walking a page.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalFailure {
    /// Page key or block id that couldn't be fetched.
    pub id: String,
    pub error: SourceError,
}

/// Terms of one page, with whatever went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDocument {
    pub key: String,
    pub meta: PageMeta,
    pub terms: Vec<Term>,
    pub failures: Vec<RetrievalFailure>,
}

impl ExtractedDocument {
    /// Document length: number of occurrences, independent of weighting.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Default)]
struct Walk {
    terms: Vec<Term>,
    failures: Vec<RetrievalFailure>,
}

impl Walk {
    fn append(&mut self, mut other: Walk) {
        self.terms.append(&mut other.terms);
        self.failures.append(&mut other.failures);
    }
}

/// The chain of blocks whose children are being walked, innermost first.
struct Ancestors<'p> {
    id: &'p str,
    parent: Option<&'p Ancestors<'p>>,
}

fn on_path(ancestors: Option<&Ancestors<'_>>, id: &str) -> bool {
    let mut current = ancestors;
    while let Some(node) = current {
        if node.id == id {
            return true;
        }
        current = node.parent;
    }
    false
}

/// Turns pages from a [`DocumentSource`] into term streams.
pub struct TermExtractor<'a, S: ?Sized> {
    source: &'a S,
    mode: WeightingMode,
}

impl<'a, S: DocumentSource + ?Sized> TermExtractor<'a, S> {
    pub fn new(source: &'a S, mode: WeightingMode) -> Self {
        TermExtractor { source, mode }
    }

    pub fn mode(&self) -> WeightingMode {
        self.mode
    }

    /// Extract every term of page `key`: block text first, then the title.
    ///
    /// Never fails. A page whose blocks can't be fetched yields no block terms;
    /// a page whose metadata can't be fetched is indexed without a title.
    pub fn extract(&self, key: &str) -> ExtractedDocument {
        let mut walk = match self.source.fetch_blocks(key) {
            Ok(blocks) => self.walk(&blocks, 0, None),
            Err(error) => {
                tracing::warn!(page = key, %error, "failed to fetch page blocks");
                Walk {
                    terms: Vec::new(),
                    failures: vec![RetrievalFailure {
                        id: key.to_string(),
                        error,
                    }],
                }
            }
        };

        let meta = match self.source.fetch_metadata(key) {
            Ok(meta) => meta,
            Err(error) => {
                tracing::warn!(page = key, %error, "failed to fetch page metadata; title left empty");
                walk.failures.push(RetrievalFailure {
                    id: key.to_string(),
                    error,
                });
                PageMeta::default()
            }
        };

        walk.terms.extend(self.title_terms(&meta.title));

        ExtractedDocument {
            key: key.to_string(),
            meta,
            terms: walk.terms,
            failures: walk.failures,
        }
    }

    fn title_terms(&self, title: &str) -> Vec<Term> {
        tokenize(title)
            .into_iter()
            .map(|text| match self.mode {
                WeightingMode::Plain => Term::Plain(text),
                WeightingMode::Rich => Term::Rich {
                    text,
                    context: TermContext::title(),
                },
            })
            .collect()
    }

    fn run_terms(&self, block_kind: &str, run: &TextRun) -> Vec<Term> {
        let words = tokenize(&run.plain_text);
        match self.mode {
            WeightingMode::Plain => words.into_iter().map(Term::Plain).collect(),
            WeightingMode::Rich => {
                let context = TermContext::for_text_run(block_kind, run);
                words
                    .into_iter()
                    .map(|text| Term::Rich {
                        text,
                        context: context.clone(),
                    })
                    .collect()
            }
        }
    }

    /// Terms of `blocks` and their descendants. Each call returns its own
    /// [`Walk`]; callers concatenate.
    fn walk(&self, blocks: &[Block], depth: usize, ancestors: Option<&Ancestors<'_>>) -> Walk {
        let mut walk = Walk::default();

        for block in blocks {
            for run in &block.rich_text {
                walk.terms.extend(self.run_terms(&block.kind, run));
            }

            if !block.has_children {
                continue;
            }
            if depth >= MAX_BLOCK_DEPTH {
                tracing::warn!(block = %block.id, depth, "block nesting too deep; children skipped");
                walk.failures.push(RetrievalFailure {
                    id: block.id.clone(),
                    error: SourceError::TooDeep {
                        limit: MAX_BLOCK_DEPTH,
                    },
                });
                continue;
            }
            if on_path(ancestors, &block.id) {
                tracing::warn!(block = %block.id, "block is its own ancestor; children skipped");
                walk.failures.push(RetrievalFailure {
                    id: block.id.clone(),
                    error: SourceError::Cycle,
                });
                continue;
            }
            let path = Ancestors {
                id: &block.id,
                parent: ancestors,
            };
            match self.source.fetch_blocks(&block.id) {
                Ok(children) => walk.append(self.walk(&children, depth + 1, Some(&path))),
                Err(error) => {
                    tracing::warn!(block = %block.id, %error, "failed to fetch child blocks");
                    walk.failures.push(RetrievalFailure {
                        id: block.id.clone(),
                        error,
                    });
                }
            }
        }

        walk
    }
}
