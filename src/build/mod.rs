// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: pages in, [`Corpus`] out.
//!
//! ```text
//! keys ──▶ document lexicon ──▶ fetch + extract (parallel) ──▶ serial fold ──▶ Corpus
//!                                                               │
//!                                    term lexicon, inverted index, lengths
//! ```
//!
//! Only the fetch stage may run in parallel. Term ids depend on the order terms
//! are first seen, so the fold runs over documents in document-lexicon order.
//! Same corpus, same key order, same ids.

pub mod parallel;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::BuildError;
use crate::extract::{ExtractedDocument, RetrievalFailure, WeightingMode};
use crate::index::{term_weights, InvertedIndexBuilder};
use crate::lexicon::{DocLexicon, Lexicon, LexiconBuilder};
use crate::source::DocumentSource;
use crate::stats::CorpusStats;
use crate::types::TermId;
use crate::weights::WeightTable;

pub use parallel::*;

/// How to build: weighting mode and the factors rich mode uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    pub mode: WeightingMode,
    pub weights: WeightTable,
}

impl BuildOptions {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn rich() -> Self {
        BuildOptions {
            mode: WeightingMode::Rich,
            weights: WeightTable::default(),
        }
    }
}

/// A retrieval failure, attributed to the page being indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFailure {
    pub page: String,
    pub failure: RetrievalFailure,
}

/// What a build did, including everything that failed without aborting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn serialize_failures<S: serde::Serializer>(
    failures: &[PageFailure],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(failures.len()))?;
    for f in failures {
        seq.serialize_element(&(&f.page, &f.failure.id, f.failure.error.to_string()))?;
    }
    seq.end()
}

/// Build a corpus from the pages in `keys`.
///
/// Duplicate keys collapse to their first occurrence. Retrieval failures are
/// logged and reported in [`Corpus::report`]; only integrity failures and an
/// empty corpus abort the build.
pub fn build_corpus<S, K>(source: &S, keys: &[K], options: &BuildOptions) -> Result<Corpus, BuildError>
where
    S: DocumentSource + ?Sized,
    K: AsRef<str>,
{
    let docs: DocLexicon = Lexicon::from_keys(keys.iter().map(AsRef::as_ref));
    let ordered: Vec<&str> = docs.iter().map(|(_, key)| key).collect();
    tracing::info!(documents = ordered.len(), mode = ?options.mode, "fetching pages");

    let extracted = extract_documents(source, &ordered, options.mode);
    assemble(docs, extracted, options)
}

/// [`build_corpus`] with a progress bar ticking once per fetched page.
#[cfg(feature = "parallel")]
pub fn build_corpus_with_progress<S, K>(
    source: &S,
    keys: &[K],
    options: &BuildOptions,
    progress: &ProgressBar,
) -> Result<Corpus, BuildError>
where
    S: DocumentSource + ?Sized,
    K: AsRef<str>,
{
    let docs: DocLexicon = Lexicon::from_keys(keys.iter().map(AsRef::as_ref));
    let ordered: Vec<&str> = docs.iter().map(|(_, key)| key).collect();
    progress.set_length(ordered.len() as u64);

    let extracted = extract_documents_with_progress(source, &ordered, options.mode, progress);
    assemble(docs, extracted, options)
}

/// The serial fold: term ids, postings, lengths. `extracted[i]` belongs to document `i`.
fn assemble(
    docs: DocLexicon,
    extracted: Vec<ExtractedDocument>,
    options: &BuildOptions,
) -> Result<Corpus, BuildError> {
    let mut terms: LexiconBuilder<TermId> = LexiconBuilder::new();
    let mut index = InvertedIndexBuilder::new();
    let mut lengths = Vec::with_capacity(extracted.len());
    let mut pages = Vec::with_capacity(extracted.len());
    let mut doc_terms = Vec::with_capacity(extracted.len());
    let mut failures = Vec::new();

    for ((doc_id, key), doc) in docs.iter().zip(extracted) {
        debug_assert_eq!(key, doc.key);

        let ids: Vec<TermId> = doc.terms.iter().map(|t| terms.intern(t.text())).collect();
        for (text, weight) in term_weights(&doc.terms, &options.weights) {
            index.record(terms.intern(text), doc_id, weight)?;
        }

        tracing::debug!(page = key, length = ids.len(), "indexed page");
        lengths.push(ids.len());
        doc_terms.push(ids);
        failures.extend(doc.failures.into_iter().map(|failure| PageFailure {
            page: doc.key.clone(),
            failure,
        }));
        pages.push(doc.meta);
    }

    let stats = CorpusStats::from_lengths(lengths)?;
    let terms = terms.freeze();
    let index = index.finish();

    let report = BuildReport {
        documents: docs.len(),
        terms: terms.len(),
        postings: index.pair_count(),
        failures,
    };
    tracing::info!(
        documents = report.documents,
        terms = report.terms,
        failures = report.failures.len(),
        avg_doc_len = stats.average_document_length(),
        "index built"
    );

    Ok(Corpus::from_parts(
        docs,
        terms,
        index,
        stats,
        pages,
        doc_terms,
        options.mode,
        report,
    ))
}
