// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a page corpus.
//!
//! Pages arrive as trees of blocks in the Notion block JSON shape:
//!
//! ```text
//! { "id": "…", "type": "heading_1", "has_children": false,
//!   "heading_1": { "rich_text": [ { "type": "text", "plain_text": "…",
//!                                   "annotations": { "bold": true, …, "color": "default" } } ] } }
//! ```
//!
//! The payload of a block lives under a key named after its type, which serde
//! can't express directly. [`Block`] is therefore deserialized through a raw
//! intermediate that keeps the remaining keys and pulls `rich_text` out of the
//! one matching `type`.
//!
//! Dense integer ids ([`DocId`], [`TermId`]) are the only identifiers used inside
//! the index. Document keys and term strings live in the lexicons.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

// =============================================================================
// NEWTYPES: Type-safe dense ids
// =============================================================================

/// Dense document identifier in `[0, D)`.
///
/// Assigned in first-seen order over the input document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

/// Dense term identifier in `[0, T)`.
///
/// Assigned in first-seen order across the term stream of the whole corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl DocId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TermId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<u32> for TermId {
    fn from(id: u32) -> Self {
        TermId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

// =============================================================================
// TEXT RUNS
// =============================================================================

/// Formatting attribute applied to a run of text.
///
/// Color is deliberately absent: it never affects term weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Annotation {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
}

impl Annotation {
    pub const ALL: [Annotation; 5] = [
        Annotation::Bold,
        Annotation::Italic,
        Annotation::Strikethrough,
        Annotation::Underline,
        Annotation::Code,
    ];

    /// Tag name as it appears in the API and in the weight table.
    pub fn name(self) -> &'static str {
        match self {
            Annotation::Bold => "bold",
            Annotation::Italic => "italic",
            Annotation::Strikethrough => "strikethrough",
            Annotation::Underline => "underline",
            Annotation::Code => "code",
        }
    }
}

/// Annotation flags of a text run. The API's `color` key is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl Annotations {
    pub fn is_set(&self, annotation: Annotation) -> bool {
        match annotation {
            Annotation::Bold => self.bold,
            Annotation::Italic => self.italic,
            Annotation::Strikethrough => self.strikethrough,
            Annotation::Underline => self.underline,
            Annotation::Code => self.code,
        }
    }

    pub fn set(&mut self, annotation: Annotation) {
        match annotation {
            Annotation::Bold => self.bold = true,
            Annotation::Italic => self.italic = true,
            Annotation::Strikethrough => self.strikethrough = true,
            Annotation::Underline => self.underline = true,
            Annotation::Code => self.code = true,
        }
    }

    /// Active annotations, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = Annotation> + '_ {
        Annotation::ALL.into_iter().filter(|a| self.is_set(*a))
    }
}

/// A string of plain text with its active annotations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextRun {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    /// Run-level type tag (`text`, `mention`, `equation`).
    #[serde(rename = "type", default = "default_run_kind")]
    pub kind: String,
}

fn default_run_kind() -> String {
    "text".to_string()
}

impl TextRun {
    pub fn plain(text: &str) -> Self {
        TextRun {
            plain_text: text.to_string(),
            annotations: Annotations::default(),
            kind: default_run_kind(),
        }
    }

    pub fn annotated(text: &str, annotations: &[Annotation]) -> Self {
        let mut flags = Annotations::default();
        for annotation in annotations {
            flags.set(*annotation);
        }
        TextRun {
            plain_text: text.to_string(),
            annotations: flags,
            kind: default_run_kind(),
        }
    }
}

// =============================================================================
// BLOCKS
// =============================================================================

/// A structural content node: paragraph, heading, callout, list item, ...
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    /// Block id, used to fetch children.
    pub id: String,
    /// Type tag (`paragraph`, `heading_1`, `callout`, ...).
    pub kind: String,
    pub has_children: bool,
    /// Empty for blocks without a `rich_text` payload (dividers, images, ...).
    pub rich_text: Vec<TextRun>,
}

impl Block {
    pub fn new(id: &str, kind: &str, rich_text: Vec<TextRun>) -> Self {
        Block {
            id: id.to_string(),
            kind: kind.to_string(),
            has_children: false,
            rich_text,
        }
    }

    /// Mark this block as having children stored under its id.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    payloads: HashMap<String, serde_json::Value>,
}

impl TryFrom<RawBlock> for Block {
    type Error = SourceError;

    fn try_from(mut raw: RawBlock) -> Result<Self, Self::Error> {
        let rich_text = match raw
            .payloads
            .remove(&raw.kind)
            .and_then(|mut payload| payload.get_mut("rich_text").map(serde_json::Value::take))
        {
            Some(runs) => serde_json::from_value(runs).map_err(|e| {
                SourceError::Decode(format!("rich_text of block {}: {}", raw.id, e))
            })?,
            None => Vec::new(),
        };

        Ok(Block {
            id: raw.id,
            kind: raw.kind,
            has_children: raw.has_children,
            rich_text,
        })
    }
}

// =============================================================================
// PAGE METADATA
// =============================================================================

/// Display metadata of a page. `title` is empty when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageMeta {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}
