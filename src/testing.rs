// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical page fixtures so tests don't hand-roll block trees.

#![doc(hidden)]

use crate::source::MemorySource;
use crate::types::{Annotation, Block, PageMeta, TextRun};

/// A paragraph block with one plain run.
pub fn paragraph(id: &str, text: &str) -> Block {
    Block::new(id, "paragraph", vec![TextRun::plain(text)])
}

/// A `heading_{level}` block with one plain run.
pub fn heading(id: &str, level: u8, text: &str) -> Block {
    Block::new(id, &format!("heading_{}", level), vec![TextRun::plain(text)])
}

/// A block of any type with a single annotated run.
pub fn annotated(id: &str, kind: &str, text: &str, annotations: &[Annotation]) -> Block {
    Block::new(id, kind, vec![TextRun::annotated(text, annotations)])
}

/// Page metadata with a URL derived from the key.
pub fn page_meta(key: &str, title: &str) -> PageMeta {
    PageMeta {
        url: format!("https://www.notion.so/{}", key),
        title: title.to_string(),
    }
}

/// A source where page `key_i` holds a single paragraph with `text_i`, no title.
pub fn text_corpus(pages: &[(&str, &str)]) -> MemorySource {
    let mut source = MemorySource::new();
    for (key, text) in pages {
        source.insert_page(
            key,
            page_meta(key, ""),
            vec![paragraph(&format!("{}-p", key), text)],
        );
    }
    source
}

/// Page keys of a fixture, in order.
pub fn keys<'a>(pages: &[(&'a str, &str)]) -> Vec<&'a str> {
    pages.iter().map(|(key, _)| *key).collect()
}
