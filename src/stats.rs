// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus-wide numbers BM25 normalizes against.

use serde::Serialize;

use crate::error::BuildError;
use crate::types::DocId;

/// Document lengths and their mean.
///
/// Lengths count occurrences, title included, regardless of weighting mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    doc_lengths: Vec<usize>,
    avg_doc_len: f64,
}

impl CorpusStats {
    /// `lengths[d]` is the length of document `d`.
    ///
    /// Fails with [`BuildError::EmptyCorpus`] when there are no documents or
    /// every document is empty: the mean would be undefined or zero, and every
    /// later `dl / avgdl` would divide by it.
    pub fn from_lengths(lengths: Vec<usize>) -> Result<Self, BuildError> {
        let total: usize = lengths.iter().sum();
        if lengths.is_empty() || total == 0 {
            return Err(BuildError::EmptyCorpus);
        }
        let avg_doc_len = total as f64 / lengths.len() as f64;
        Ok(CorpusStats {
            doc_lengths: lengths,
            avg_doc_len,
        })
    }

    pub fn document_length(&self, doc: DocId) -> usize {
        self.doc_lengths.get(doc.index()).copied().unwrap_or(0)
    }

    pub fn average_document_length(&self) -> f64 {
        self.avg_doc_len
    }

    pub fn document_count(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn lengths(&self) -> &[usize] {
        &self.doc_lengths
    }
}
