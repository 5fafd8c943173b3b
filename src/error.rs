// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for folio.
//!
//! Retrieval errors are recoverable: the build logs them, records them in the
//! [`BuildReport`](crate::BuildReport) and keeps going. Build errors are not.

use thiserror::Error;

use crate::types::{DocId, TermId};

/// Errors raised by a [`DocumentSource`](crate::DocumentSource).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Remote API answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),
    /// Response or snapshot could not be decoded
    #[error("Failed to decode: {0}")]
    Decode(String),
    /// Unknown page or block id
    #[error("Not found: {0}")]
    NotFound(String),
    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(String),
    /// Children not fetched: nesting exceeded the walk's depth limit
    #[error("Nesting deeper than {limit} levels; children skipped")]
    TooDeep { limit: usize },
    /// Children not fetched: the block already encloses itself
    #[error("Block is its own ancestor; children skipped")]
    Cycle,
}

/// Fatal errors during index construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The same (term, document) pair was recorded with two different weights.
    #[error(
        "Integrity violation: term {term} in document {doc} recorded as {stored}, recomputed as {recomputed}"
    )]
    Integrity {
        term: TermId,
        doc: DocId,
        stored: f64,
        recomputed: f64,
    },
    /// A weight overflowed to infinity or became NaN.
    #[error("Non-finite weight {weight} for term {term} in document {doc}")]
    NonFiniteWeight { term: TermId, doc: DocId, weight: f64 },
    /// No documents, or no document produced a single term.
    #[error("Empty corpus: average document length is undefined")]
    EmptyCorpus,
    /// The corpus snapshot itself could not be opened.
    #[error("Failed to load snapshot: {0}")]
    Snapshot(#[from] SourceError),
}

/// Errors while loading or validating a [`SearchConfig`](crate::SearchConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),
    #[error("Invalid config JSON: {0}")]
    Parse(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
