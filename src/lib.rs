// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 search over block-structured pages.
//!
//! Pages (Notion-style block trees) are walked into term streams, assigned dense
//! ids, folded into an inverted index and ranked with Okapi BM25. Optionally,
//! occurrences are weighted by where they sit: a word in a `heading_1` counts
//! three times a word in a paragraph.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌─────────────┐   ┌────────────┐   ┌────────────┐   ┌───────────┐
//! │ source.rs  │──▶│ extract.rs  │──▶│ lexicon.rs │──▶│  index.rs  │──▶│ search/   │
//! │ (blocks,   │   │ (block tree │   │ (doc/term  │   │ (postings, │   │ (BM25     │
//! │  metadata) │   │  → terms)   │   │  ids)      │   │  stats)    │   │  ranking) │
//! └────────────┘   └─────────────┘   └────────────┘   └────────────┘   └───────────┘
//!                        │                                  ▲
//!                        └── tokenize.rs, weights.rs ───────┘
//! ```
//!
//! Everything left of `search/` runs once per build. A built [`Corpus`] is
//! read-only.
//!
//! # Usage
//!
//! ```
//! use folio::testing::text_corpus;
//! use folio::{build_corpus, BuildOptions};
//!
//! let source = text_corpus(&[("doc1", "the cat sat"), ("doc2", "the cat sat on the mat")]);
//! let corpus = build_corpus(&source, &["doc1", "doc2"], &BuildOptions::plain()).unwrap();
//!
//! let results = corpus.query("cat");
//! assert_eq!(results[0].key, "doc1");
//! ```

// Module declarations
pub mod build;
pub mod config;
mod corpus;
pub mod error;
mod extract;
mod index;
mod lexicon;
pub mod scoring;
mod search;
pub mod source;
mod stats;
pub mod testing;
mod tokenize;
mod types;
mod weights;

// Re-exports for public API
pub use build::{build_corpus, BuildOptions, BuildReport, PageFailure};
#[cfg(feature = "parallel")]
pub use build::build_corpus_with_progress;
pub use config::SearchConfig;
pub use corpus::Corpus;
pub use error::{BuildError, ConfigError, SourceError};
pub use extract::{
    ExtractedDocument, RetrievalFailure, Term, TermContext, TermExtractor, WeightingMode,
};
pub use index::{term_weights, InvertedIndex, InvertedIndexBuilder};
pub use lexicon::{DocLexicon, Lexicon, LexiconBuilder, TermLexicon};
pub use scoring::{bm25_term_score, idf, Bm25Params};
pub use search::{QueryTerm, RankedDoc};
pub use source::{DocumentSource, MemorySource, SnapshotSource};
#[cfg(feature = "notion")]
pub use source::NotionSource;
pub use stats::CorpusStats;
pub use tokenize::{normalize_term, tokenize};
pub use types::{Annotation, Annotations, Block, DocId, PageMeta, TermId, TextRun};
pub use weights::{WeightTable, MAX_FACTOR};
