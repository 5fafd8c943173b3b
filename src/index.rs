// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index: term id → (document id → weight).
//!
//! # Invariants
//!
//! 1. **EXACT_WEIGHT**: `postings[t][d]` is the accumulated weight of every
//!    occurrence of term `t` in document `d`. Raw count in plain mode, sum of
//!    context products in rich mode.
//! 2. **NO_EXPLICIT_ZERO**: absent pairs mean weight 0. A zero is never stored.
//! 3. **WRITE_ONCE**: a pair is written once. Recording it again with a different
//!    weight means the build went wrong and aborts with
//!    [`BuildError::Integrity`].
//!
//! Postings are keyed by dense [`TermId`]s, so a term lookup is a vector index.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::BuildError;
use crate::extract::Term;
use crate::types::{DocId, TermId};
use crate::weights::WeightTable;

/// Relative tolerance when comparing a recomputed weight with the stored one.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Read-only inverted index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvertedIndex {
    /// `postings[term_id]`: documents containing the term, by document id.
    postings: Vec<BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    /// Documents containing `term` with their weights. `None` for ids past the vocabulary.
    pub fn postings(&self, term: TermId) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(term.index())
    }

    /// Weight of `term` in `doc`; 0.0 when the document doesn't contain it.
    pub fn weight(&self, term: TermId, doc: DocId) -> f64 {
        self.postings(term)
            .and_then(|docs| docs.get(&doc))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of documents with a non-zero entry for `term`.
    pub fn document_frequency(&self, term: TermId) -> usize {
        self.postings(term).map_or(0, BTreeMap::len)
    }

    /// Number of terms with at least one posting slot.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Total number of stored (term, document) pairs.
    pub fn pair_count(&self) -> usize {
        self.postings.iter().map(BTreeMap::len).sum()
    }
}

/// Append-only construction of an [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct InvertedIndexBuilder {
    postings: Vec<BTreeMap<DocId, f64>>,
}

impl InvertedIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index[term][doc] = weight`.
    ///
    /// Zero weights are skipped. Re-recording an identical weight is a no-op;
    /// a different one is an integrity failure. Infinite and NaN weights are rejected.
    pub fn record(&mut self, term: TermId, doc: DocId, weight: f64) -> Result<(), BuildError> {
        if !weight.is_finite() {
            return Err(BuildError::NonFiniteWeight { term, doc, weight });
        }
        if term.index() >= self.postings.len() {
            self.postings.resize_with(term.index() + 1, BTreeMap::new);
        }
        if weight == 0.0 {
            return Ok(());
        }

        let docs = &mut self.postings[term.index()];
        match docs.get(&doc) {
            Some(&stored) if !weights_match(stored, weight) => Err(BuildError::Integrity {
                term,
                doc,
                stored,
                recomputed: weight,
            }),
            Some(_) => Ok(()),
            None => {
                docs.insert(doc, weight);
                Ok(())
            }
        }
    }

    pub fn finish(self) -> InvertedIndex {
        InvertedIndex {
            postings: self.postings,
        }
    }
}

fn weights_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= WEIGHT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Per-document term weights, in order of first occurrence.
///
/// Plain terms count 1 each. Rich terms count the product of their context's
/// factors in `table`.
pub fn term_weights<'t>(terms: &'t [Term], table: &WeightTable) -> Vec<(&'t str, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut weights: HashMap<&str, f64> = HashMap::new();

    for term in terms {
        let weight = match term {
            Term::Plain(_) => 1.0,
            Term::Rich { context, .. } => table.weight(context),
        };
        let text = term.text();
        match weights.get_mut(text) {
            Some(total) => *total += weight,
            None => {
                order.push(text);
                weights.insert(text, weight);
            }
        }
    }

    order
        .into_iter()
        .map(|text| (text, weights[text]))
        .collect()
}
