// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query time: raw text in, every document ranked out.
//!
//! 1. Tokenize with the index-time tokenizer.
//! 2. Resolve terms through the term lexicon. Unknown terms resolve to nothing
//!    and contribute nothing; they are never mistaken for term id 0.
//! 3. Score every document, matching or not, by summing BM25 over resolved terms.
//! 4. Sort by score descending, ties in document order.
//!
//! Documents that match nothing score 0.0 and still appear. Filtering them is
//! the caller's business.

use serde::Serialize;

use crate::corpus::Corpus;
use crate::scoring::ranking::compare_ranked;
use crate::scoring::{bm25_term_score, Bm25Params};
use crate::tokenize::tokenize;
use crate::types::{DocId, TermId};

/// One document's place in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDoc {
    pub key: String,
    pub doc_id: DocId,
    pub score: f64,
    pub title: String,
    pub url: String,
}

/// A query term and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    pub text: String,
    pub id: Option<TermId>,
}

impl Corpus {
    /// Tokenize `raw` and resolve each token. Duplicates are kept: a term
    /// repeated in the query counts once per repetition.
    pub fn resolve_query(&self, raw: &str) -> Vec<QueryTerm> {
        tokenize(raw)
            .into_iter()
            .map(|text| {
                let id = self.term_id(&text);
                QueryTerm { text, id }
            })
            .collect()
    }

    /// Rank every document against `raw` with default BM25 parameters.
    pub fn query(&self, raw: &str) -> Vec<RankedDoc> {
        self.query_with(raw, Bm25Params::default())
    }

    /// Rank every document against `raw`.
    pub fn query_with(&self, raw: &str, params: Bm25Params) -> Vec<RankedDoc> {
        let term_ids: Vec<TermId> = self
            .resolve_query(raw)
            .into_iter()
            .filter_map(|term| term.id)
            .collect();

        self.rank(&term_ids, params)
            .into_iter()
            .map(|(doc_id, score)| RankedDoc {
                key: self.document_key(doc_id).unwrap_or_default().to_string(),
                doc_id,
                score,
                title: self.title(doc_id).to_string(),
                url: self.url(doc_id).to_string(),
            })
            .collect()
    }

    /// Score of `doc` for resolved `term_ids`.
    pub fn score(&self, doc: DocId, term_ids: &[TermId], params: Bm25Params) -> f64 {
        let n = self.document_count();
        let avg_doc_len = self.average_document_length();
        let doc_len = self.document_length(doc);

        term_ids
            .iter()
            .map(|&term| {
                bm25_term_score(
                    self.weight(term, doc),
                    avg_doc_len,
                    doc_len,
                    self.document_frequency(term),
                    n,
                    params,
                )
            })
            .sum()
    }

    /// `(doc, score)` for every document, best first.
    pub fn rank(&self, term_ids: &[TermId], params: Bm25Params) -> Vec<(DocId, f64)> {
        let mut ranked: Vec<(DocId, f64)> = self
            .documents()
            .iter()
            .map(|(doc, _)| (doc, self.score(doc, term_ids, params)))
            .collect();
        ranked.sort_by(|a, b| compare_ranked(*a, *b));
        ranked
    }
}
