// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The built, read-only index and everything needed to query it.
//!
//! A [`Corpus`] is immutable after [`build_corpus`](crate::build_corpus). There
//! is no update path: re-indexing means building a new one. Being immutable it
//! is `Sync`, and queries may run concurrently without locking.

use std::collections::BTreeMap;

use crate::build::BuildReport;
use crate::extract::WeightingMode;
use crate::index::InvertedIndex;
use crate::lexicon::{DocLexicon, TermLexicon};
use crate::stats::CorpusStats;
use crate::types::{DocId, PageMeta, TermId};

#[derive(Debug, Clone)]
pub struct Corpus {
    docs: DocLexicon,
    terms: TermLexicon,
    index: InvertedIndex,
    stats: CorpusStats,
    /// `pages[doc_id]`: display metadata.
    pages: Vec<PageMeta>,
    /// `doc_terms[doc_id]`: the extracted term stream, as ids.
    doc_terms: Vec<Vec<TermId>>,
    mode: WeightingMode,
    report: BuildReport,
}

impl Corpus {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        docs: DocLexicon,
        terms: TermLexicon,
        index: InvertedIndex,
        stats: CorpusStats,
        pages: Vec<PageMeta>,
        doc_terms: Vec<Vec<TermId>>,
        mode: WeightingMode,
        report: BuildReport,
    ) -> Self {
        Corpus {
            docs,
            terms,
            index,
            stats,
            pages,
            doc_terms,
            mode,
            report,
        }
    }

    pub fn documents(&self) -> &DocLexicon {
        &self.docs
    }

    pub fn terms(&self) -> &TermLexicon {
        &self.terms
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn mode(&self) -> WeightingMode {
        self.mode
    }

    /// Retrieval failures and counts from the build.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn document_id(&self, key: &str) -> Option<DocId> {
        self.docs.get(key)
    }

    pub fn document_key(&self, doc: DocId) -> Option<&str> {
        self.docs.key(doc)
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.terms.get(term)
    }

    /// Id and metadata of the page indexed under `key`.
    pub fn document(&self, key: &str) -> Option<(DocId, &PageMeta)> {
        let doc = self.document_id(key)?;
        self.page(doc).map(|meta| (doc, meta))
    }

    pub fn page(&self, doc: DocId) -> Option<&PageMeta> {
        self.pages.get(doc.index())
    }

    pub fn url(&self, doc: DocId) -> &str {
        self.page(doc).map_or("", |p| p.url.as_str())
    }

    pub fn title(&self, doc: DocId) -> &str {
        self.page(doc).map_or("", |p| p.title.as_str())
    }

    pub fn document_count(&self) -> usize {
        self.stats.document_count()
    }

    pub fn document_length(&self, doc: DocId) -> usize {
        self.stats.document_length(doc)
    }

    pub fn average_document_length(&self) -> f64 {
        self.stats.average_document_length()
    }

    pub fn document_frequency(&self, term: TermId) -> usize {
        self.index.document_frequency(term)
    }

    /// Documents containing `term`, with weights.
    pub fn postings(&self, term: TermId) -> Option<&BTreeMap<DocId, f64>> {
        self.index.postings(term)
    }

    /// Weight of `term` in `doc`, 0.0 if absent.
    pub fn weight(&self, term: TermId, doc: DocId) -> f64 {
        self.index.weight(term, doc)
    }

    /// The document's term stream in reading order (block text, then title).
    pub fn document_terms(&self, doc: DocId) -> Vec<&str> {
        self.doc_terms
            .get(doc.index())
            .map(|ids| ids.iter().filter_map(|id| self.terms.term(*id)).collect())
            .unwrap_or_default()
    }
}
