//! Shared test utilities and fixtures.

#![allow(dead_code)]

use folio::testing::{annotated, heading, page_meta, paragraph};
use folio::{build_corpus, Annotation, BuildOptions, Corpus, MemorySource};

// Re-export canonical test utilities from folio::testing
pub use folio::testing::{keys, text_corpus};

/// Tolerance for comparing hand-computed BM25 scores.
pub const SCORE_EPS: f64 = 5e-4;

// ============================================================================
// FIXTURES
// ============================================================================

/// The two-document cat corpus: lengths 3 and 6, average 4.5.
pub const CAT_PAGES: [(&str, &str); 2] = [("doc1", "the cat sat"), ("doc2", "the cat sat on the mat")];

/// A small knowledge base with headings, callouts and annotations.
pub fn wiki_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.insert_page(
        "onboarding",
        page_meta("onboarding", "Onboarding Guide"),
        vec![
            heading("o1", 1, "Deploy checklist"),
            paragraph("o2", "Read the handbook before your first deploy."),
            annotated("o3", "callout", "Ask for access early", &[Annotation::Bold]),
        ],
    );
    source.insert_page(
        "runbook",
        page_meta("runbook", "Incident Runbook"),
        vec![
            heading("r1", 2, "Paging"),
            paragraph("r2", "Page the on-call engineer, then open an incident channel."),
            annotated("r3", "paragraph", "never deploy during an incident", &[Annotation::Italic]),
        ],
    );
    source.insert_page(
        "lunch",
        page_meta("lunch", "Lunch Menu"),
        vec![
            paragraph("l1", "Tacos on Tuesday, pizza on Friday."),
            annotated("l2", "paragraph", "salad bar closed", &[Annotation::Strikethrough]),
        ],
    );
    source
}

pub const WIKI_KEYS: [&str; 3] = ["onboarding", "runbook", "lunch"];

// ============================================================================
// BUILDERS
// ============================================================================

/// Build a plain-mode corpus from `(key, text)` pairs.
pub fn plain_corpus(pages: &[(&str, &str)]) -> Corpus {
    build_corpus(&text_corpus(pages), &keys(pages), &BuildOptions::plain())
        .expect("fixture corpus should build")
}

pub fn wiki_corpus(options: &BuildOptions) -> Corpus {
    build_corpus(&wiki_source(), &WIKI_KEYS, options).expect("wiki corpus should build")
}

/// Keys of the ranking, best first.
pub fn ranked_keys(corpus: &Corpus, query: &str) -> Vec<String> {
    corpus.query(query).into_iter().map(|r| r.key).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < SCORE_EPS,
        "expected {expected}, got {actual}"
    );
}
