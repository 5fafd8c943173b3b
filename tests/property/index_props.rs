//! Index construction properties over random corpora.

use crate::common::{keys, text_corpus};
use folio::{build_corpus, BuildOptions, Corpus, TermId};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words from a small vocabulary so documents share terms.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "alpha", "beta", "gamma", "delta", "storage", "engine", "Rust", "rust!", "cat", "mat",
    ])
    .prop_map(String::from)
}

/// Random documents, each with at least one word.
fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(word_strategy(), 1..20).prop_map(|w| w.join(" ")),
        1..8,
    )
}

fn build(texts: &[String]) -> Corpus {
    let names: Vec<String> = (0..texts.len()).map(|i| format!("doc-{i}")).collect();
    let pages: Vec<(&str, &str)> = names
        .iter()
        .map(String::as_str)
        .zip(texts.iter().map(String::as_str))
        .collect();
    build_corpus(&text_corpus(&pages), &keys(&pages), &BuildOptions::plain()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// In plain mode a document's term frequencies add up to its length.
    #[test]
    fn prop_tf_sum_equals_length(texts in corpus_strategy()) {
        let corpus = build(&texts);
        for (doc, _) in corpus.documents().iter() {
            let sum: f64 = corpus.terms().iter().map(|(t, _)| corpus.weight(t, doc)).sum();
            prop_assert_eq!(sum as usize, corpus.document_length(doc));
        }
    }

    /// Average length is total length over document count.
    #[test]
    fn prop_average_length(texts in corpus_strategy()) {
        let corpus = build(&texts);
        let total: usize = corpus.stats().lengths().iter().sum();
        let expected = total as f64 / corpus.document_count() as f64;
        prop_assert!((corpus.average_document_length() - expected).abs() < 1e-12);
    }

    /// Term ids are dense and stable across rebuilds of the same input.
    #[test]
    fn prop_lexicon_ids_stable(texts in corpus_strategy()) {
        let a = build(&texts);
        let b = build(&texts);
        let ids: Vec<u32> = a.terms().iter().map(|(id, _)| id.0).collect();
        prop_assert_eq!(ids, (0..a.terms().len() as u32).collect::<Vec<_>>());
        for (id, term) in a.terms().iter() {
            prop_assert_eq!(b.term_id(term), Some(id));
        }
    }

    /// Document frequency never exceeds the document count, and every known term occurs.
    #[test]
    fn prop_document_frequency_bounds(texts in corpus_strategy()) {
        let corpus = build(&texts);
        for (term, _) in corpus.terms().iter() {
            let df = corpus.document_frequency(term);
            prop_assert!(df >= 1);
            prop_assert!(df <= corpus.document_count());
        }
        prop_assert_eq!(corpus.document_frequency(TermId(u32::MAX)), 0);
    }
}
