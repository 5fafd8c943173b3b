//! Queries that resolve to nothing, odd input, and tie handling.

use crate::common::{plain_corpus, CAT_PAGES};

#[test]
fn test_unknown_terms_never_alias_term_zero() {
    // "the" is term 0; a query that resolves nothing must not score it
    let corpus = plain_corpus(&CAT_PAGES);
    assert_eq!(corpus.term_id("the"), Some(folio::TermId(0)));

    let results = corpus.query("zebra");
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_mixed_known_and_unknown_terms() {
    let corpus = plain_corpus(&CAT_PAGES);
    let known = corpus.query("mat");
    let mixed = corpus.query("mat zebra");
    assert_eq!(known, mixed);
}

#[test]
fn test_punctuation_only_query() {
    let corpus = plain_corpus(&CAT_PAGES);
    let results = corpus.query("?!… --- “”");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_query_case_and_quotes_normalized() {
    let corpus = plain_corpus(&CAT_PAGES);
    assert_eq!(corpus.query("MAT"), corpus.query("“mat”"));
}

#[test]
fn test_ties_keep_document_order() {
    let corpus = plain_corpus(&[("z", "same words"), ("a", "same words"), ("m", "same words")]);
    let keys: Vec<String> = corpus.query("same").into_iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_term_in_every_document_still_scores_positive() {
    let corpus = plain_corpus(&CAT_PAGES);
    let results = corpus.query("the");
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn test_empty_document_scores_zero() {
    let corpus = plain_corpus(&[("full", "cat cat"), ("blank", "")]);
    let results = corpus.query("cat");
    assert_eq!(results[0].key, "full");
    assert_eq!(results[1].key, "blank");
    assert_eq!(results[1].score, 0.0);
    assert_eq!(corpus.document_length(corpus.document_id("blank").unwrap()), 0);
}

#[test]
fn test_resolve_query_reports_unknown_terms() {
    let corpus = plain_corpus(&CAT_PAGES);
    let resolved = corpus.resolve_query("Cat zebra");
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].text, "cat");
    assert!(resolved[0].id.is_some());
    assert_eq!(resolved[1].text, "zebra");
    assert!(resolved[1].id.is_none());
}
