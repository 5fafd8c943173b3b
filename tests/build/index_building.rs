//! Inverted index, lexicons and corpus statistics after a build.

use crate::common::{plain_corpus, wiki_corpus, CAT_PAGES};
use folio::{build_corpus, BuildError, BuildOptions, DocId, MemorySource, TermId};

#[test]
fn test_cat_corpus_statistics() {
    let corpus = plain_corpus(&CAT_PAGES);
    assert_eq!(corpus.document_count(), 2);
    assert_eq!(corpus.document_length(DocId(0)), 3);
    assert_eq!(corpus.document_length(DocId(1)), 6);
    assert_eq!(corpus.average_document_length(), 4.5);
    assert_eq!(corpus.stats().lengths(), &[3, 6]);
}

#[test]
fn test_postings_hold_term_frequencies() {
    let corpus = plain_corpus(&CAT_PAGES);
    let the = corpus.term_id("the").unwrap();
    let mat = corpus.term_id("mat").unwrap();

    assert_eq!(corpus.weight(the, DocId(0)), 1.0);
    assert_eq!(corpus.weight(the, DocId(1)), 2.0);
    assert_eq!(corpus.document_frequency(the), 2);

    let postings = corpus.postings(mat).unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings.get(&DocId(1)), Some(&1.0));
    assert_eq!(corpus.weight(mat, DocId(0)), 0.0);
}

#[test]
fn test_term_frequencies_sum_to_document_length() {
    let corpus = wiki_corpus(&BuildOptions::plain());
    for (doc, _) in corpus.documents().iter() {
        let total: f64 = corpus
            .terms()
            .iter()
            .map(|(term, _)| corpus.weight(term, doc))
            .sum();
        assert_eq!(total as usize, corpus.document_length(doc));
    }
}

#[test]
fn test_every_lexicon_term_has_postings() {
    let corpus = wiki_corpus(&BuildOptions::plain());
    assert_eq!(corpus.index().term_count(), corpus.terms().len());
    for (term, text) in corpus.terms().iter() {
        assert!(corpus.document_frequency(term) >= 1, "{text} has no postings");
    }
    assert_eq!(corpus.report().postings, corpus.index().pair_count());
}

#[test]
fn test_unknown_ids_read_as_empty() {
    let corpus = plain_corpus(&CAT_PAGES);
    assert!(corpus.postings(TermId(999)).is_none());
    assert_eq!(corpus.document_frequency(TermId(999)), 0);
    assert_eq!(corpus.weight(TermId(999), DocId(0)), 0.0);
    assert_eq!(corpus.document_length(DocId(999)), 0);
}

#[test]
fn test_duplicate_keys_indexed_once() {
    let source = crate::common::text_corpus(&CAT_PAGES);
    let corpus = build_corpus(&source, &["doc1", "doc2", "doc1"], &BuildOptions::plain()).unwrap();
    assert_eq!(corpus.document_count(), 2);
    assert_eq!(corpus.average_document_length(), 4.5);
}

#[test]
fn test_document_terms_in_reading_order() {
    let corpus = plain_corpus(&[("p", "Hello, World! hello")]);
    let doc = corpus.document_id("p").unwrap();
    assert_eq!(corpus.document_terms(doc), vec!["hello", "world", "hello"]);
}

#[test]
fn test_empty_key_list_is_an_error() {
    let source = MemorySource::new();
    let keys: [&str; 0] = [];
    let err = build_corpus(&source, &keys, &BuildOptions::plain()).unwrap_err();
    assert!(matches!(err, BuildError::EmptyCorpus));
}

#[test]
fn test_all_empty_documents_is_an_error() {
    let source = crate::common::text_corpus(&[("a", ""), ("b", "   ")]);
    let err = build_corpus(&source, &["a", "b"], &BuildOptions::plain()).unwrap_err();
    assert!(matches!(err, BuildError::EmptyCorpus));
}

#[test]
fn test_index_serializes_for_inspection() {
    let corpus = plain_corpus(&CAT_PAGES);
    let json = serde_json::to_value(corpus.index()).unwrap();
    assert!(json.is_object() || json.is_array());
    let report = serde_json::to_value(corpus.report()).unwrap();
    assert_eq!(report["documents"], 2);
}
