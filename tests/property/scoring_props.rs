//! BM25 scoring properties.

use crate::common::{keys, text_corpus};
use folio::{bm25_term_score, build_corpus, idf, Bm25Params, BuildOptions};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = Bm25Params> {
    (0.1f64..3.0, 0.0f64..=1.0).prop_map(|(k1, b)| Bm25Params { k1, b })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// More occurrences never lower the score, all else fixed.
    #[test]
    fn prop_score_monotonic_in_tf(
        tf in 0.0f64..50.0,
        extra in 0.0f64..50.0,
        doc_len in 1usize..200,
        avg in 1.0f64..100.0,
        n in 1usize..100,
        params in params_strategy(),
    ) {
        let n_t = 1.max(n / 2);
        let lower = bm25_term_score(tf, avg, doc_len, n_t, n, params);
        let higher = bm25_term_score(tf + extra, avg, doc_len, n_t, n, params);
        prop_assert!(higher >= lower - 1e-12, "{} < {}", higher, lower);
    }

    /// Scores are never negative, and zero exactly when tf is zero.
    #[test]
    fn prop_score_non_negative(
        tf in 0.0f64..50.0,
        doc_len in 0usize..200,
        avg in 1.0f64..100.0,
        n in 1usize..100,
        params in params_strategy(),
    ) {
        let n_t = 1.max(n / 3);
        let score = bm25_term_score(tf, avg, doc_len, n_t, n, params);
        prop_assert!(score >= 0.0);
        prop_assert_eq!(bm25_term_score(0.0, avg, doc_len, n_t, n, params), 0.0);
    }

    /// Rarer terms carry more information.
    #[test]
    fn prop_idf_decreasing_in_df(n in 2usize..1000, a in 0usize..1000, b in 0usize..1000) {
        let (a, b) = (a % (n + 1), b % (n + 1));
        let (rare, common) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(idf(rare, n) >= idf(common, n));
        prop_assert!(idf(common, n) > 0.0);
    }

    /// A query made only of unseen words scores every document zero.
    #[test]
    fn prop_unknown_terms_score_zero(
        texts in prop::collection::vec("[a-m]{1,6}( [a-m]{1,6}){0,8}", 1..6),
        query in "[n-z]{1,6}( [n-z]{1,6}){0,3}",
    ) {
        let names: Vec<String> = (0..texts.len()).map(|i| format!("doc-{i}")).collect();
        let pages: Vec<(&str, &str)> = names
            .iter()
            .map(String::as_str)
            .zip(texts.iter().map(String::as_str))
            .collect();
        let corpus = build_corpus(&text_corpus(&pages), &keys(&pages), &BuildOptions::plain()).unwrap();

        let results = corpus.query(&query);
        prop_assert_eq!(results.len(), texts.len());
        prop_assert!(results.iter().all(|r| r.score == 0.0));
    }
}
