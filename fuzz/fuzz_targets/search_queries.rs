// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Any query against a fixed corpus must return every document exactly once,
//! with finite non-negative scores, sorted best first.

#![no_main]

use std::collections::HashSet;
use std::sync::OnceLock;

use folio::testing::text_corpus;
use folio::{build_corpus, BuildOptions, Corpus};
use libfuzzer_sys::fuzz_target;

const PAGES: [(&str, &str); 4] = [
    ("doc1", "the cat sat"),
    ("doc2", "the cat sat on the mat"),
    ("doc3", "Storage engines: write-ahead logs and “compaction”"),
    ("doc4", "naïve café résumé 東京 emoji 🦀 snake_case"),
];

fuzz_target!(|query: &[u8]| {
    static CORPUS: OnceLock<Corpus> = OnceLock::new();
    let corpus = CORPUS.get_or_init(|| {
        let keys: Vec<&str> = PAGES.iter().map(|(k, _)| *k).collect();
        build_corpus(&text_corpus(&PAGES), &keys, &BuildOptions::rich())
            .expect("fixture corpus builds")
    });

    let query = String::from_utf8_lossy(query);
    let results = corpus.query(&query);

    assert_eq!(results.len(), PAGES.len());
    let unique: HashSet<&str> = results.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(unique.len(), PAGES.len());

    for pair in results.windows(2) {
        assert!(pair[0].score.is_finite() && pair[0].score >= 0.0);
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].doc_id < pair[1].doc_id, "ties must keep document order");
        }
    }
});
