// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snapshot decoding.
//!
//! Malformed JSON must come back as an error, never a panic. Whatever does
//! decode must build (or fail with `EmptyCorpus`) without panicking either.

#![no_main]

use folio::{build_corpus, BuildError, BuildOptions, SnapshotSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = SnapshotSource::from_json(json) else {
        return;
    };

    match build_corpus(&snapshot, snapshot.page_ids(), &BuildOptions::rich()) {
        Ok(corpus) => assert!(corpus.average_document_length() > 0.0),
        Err(BuildError::EmptyCorpus) => {}
        Err(other) => panic!("unexpected build error: {other}"),
    }
});
