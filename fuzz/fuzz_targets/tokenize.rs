// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the tokenizer.
//!
//! Arbitrary text in, normalized terms out: never empty, never uppercase ASCII,
//! never ASCII punctuation, and stable when fed back in.

#![no_main]

use folio::{normalize_term, tokenize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let terms = tokenize(&text);
    for term in &terms {
        assert!(!term.is_empty());
        assert!(!term.chars().any(|c| c.is_ascii_uppercase() || c.is_ascii_punctuation()));
        assert_eq!(&normalize_term(term), term, "normalized term changed on second pass");
    }

    assert_eq!(tokenize(&terms.join(" ")), terms);
});
