// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text to index terms.
//!
//! Words are runs of word characters (`\b\w+\b`, Unicode-aware). Each word is
//! trimmed, lowercased and stripped of ASCII punctuation plus the curly double
//! quotes `“` and `”`. Words that end up empty are dropped. No stemming, no stop
//! words.
//!
//! The same [`tokenize`] runs at index time and at query time. If the two ever
//! diverge, query terms silently stop matching indexed terms.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';

#[inline]
fn is_stripped(c: char) -> bool {
    c.is_ascii_punctuation() || c == LEFT_DOUBLE_QUOTE || c == RIGHT_DOUBLE_QUOTE
}

/// Normalize a single word: trim, lowercase, strip punctuation.
///
/// - `“Don't”` → `dont`
/// - `Hello,` → `hello`
/// - `snake_case` → `snakecase` (underscore is ASCII punctuation)
pub fn normalize_term(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !is_stripped(*c))
        .collect()
}

/// Split text into normalized terms, in reading order.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| normalize_term(m.as_str()))
        .filter(|term| !term.is_empty())
        .collect()
}
