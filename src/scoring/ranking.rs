// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted.
//!
//! BM25 has no natural tie-break, so ties fall back to document order (the
//! order pages were given to the build). The same corpus and query always
//! produce the same ranking.

use std::cmp::Ordering;

use crate::types::DocId;

/// Sort order for `(doc, score)` pairs: score descending, then document id
/// ascending.
///
/// `total_cmp` keeps the order total even if a NaN slips through.
pub fn compare_ranked(a: (DocId, f64), b: (DocId, f64)) -> Ordering {
    match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        ord => ord,
    }
}
