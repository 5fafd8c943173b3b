// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking: Okapi BM25.
//!
//! ```text
//! IDF         = ln( (N - n_t + 0.5) / (n_t + 0.5) + 1 )
//! numerator   = tf * (k1 + 1)
//! denominator = tf + k1 * (1 - b + b * dl / avgdl)
//! score       = IDF * numerator / denominator
//! ```
//!
//! The `+ 1` inside the log keeps IDF positive even for terms in every document,
//! so adding a matching term never lowers a score.
//!
//! # Properties
//!
//! - `tf = 0` scores exactly 0.
//! - For `k1 > 0`, `b` in `[0, 1]` and fixed everything else, the score is
//!   strictly increasing in `tf` and bounded above by `IDF * (k1 + 1)`.
//! - Longer-than-average documents score lower for the same `tf` when `b > 0`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default term-frequency saturation.
pub const DEFAULT_K1: f64 = 1.2;

/// Default length normalization strength.
pub const DEFAULT_B: f64 = 0.75;

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

impl Bm25Params {
    pub fn new(k1: f64, b: f64) -> Result<Self, ConfigError> {
        let params = Bm25Params { k1, b };
        params.validate()?;
        Ok(params)
    }

    /// `k1` must be finite and non-negative, `b` within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(ConfigError::InvalidParameter(format!(
                "k1 must be finite and >= 0, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(ConfigError::InvalidParameter(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }
}

/// Inverse document frequency with the Robertson-Spärck Jones `+0.5` correction.
///
/// `n_t` documents out of `n` contain the term.
#[inline]
pub fn idf(n_t: usize, n: usize) -> f64 {
    let n_t = n_t as f64;
    let n = n as f64;
    ((n - n_t + 0.5) / (n_t + 0.5) + 1.0).ln()
}

/// Contribution of one query term to one document's score.
///
/// - `tf`: term weight in the document (count, or weighted sum in rich mode)
/// - `avg_doc_len`: mean document length over the corpus
/// - `doc_len`: this document's length
/// - `n_t`: documents containing the term
/// - `n`: documents in the corpus
#[inline]
pub fn bm25_term_score(
    tf: f64,
    avg_doc_len: f64,
    doc_len: usize,
    n_t: usize,
    n: usize,
    params: Bm25Params,
) -> f64 {
    if tf == 0.0 {
        return 0.0;
    }
    let Bm25Params { k1, b } = params;
    let numerator = tf * (k1 + 1.0);
    let denominator = tf + k1 * (1.0 - b + b * (doc_len as f64 / avg_doc_len));
    idf(n_t, n) * numerator / denominator
}
