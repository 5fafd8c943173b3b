// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fetching and extracting pages, in parallel when the `parallel` feature is on.
//!
//! Fetching is the slow, I/O-bound part of a build and every page is
//! independent, so rayon's `par_iter()` covers it. `collect()` on an indexed
//! parallel iterator keeps input order, which is what makes the serial id
//! assignment afterwards reproducible. Without the feature the same code runs
//! on a plain iterator.

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::extract::{ExtractedDocument, TermExtractor, WeightingMode};
use crate::source::DocumentSource;

/// Extract every page in `keys`, results in `keys` order.
pub fn extract_documents<S>(source: &S, keys: &[&str], mode: WeightingMode) -> Vec<ExtractedDocument>
where
    S: DocumentSource + ?Sized,
{
    let extractor = TermExtractor::new(source, mode);

    #[cfg(feature = "parallel")]
    let docs = keys.par_iter().map(|key| extractor.extract(key)).collect();

    #[cfg(not(feature = "parallel"))]
    let docs = keys.iter().map(|key| extractor.extract(key)).collect();

    docs
}

/// Same as [`extract_documents`], ticking `progress` once per page.
#[cfg(feature = "parallel")]
pub fn extract_documents_with_progress<S>(
    source: &S,
    keys: &[&str],
    mode: WeightingMode,
    progress: &ProgressBar,
) -> Vec<ExtractedDocument>
where
    S: DocumentSource + ?Sized,
{
    let extractor = TermExtractor::new(source, mode);
    keys.par_iter()
        .map(|key| {
            let doc = extractor.extract(key);
            progress.inc(1);
            doc
        })
        .collect()
}
