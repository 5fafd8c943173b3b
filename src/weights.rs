// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rich-text weighting factors.
//!
//! How much more a term counts, relative to plain paragraph text, depending on
//! where it sits and how it is formatted. An occurrence's weight is the product
//! of the factors of every tag in its context. Tags without an entry count 1.0.
//!
//! | Tag             | Factor |
//! |-----------------|--------|
//! | `heading_1`     | 3.0    |
//! | `heading_2`     | 2.0    |
//! | `heading_3`     | 1.5    |
//! | `callout`       | 1.5    |
//! | `title`         | 1.5    |
//! | `bold`          | 1.2    |
//! | `italic`        | 1.1    |
//! | `underline`     | 1.1    |
//! | `strikethrough` | 0.5    |
//! | `code`          | 1.0    |

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::extract::TermContext;

/// Factor for tags missing from the table.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Largest factor a table may hold. A context has at most a block tag plus
/// five annotations, so any product stays far below `f64::MAX`.
pub const MAX_FACTOR: f64 = 1.0e3;

const DEFAULT_FACTORS: [(&str, f64); 10] = [
    ("heading_1", 3.0),
    ("heading_2", 2.0),
    ("heading_3", 1.5),
    ("callout", 1.5),
    ("title", 1.5),
    ("bold", 1.2),
    ("italic", 1.1),
    ("underline", 1.1),
    ("strikethrough", 0.5),
    ("code", 1.0),
];

/// Tag name to multiplicative factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    factors: BTreeMap<String, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable {
            factors: DEFAULT_FACTORS
                .iter()
                .map(|(tag, factor)| ((*tag).to_string(), *factor))
                .collect(),
        }
    }
}

impl WeightTable {
    /// Table with no factors: every occurrence weighs 1.0.
    pub fn neutral() -> Self {
        WeightTable {
            factors: BTreeMap::new(),
        }
    }

    /// Default table with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Self {
        let mut table = WeightTable::default();
        for (tag, factor) in overrides {
            table.factors.insert(tag.clone(), *factor);
        }
        table
    }

    pub fn factor(&self, tag: &str) -> f64 {
        self.factors.get(tag).copied().unwrap_or(NEUTRAL_WEIGHT)
    }

    /// Product of the factors of every tag in `context`.
    pub fn weight(&self, context: &TermContext) -> f64 {
        context.tags().map(|tag| self.factor(tag)).product()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors.iter().map(|(tag, factor)| (tag.as_str(), *factor))
    }
}
