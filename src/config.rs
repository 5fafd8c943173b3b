// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "mode": "rich",
//!   "bm25": { "k1": 1.2, "b": 0.75 },
//!   "weights": { "heading_1": 4.0, "quote": 1.3 },
//!   "limit": 10
//! }
//! ```
//!
//! `weights` entries override or extend the default factor table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::build::BuildOptions;
use crate::error::ConfigError;
use crate::extract::WeightingMode;
use crate::scoring::Bm25Params;
use crate::weights::{WeightTable, MAX_FACTOR};

/// Results shown by default.
pub const DEFAULT_LIMIT: usize = 10;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub mode: WeightingMode,
    pub bm25: Bm25Params,
    pub weights: HashMap<String, f64>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mode: WeightingMode::Plain,
            bm25: Bm25Params::default(),
            weights: HashMap::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// BM25 parameters must be valid and every weight within `[0, MAX_FACTOR]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bm25.validate()?;
        for (tag, factor) in &self.weights {
            if !(0.0..=MAX_FACTOR).contains(factor) {
                return Err(ConfigError::InvalidParameter(format!(
                    "weight for '{}' must be within [0, {}], got {}",
                    tag, MAX_FACTOR, factor
                )));
            }
        }
        Ok(())
    }

    pub fn weight_table(&self) -> WeightTable {
        WeightTable::with_overrides(&self.weights)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            mode: self.mode,
            weights: self.weight_table(),
        }
    }
}
