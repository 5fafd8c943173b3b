// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the folio command-line interface.
//!
//! Three subcommands: `search` to run one query, `repl` to read queries from
//! stdin until a blank line, and `inspect` to print corpus statistics. All of
//! them build the index first, from a JSON snapshot or live from Notion.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "folio",
    about = "BM25 search over Notion-style pages",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Weight terms by heading level, callouts and text annotations
    #[arg(long, global = true)]
    pub rich: bool,

    /// JSON configuration file (mode, bm25, weights, limit)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log build progress at info level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where pages come from. A snapshot wins over Notion when both are given.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Corpus snapshot: {"pages": [...], "children": {...}}
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Notion integration token
    #[cfg(feature = "notion")]
    #[arg(long, env = "NOTION_TOKEN", global = true, hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion page id to index (repeatable)
    #[arg(long = "page", global = true)]
    pub pages: Vec<String>,

    /// File with one page id per line
    #[arg(long, global = true)]
    pub pages_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index and rank every page against one query
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Also show pages that scored zero
        #[arg(long)]
        show_zero: bool,
    },

    /// Build the index, then answer queries from stdin until a blank line or `:q`
    Repl {
        /// Maximum number of results per query
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build the index and print corpus statistics
    Inspect {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
