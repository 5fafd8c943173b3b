// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use folio::{
    build_corpus, BuildOptions, Corpus, DocumentSource, RankedDoc, SearchConfig, SnapshotSource,
    WeightingMode,
};

mod cli;
use cli::{display, Cli, Commands, SourceArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if cli.rich {
        config.mode = WeightingMode::Rich;
    }

    let corpus = build(&cli.source, &config.build_options())?;
    if let Some(warning) = display::failure_summary(corpus.report()) {
        eprintln!("{}", warning);
    }

    match cli.command {
        Commands::Search {
            query,
            limit,
            json,
            show_zero,
        } => run_search(&corpus, &config, &query, limit.unwrap_or(config.limit), json, show_zero),
        Commands::Repl { limit } => run_repl(&corpus, &config, limit.unwrap_or(config.limit)),
        Commands::Inspect { json } => run_inspect(&corpus, json),
    }
}

/// `RUST_LOG` wins; otherwise warn, or info with `--verbose`. Logs go to stderr.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "folio=info" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn build(args: &SourceArgs, options: &BuildOptions) -> Result<Corpus> {
    let mut keys = args.pages.clone();
    if let Some(path) = &args.pages_file {
        keys.extend(read_page_list(path)?);
    }

    if let Some(path) = &args.snapshot {
        let snapshot = SnapshotSource::open(path)
            .with_context(|| format!("opening snapshot {}", path.display()))?;
        if keys.is_empty() {
            keys = snapshot.page_ids().to_vec();
        }
        return build_from(&snapshot, &keys, options);
    }

    #[cfg(feature = "notion")]
    {
        if let Some(token) = &args.notion_token {
            if keys.is_empty() {
                bail!("no pages to index: pass --page or --pages-file");
            }
            let notion = folio::NotionSource::new(token).context("creating Notion client")?;
            return build_from(&notion, &keys, options);
        }
    }

    bail!("no document source: pass --snapshot, or a Notion token with --page")
}

fn build_from<S: DocumentSource>(source: &S, keys: &[String], options: &BuildOptions) -> Result<Corpus> {
    if keys.is_empty() {
        bail!("no pages to index");
    }

    #[cfg(feature = "parallel")]
    {
        if atty::is(atty::Stream::Stderr) {
            let progress = indicatif::ProgressBar::new(keys.len() as u64);
            progress.set_style(
                indicatif::ProgressStyle::with_template(
                    "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
                )?
                .progress_chars("━━╸"),
            );
            progress.set_prefix("Fetching");
            let corpus = folio::build_corpus_with_progress(source, keys, options, &progress);
            progress.finish_and_clear();
            return corpus.context("building index");
        }
    }

    build_corpus(source, keys, options).context("building index")
}

/// One page id per line. Blank lines and `#` comments are skipped.
fn read_page_list(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    results: Vec<&'a RankedDoc>,
}

fn run_search(
    corpus: &Corpus,
    config: &SearchConfig,
    query: &str,
    limit: usize,
    json: bool,
    show_zero: bool,
) -> Result<()> {
    let results = corpus.query_with(query, config.bm25);
    let visible = display::visible_results(&results, limit, show_zero);

    if json {
        let output = SearchOutput {
            query,
            results: visible,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display::print_results(query, &visible);
    }
    Ok(())
}

fn run_repl(corpus: &Corpus, config: &SearchConfig, limit: usize) -> Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("{} ", display::themed(display::CYAN, &[display::BOLD], "folio>"));
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let query = line.context("reading query")?;
        let query = query.trim();
        if query.is_empty() || query == ":q" {
            break;
        }

        let results = corpus.query_with(query, config.bm25);
        display::print_results(query, &display::visible_results(&results, limit, false));
    }
    Ok(())
}

#[derive(Serialize)]
struct DocumentStats<'a> {
    key: &'a str,
    title: &'a str,
    length: usize,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    #[serde(flatten)]
    report: &'a folio::BuildReport,
    average_document_length: f64,
    mode: WeightingMode,
    pages: Vec<DocumentStats<'a>>,
}

fn run_inspect(corpus: &Corpus, json: bool) -> Result<()> {
    if !json {
        display::print_inspect(corpus);
        return Ok(());
    }

    let pages = corpus
        .documents()
        .iter()
        .map(|(doc, key)| DocumentStats {
            key,
            title: corpus.title(doc),
            length: corpus.document_length(doc),
        })
        .collect();
    let output = InspectOutput {
        report: corpus.report(),
        average_document_length: corpus.average_document_length(),
        mode: corpus.mode(),
        pages,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
