// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the folio CLI.
//!
//! OneDark colours on dark terminals, One Light on light ones. Colour is only
//! emitted when stdout is a TTY and `NO_COLOR` is unset, so piping results into
//! another program yields plain text.
//!
//! # Theme detection order
//!
//! 1. `FOLIO_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use folio::{BuildReport, Corpus, RankedDoc};

/// Width between │ and │, excluding border chars.
pub const BOX_WIDTH: usize = 78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("FOLIO_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

/// Whether stdout gets ANSI colour.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, excluding ANSI codes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut `text` to at most `max` chars, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let (b, r) = (border(), reset());
    println!("{b}│{r}{}{}{b}│{r}", content, " ".repeat(pad));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let (b, r) = (border(), reset());
    println!("{b}┌{r}{}{b}{}┐{r}", label_part, "─".repeat(remaining));
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let (b, r) = (border(), reset());
    println!("{b}├{r}{}{b}{}┤{r}", label_part, "─".repeat(remaining));
}

/// └──────────────────┘
pub fn section_bot() {
    let (b, r) = (border(), reset());
    println!("{b}└{}┘{r}", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Score to four decimals, coloured by strength.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>8.4}", score);
    if score >= 1.0 {
        themed(GREEN, &[BOLD], &text)
    } else if score > 0.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// Display name for a result: its title, or its key when untitled.
pub fn display_title(result: &RankedDoc) -> &str {
    if result.title.trim().is_empty() {
        &result.key
    } else {
        &result.title
    }
}

/// The results worth showing: zero scores dropped unless asked for, then capped.
pub fn visible_results(results: &[RankedDoc], limit: usize, show_zero: bool) -> Vec<&RankedDoc> {
    results
        .iter()
        .filter(|r| show_zero || r.score > 0.0)
        .take(limit)
        .collect()
}

/// Ranked results as a boxed table: rank, score, title, URL.
pub fn print_results(query: &str, results: &[&RankedDoc]) {
    section_top(&format!("RESULTS for \"{}\"", truncate(query, 40)));
    if results.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], "no matching pages")));
    }
    for (rank, result) in results.iter().enumerate() {
        let rank_label = themed(BLUE, &[BOLD], &format!("{:>3}.", rank + 1));
        let title = truncate(display_title(result), BOX_WIDTH - 18);
        row(&format!(" {} {}  {}", rank_label, score_value(result.score), title));
        if !result.url.is_empty() {
            let url = truncate(&result.url, BOX_WIDTH - 16);
            row(&format!("               {}", themed(GRAY, &[DIM], &url)));
        }
    }
    section_bot();
}

/// Corpus statistics: totals, per-document lengths, failures.
pub fn print_inspect(corpus: &Corpus) {
    let report = corpus.report();
    section_top("CORPUS");
    row(&format!("  {} {}", pad_right("Documents:", 14), report.documents));
    row(&format!("  {} {}", pad_right("Terms:", 14), report.terms));
    row(&format!("  {} {}", pad_right("Postings:", 14), report.postings));
    row(&format!(
        "  {} {:.2}",
        pad_right("Avg length:", 14),
        corpus.average_document_length()
    ));
    row(&format!("  {} {:?}", pad_right("Weighting:", 14), corpus.mode()));

    section_mid("DOCUMENTS");
    for (doc, key) in corpus.documents().iter() {
        let title = corpus.title(doc);
        let name = if title.is_empty() { key } else { title };
        row(&format!(
            "  {} {} {}",
            themed(BLUE, &[], &format!("{:>5}", doc.to_string())),
            pad_right(&truncate(name, BOX_WIDTH - 22), BOX_WIDTH - 22),
            format!("{:>8}", corpus.document_length(doc)),
        ));
    }

    if report.has_failures() {
        print_failures(report);
    }
    section_bot();
}

fn print_failures(report: &BuildReport) {
    section_mid("RETRIEVAL FAILURES");
    for failure in &report.failures {
        let line = format!(
            "{} {}: {}",
            failure.page, failure.failure.id, failure.failure.error
        );
        row(&format!("  {}", themed(RED, &[], &truncate(&line, BOX_WIDTH - 4))));
    }
}

/// One-line build warning for stderr.
pub fn failure_summary(report: &BuildReport) -> Option<String> {
    if !report.has_failures() {
        return None;
    }
    Some(format!(
        "warning: {} retrieval failure(s) while indexing; run `folio inspect` for details",
        report.failures.len()
    ))
}
