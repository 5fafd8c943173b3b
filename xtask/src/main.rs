//! Custom cargo commands for folio.
//!
//! Usage:
//!   cargo xtask verify          - Tests across the feature matrix, plus clippy
//!   cargo xtask test            - Run all tests
//!   cargo xtask check           - Quick check (default features only)
//!   cargo xtask bench           - Run criterion benchmarks
//!   cargo xtask fuzz <TARGET>   - Run a fuzz target for 60 seconds

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const FUZZ_TARGETS: [&str; 3] = ["tokenize", "search_queries", "snapshot_parsing"];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify           Tests with default, no-default and single features, then clippy
  test             Run all Rust tests
  check            Quick check (cargo check + test + clippy)
  bench            Run benchmarks
  fuzz <TARGET>    Run a fuzz target (tokenize, search_queries, snapshot_parsing)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("folio Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running tests (default features)...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ Default features\n");

    println!("[2/4] Running tests (no default features)...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build, no Notion client\n");

    println!("[3/4] Running tests (parallel only)...");
    run_cargo(&["test", "--quiet", "--no-default-features", "--features", "parallel"])?;
    println!("✓ Parallel build without Notion client\n");

    println!("[4/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run one cargo-fuzz target (requires nightly and cargo-fuzz)
fn fuzz(target: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("missing fuzz target; one of {:?}", FUZZ_TARGETS);
    };
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target '{}'; one of {:?}", target, FUZZ_TARGETS);
    }

    let root = project_root()?;
    let status = Command::new("cargo")
        .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
        .current_dir(&root)
        .status()
        .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

    if !status.success() {
        bail!("fuzz target {} failed", target);
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
