//! cdoc-splice — splice stored documentation comments into C source files
//! and verify the result differs only in comments and whitespace.

use anyhow::{bail, Context, Result};
use cdoc::context::RunContext;
use cdoc::splice;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "cdoc-splice",
    about = "Splice stored documentation comments into C source files"
)]
struct Cli {
    /// Input files (glob patterns supported)
    files: Vec<String>,

    /// Output directory for annotated copies
    #[arg(short = 'o', long, default_value = "result")]
    output: PathBuf,

    /// Comment store directory
    #[arg(long, default_value = "functions")]
    comments_dir: PathBuf,

    /// Project tag mixed into store keys
    #[arg(long, default_value = "Linux")]
    project: String,

    /// Fail when round-trip verification does not pass
    #[arg(long)]
    strict: bool,

    /// Print per-file progress
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.files.is_empty() {
        bail!("no input files given");
    }

    let files = expand_globs(&cli.files)?;
    if files.is_empty() {
        bail!("no files matched");
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {}", cli.output.display()))?;

    let mut failed = Vec::new();
    for path in &files {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let ctx = RunContext {
            project: cli.project.clone(),
            file_name: file_name.clone(),
            comments_dir: cli.comments_dir.clone(),
            verbose: cli.verbose,
        };

        let output_path = cli.output.join(&file_name);
        let report = splice::splice_file(&ctx, path, &output_path)?;
        if cli.verbose {
            println!(
                "{file_name}: {} function(s), {} commented, {} missing",
                report.functions,
                report.commented,
                report.missing.len()
            );
        }
        if !report.verified {
            eprintln!(
                "error: {file_name}: round-trip verification failed: the annotated file \
                 does not match the original once comments and whitespace are stripped"
            );
            failed.push(file_name);
        }
    }

    if cli.strict && !failed.is_empty() {
        bail!("round-trip verification failed for: {}", failed.join(", "));
    }
    Ok(())
}

/// Expand glob patterns into a list of real file paths; explicit paths are
/// kept as-is.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {pattern}"))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {pattern}");
        }
        files.extend(matches);
    }
    // Sort for deterministic processing order
    files.sort();
    files.dedup();
    Ok(files)
}
