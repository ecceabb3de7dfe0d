//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use super::{convert_file, load_config, DocumentKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name extracts after the input file instead of the invoice header
    #[arg(long)]
    keep_names: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    output: Option<PathBuf>,
    line_items: usize,
    warnings: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = convert_file(path.clone(), config.clone()).await.and_then(|conversion| {
            let name = if args.keep_names {
                extract_name_for(&path)
            } else {
                conversion.archive.filename.clone()
            };
            let output_path = unique_output_path(&output_dir, &name);
            fs::write(&output_path, &conversion.archive.bytes)?;
            debug!("Wrote extract to {}", output_path.display());
            Ok((conversion, output_path))
        });

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok((conversion, output_path)) => results.push(ProcessResult {
                path: path.clone(),
                output: Some(output_path),
                line_items: conversion.extraction.invoice.line_items.len(),
                warnings: conversion.extraction.warnings.len(),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        output: None,
                        line_items: 0,
                        warnings: 0,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    for result in &results {
        match (&result.output, &result.error) {
            (Some(output), _) => println!(
                "  {} {} -> {} ({} items, {} warnings, {}ms)",
                style("✓").green(),
                result.path.display(),
                output.display(),
                result.line_items,
                result.warnings,
                result.processing_time_ms
            ),
            (None, error) => println!(
                "  {} {}: {}",
                style("✗").red(),
                result.path.display(),
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed).green(),
        style(failed).red()
    );

    Ok(())
}

/// `dir/name`, or `dir/<stem>-N.<ext>` with the first free `N` when taken.
fn unique_output_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (name, String::new()),
    };
    (1..)
        .map(|n| dir.join(format!("{}-{}{}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

fn extract_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("invoice");
    format!("{}_extract.zip", stem)
}
