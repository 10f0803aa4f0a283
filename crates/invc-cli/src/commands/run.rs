//! Batch command: process every document in the inbox.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use invc_core::{BatchResult, Document, InvoiceExtractor};

use super::config;
use crate::report::{review_listing, write_summary, RunReport};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Directory containing the .txt documents (default from config)
    #[arg(long)]
    inbox: Option<PathBuf>,

    /// Output directory (default from config)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the JSON result to stdout without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Also write report.md with Plan / Execution / Verification sections
    #[arg(long)]
    report: bool,

    /// Print a concise summary and ask before writing files
    #[arg(long)]
    review: bool,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let ran_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let config = config::load(config_path)?;
    let inbox = args.inbox.clone().unwrap_or_else(|| config.output.inbox_dir.clone());
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.output.out_dir.clone());

    info!(
        "invc run starting (dry_run={}, report={}, review={})",
        args.dry_run, args.report, args.review
    );

    let extractor =
        InvoiceExtractor::new(&config.extraction).context("invalid extraction configuration")?;

    let files = discover(&inbox)?;
    if files.is_empty() {
        warn!("No .txt files found in {}", inbox.display());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut batch = BatchResult::new();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match fs::read(path) {
            Ok(bytes) => {
                debug!("Processing {}", name);
                let text = String::from_utf8_lossy(&bytes);
                batch.push(extractor.extract(&Document::new(name, text)));
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                batch.skip(&name, &e.to_string());
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    let batch = batch.finish();
    info!(
        "Done: {} invoice(s), {} assumption(s), {} question(s)",
        batch.invoices.len(),
        batch.notes.assumptions.len(),
        batch.notes.questions.len()
    );

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        info!("Dry run complete, no files written");
        return Ok(());
    }

    if args.review {
        print!("{}", review_listing(&batch));
        if !confirm("Write outputs? (y/N): ")? {
            info!("Review aborted, no files written");
            println!("Aborted. No files written.");
            return Ok(());
        }
    }

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let out_path = out_dir.join("invoices.json");
    fs::write(&out_path, serde_json::to_string_pretty(&batch)?)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!("Wrote {}", out_path.display());
    println!("{} invoices.json written to {}", style("✓").green(), out_path.display());

    if args.report {
        let stats = batch.stats();
        let report = RunReport {
            batch: &batch,
            stats: &stats,
            inbox: &inbox,
            out_file: &out_path,
            ran_at: &ran_at,
        };
        let report_path = out_dir.join("report.md");
        fs::write(&report_path, report.render())
            .with_context(|| format!("failed to write {}", report_path.display()))?;
        info!("Wrote {}", report_path.display());
        println!("{} report.md written to {}", style("✓").green(), report_path.display());
    }

    if args.summary {
        let summary_path = out_dir.join("summary.csv");
        write_summary(&summary_path, &batch)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;
        println!("{} summary.csv written to {}", style("✓").green(), summary_path.display());
    }

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        batch.invoices.len(),
        start.elapsed()
    );

    Ok(())
}

/// `*.txt` files directly inside `inbox`, sorted by name.
fn discover(inbox: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !inbox.is_dir() {
        anyhow::bail!("Inbox directory not found: {}", inbox.display());
    }

    let pattern = format!("{}/*.txt", Pattern::escape(&inbox.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    Ok(files)
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
