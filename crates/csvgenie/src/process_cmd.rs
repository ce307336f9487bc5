//! The `genie process` command: order text in, export out.
//!
//! Reads a `.txt` order file, runs the matching engine against the
//! configured catalog, prints a review summary on stderr, and writes
//! the export (CSV by default) to stdout or a file. Diagnostics never
//! mix with export data: stdout stays parseable for piping.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csvgenie_core::models::OrderReport;
use csvgenie_core::process::OrderProcessor;

use crate::catalog_file;
use crate::config::Config;
use crate::export;

pub struct ProcessArgs<'a> {
    pub order: &'a Path,
    pub output: Option<&'a Path>,
    /// Write to a dated `order_results_YYYY-MM-DD.csv` when no explicit
    /// output path is given.
    pub save: bool,
    pub format: &'a str,
    pub quiet: bool,
}

pub fn run_process(config: &Config, catalog_override: Option<&Path>, args: &ProcessArgs) -> Result<()> {
    if args.order.extension().and_then(|e| e.to_str()) != Some("txt") {
        anyhow::bail!(
            "Unsupported order file: {}. Only .txt order files are accepted.",
            args.order.display()
        );
    }

    let text = std::fs::read_to_string(args.order)
        .with_context(|| format!("Failed to read order file: {}", args.order.display()))?;

    let index = catalog_file::load_index(config, catalog_override)?;
    let processor = OrderProcessor::new(Arc::new(index), config.match_config());
    let report = processor
        .process(&text)
        .context("Order processing failed")?;

    if !args.quiet {
        print_summary(&report);
    }

    let dated;
    let output = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => {
            dated = PathBuf::from(format!(
                "order_results_{}.csv",
                chrono::Local::now().format("%Y-%m-%d")
            ));
            Some(dated.as_path())
        }
        (None, false) => None,
    };

    export::run_export(&report, args.format, output)
}

/// Review summary on stderr: counts, timing, per-item confidence, and
/// every unmapped line with its reason.
fn print_summary(report: &OrderReport) {
    eprintln!(
        "Processed {} lines in {:.1} ms: {} mapped, {} unmapped",
        report.total_lines,
        report.processing_time_ms,
        report.mapped_count,
        report.unmapped_count
    );

    if !report.mapped.is_empty() {
        eprintln!();
        eprintln!(
            "  {:<12} {:>8} {:<10} {:>5}  {}",
            "CODE", "QTY", "CONFIDENCE", "SIM", "ITEM"
        );
        for item in &report.mapped {
            eprintln!(
                "  {:<12} {:>8} {:<10} {:>5.2}  {}",
                item.item_code,
                item.quantity,
                item.confidence.to_string(),
                item.similarity_score,
                item.item_name
            );
        }
    }

    if !report.unmapped.is_empty() {
        eprintln!();
        eprintln!("  Needs review:");
        for item in &report.unmapped {
            eprintln!(
                "  line {}: \"{}\" [{}] {}",
                item.original_line,
                item.original_text,
                item.reason,
                item.reason.message()
            );
        }
    }
    eprintln!();
}
