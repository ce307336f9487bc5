//! # Csvgenie CLI (`genie`)
//!
//! The `genie` binary turns free-form grocery order text into a
//! structured, catalog-aligned item list and exports it as CSV.
//!
//! ## Usage
//!
//! ```bash
//! genie --config ./genie.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `genie process <order.txt>` | Match an order against the catalog and export the result |
//! | `genie search "<query>"` | Show ranked catalog candidates for a query |
//! | `genie stats` | Show catalog entry and category counts |
//! | `genie validate` | Check config and catalog without processing |
//!
//! ## Examples
//!
//! ```bash
//! # Process an order and print CSV on stdout
//! genie process order.txt --catalog catalog.csv
//!
//! # Process and write a file, keeping the review summary on stderr
//! genie process order.txt --output results.csv
//!
//! # Find the entry to promote an unmapped line with
//! genie search "red apple" --limit 5
//! ```

mod catalog_file;
mod config;
mod export;
mod process_cmd;
mod search_cmd;
mod stats_cmd;
mod validate_cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Csvgenie: match free-form order text against a product catalog and
/// export a clean item list.
///
/// All commands read the catalog and matching thresholds from a TOML
/// configuration file; every value has a sensible default, so the file
/// is optional.
#[derive(Parser)]
#[command(
    name = "genie",
    about = "Csvgenie: turn free-form order text into a catalog-aligned CSV",
    version,
    long_about = "Csvgenie matches each line of a grocery order (\"2 apples\") against a \
    product catalog using five independent strategies (substring, all-words, prefix, \
    acronym, fuzzy), ranks the candidates, and classifies every line as mapped or \
    unmapped with a confidence tier. The result exports as a three-column CSV."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./genie.toml`; when the default is absent, built-in
    /// defaults apply. Matching weights, classification thresholds, and
    /// the catalog location are read from this file.
    #[arg(long, global = true, default_value = "./genie.toml")]
    config: PathBuf,

    /// Catalog file override (`.csv` or `.json`), taking precedence
    /// over the configured catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Process an order text file against the catalog.
    ///
    /// Each non-blank line is parsed for a leading quantity, matched,
    /// scored, and classified. The export (CSV by default) goes to
    /// stdout or `--output`; a per-line review summary goes to stderr.
    Process {
        /// Order text file (`.txt`), one item per line.
        order: PathBuf,

        /// Write the export to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Shorthand for `--output order_results_<date>.csv`.
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Export format: `csv` (three columns) or `json` (full report).
        #[arg(long, default_value = "csv")]
        format: String,

        /// Suppress the review summary on stderr.
        #[arg(long)]
        quiet: bool,
    },

    /// Show ranked catalog candidates for a search query.
    ///
    /// Uses the same matcher and scorer as `process`. This is the
    /// lookup behind manual entry and the explicit promotion of an
    /// unmapped line.
    Search {
        /// The search query (e.g. a rephrased order line).
        query: String,

        /// Maximum number of candidates to show.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show catalog entry and per-category counts.
    Stats,

    /// Check the config and catalog without processing an order.
    ///
    /// Fails on duplicate catalog codes, unreadable files, or
    /// out-of-range thresholds.
    Validate,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let cli = Cli::parse();
    let explicit_config = cli.config != PathBuf::from("./genie.toml");
    let cfg = config::load_config(&cli.config, explicit_config)?;

    match cli.command {
        Commands::Process {
            order,
            output,
            save,
            format,
            quiet,
        } => {
            let args = process_cmd::ProcessArgs {
                order: &order,
                output: output.as_deref(),
                save,
                format: &format,
                quiet,
            };
            process_cmd::run_process(&cfg, cli.catalog.as_deref(), &args)?;
        }
        Commands::Search { query, limit } => {
            search_cmd::run_search(&cfg, cli.catalog.as_deref(), &query, limit)?;
        }
        Commands::Stats => {
            stats_cmd::run_stats(&cfg, cli.catalog.as_deref())?;
        }
        Commands::Validate => {
            validate_cmd::run_validate(&cfg, cli.catalog.as_deref())?;
        }
    }

    Ok(())
}
