//! The `genie search` command: ranked catalog candidates for a query.
//!
//! This is the same ranking the processor uses, exposed for humans:
//! reviewing an unmapped line, picking an entry to promote it with, or
//! just checking what a description would match.

use anyhow::Result;
use std::path::Path;

use csvgenie_core::process;

use crate::catalog_file;
use crate::config::Config;

pub fn run_search(
    config: &Config,
    catalog_override: Option<&Path>,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let index = catalog_file::load_index(config, catalog_override)?;
    let limit = limit.unwrap_or(config.output.search_limit);
    let weights = config.match_config().weights;

    let results = process::search(&index, query, &weights, limit);
    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, candidate) in results.iter().enumerate() {
        let strategies: Vec<&str> = candidate.strategies.iter().map(|s| s.as_str()).collect();
        println!(
            "{}. [{:.2}] {} / {}",
            i + 1,
            candidate.similarity,
            candidate.entry.code,
            candidate.entry.name
        );
        println!("    category: {}", candidate.entry.category);
        println!("    strategies: {}", strategies.join(", "));
        println!();
    }
    Ok(())
}
