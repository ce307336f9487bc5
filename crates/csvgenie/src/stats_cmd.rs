//! The `genie stats` command: a quick catalog health summary.
//!
//! Shows what is loaded before an order is processed: entry count and
//! the per-category breakdown, largest categories first.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use crate::catalog_file;
use crate::config::Config;

pub fn run_stats(config: &Config, catalog_override: Option<&Path>) -> Result<()> {
    let index = catalog_file::load_index(config, catalog_override)?;

    let path = catalog_override.unwrap_or(config.catalog.path.as_path());
    println!("Csvgenie: Catalog Stats");
    println!("=======================");
    println!();
    println!("  Catalog:    {}", path.display());
    println!("  Entries:    {}", index.len());

    let mut categories: HashMap<&str, usize> = HashMap::new();
    for entry in index.all_entries() {
        *categories.entry(entry.category.as_str()).or_insert(0) += 1;
    }
    let mut categories: Vec<(&str, usize)> = categories.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if !categories.is_empty() {
        println!();
        println!("  {:<24} {:>8}", "CATEGORY", "ENTRIES");
        println!("  {}", "-".repeat(33));
        for (category, count) in &categories {
            println!("  {:<24} {:>8}", category, count);
        }
    }
    println!();
    Ok(())
}
