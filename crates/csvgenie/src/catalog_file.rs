//! Catalog loading from CSV and JSON files.
//!
//! The catalog source is external to the engine: this module turns a
//! file on disk into the `Vec<CatalogEntry>` the index is built from.
//! Malformed rows are skipped with a warning rather than failing the
//! load; a file that yields no usable entries at all is an error the
//! user can act on.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use csvgenie_core::catalog::CatalogIndex;
use csvgenie_core::models::CatalogEntry;

use crate::config::Config;

/// Row shape for CSV catalogs: `code,name,category` header, category
/// optional.
#[derive(Debug, Deserialize)]
struct CsvRow {
    code: String,
    name: String,
    #[serde(default)]
    category: String,
}

/// Load catalog entries from `path` in the given format (`csv`/`json`).
pub fn load_catalog(path: &Path, format: &str) -> Result<Vec<CatalogEntry>> {
    let entries = match format {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => anyhow::bail!("Unknown catalog format: '{}'. Must be csv or json.", other),
    };
    if entries.is_empty() {
        anyhow::bail!(
            "Catalog file {} contains no usable entries",
            path.display()
        );
    }
    tracing::info!(entries = entries.len(), path = %path.display(), "catalog loaded");
    Ok(entries)
}

/// Load the catalog named by config (or the `--catalog` override) and
/// build the index. The override's extension wins over the configured
/// format, so `--catalog items.json` just works.
pub fn load_index(config: &Config, override_path: Option<&Path>) -> Result<CatalogIndex> {
    let (path, format) = match override_path {
        Some(path) => {
            let format = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => "json",
                _ => "csv",
            };
            (path, format)
        }
        None => (
            config.catalog.path.as_path(),
            config.catalog.format.as_str(),
        ),
    };
    let entries = load_catalog(path, format)?;
    CatalogIndex::build(entries)
        .with_context(|| format!("Invalid catalog in {}", path.display()))
}

fn load_csv(path: &Path) -> Result<Vec<CatalogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open catalog file: {}", path.display()))?;

    let mut entries = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let line = i + 2; // 1-based, after the header row
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(line, %err, "skipping unreadable catalog row");
                continue;
            }
        };
        match normalize_row(row.code, row.name, row.category) {
            Some(entry) => entries.push(entry),
            None => tracing::warn!(line, "skipping catalog row without code or name"),
        }
    }
    Ok(entries)
}

fn load_json(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let raw: Vec<CatalogEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog JSON: {}", path.display()))?;
    Ok(raw
        .into_iter()
        .filter_map(|e| normalize_row(e.code, e.name, e.category))
        .collect())
}

fn normalize_row(code: String, name: String, category: String) -> Option<CatalogEntry> {
    let code = code.trim().to_string();
    let name = name.trim().to_string();
    if code.is_empty() || name.is_empty() {
        return None;
    }
    let category = category.trim().to_string();
    Some(CatalogEntry {
        code,
        name,
        category: if category.is_empty() {
            "General".to_string()
        } else {
            category
        },
    })
}
