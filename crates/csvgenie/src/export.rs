//! Order report export.
//!
//! CSV export renders exactly three fields per row (item code, item
//! name, quantity): mapped items first, then unmapped items with a
//! blank code and their original text, so nothing the user typed is
//! silently lost. Standard CSV quoting applies: fields containing a
//! comma, quote, or newline are wrapped in double quotes with internal
//! quotes doubled.
//!
//! JSON export serializes the whole report for downstream tooling.

use anyhow::{Context, Result};
use std::path::Path;

use csvgenie_core::models::OrderReport;

/// Render the report as CSV text.
pub fn csv_string(report: &OrderReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Item Code", "Item Name", "Quantity"])?;

    for item in &report.mapped {
        let quantity = format_quantity(item.quantity);
        writer.write_record([
            item.item_code.as_str(),
            item.item_name.as_str(),
            quantity.as_str(),
        ])?;
    }
    for item in &report.unmapped {
        let quantity = item.quantity.map(format_quantity).unwrap_or_default();
        writer.write_record(["", item.original_text.as_str(), quantity.as_str()])?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Render the report as pretty-printed JSON.
pub fn json_string(report: &OrderReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Write the rendered report to a file, or to stdout when `output` is
/// `None` (for piping).
pub fn run_export(report: &OrderReport, format: &str, output: Option<&Path>) -> Result<()> {
    let rendered = match format {
        "csv" => csv_string(report)?,
        "json" => json_string(report)?,
        other => anyhow::bail!("Unknown export format: '{}'. Use csv or json.", other),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} mapped, {} unmapped items to {}",
                report.mapped_count,
                report.unmapped_count,
                path.display()
            );
        }
        None => {
            print!("{}", rendered);
        }
    }
    Ok(())
}

/// Whole quantities print without a trailing `.0`.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        quantity.to_string()
    }
}
