//! Report output: JSON printing and CSV summary persistence.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::checks::{OverallResult, TableResult};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row summarizing a checked table.
#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub checked_at: DateTime<Utc>,
    pub title: String,
    pub errors: usize,
    pub warnings: usize,
    pub success: bool,
}

impl TableSummary {
    pub fn from_result(result: &TableResult) -> Self {
        Self {
            checked_at: Utc::now(),
            title: result.title.clone(),
            errors: result.errors.len(),
            warnings: result.warnings.len(),
            success: result.success,
        }
    }
}

/// Logs the full report using Rust's debug pretty-print format.
pub fn print_pretty(result: &OverallResult) {
    debug!("{:#?}", result);
}

/// Prints the full report as pretty-printed JSON on stdout.
pub fn print_json(result: &OverallResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Appends a [`TableSummary`] row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &str, summary: &TableSummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV summary row");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    info!(path, title = %summary.title, "Summary row written");
    Ok(())
}
