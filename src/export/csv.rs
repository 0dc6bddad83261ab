//! CSV export
//!
//! Same columns as the Markdown table, one record per row, then per-kind
//! and overall total records with the complement columns left empty.

use crate::error::ApkSizeError;
use crate::fmt::format_mb;
use crate::report::ReportResult;
use serde::Serialize;
use std::path::Path;

/// One CSV record; field renames define the header row.
#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "SDK / Feature")]
    name: String,
    #[serde(rename = "Original Install (MB)")]
    original_install: String,
    #[serde(rename = "Original After Decompress (MB)")]
    original_decompressed: String,
    #[serde(rename = "Remaining Install (MB)")]
    remaining_install: String,
    #[serde(rename = "Remaining After Decompress (MB)")]
    remaining_decompressed: String,
    #[serde(rename = "Delta Install (MB)")]
    delta_install: String,
    #[serde(rename = "Delta After Decompress (MB)")]
    delta_decompressed: String,
}

impl CsvRecord {
    fn total(kind: String, name: String, compressed: u64, uncompressed: u64) -> Self {
        Self {
            kind,
            name,
            original_install: format_mb(compressed),
            original_decompressed: format_mb(uncompressed),
            remaining_install: String::new(),
            remaining_decompressed: String::new(),
            delta_install: String::new(),
            delta_decompressed: String::new(),
        }
    }
}

/// Write the report as CSV to `path`.
///
/// # Errors
///
/// Returns [`ApkSizeError::Io`] if the file cannot be created or written.
pub fn export(report: &ReportResult, path: &Path) -> Result<(), ApkSizeError> {
    let to_io_error = |e: csv::Error| ApkSizeError::Io {
        context: format!("writing CSV to {}", path.display()),
        source: std::io::Error::other(e),
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_io_error)?;

    for row in &report.rows {
        writer
            .serialize(CsvRecord {
                kind: row.kind.to_string(),
                name: row.name.clone(),
                original_install: format_mb(row.compressed_bytes),
                original_decompressed: format_mb(row.uncompressed_bytes),
                remaining_install: format_mb(row.remaining_compressed),
                remaining_decompressed: format_mb(row.remaining_uncompressed),
                delta_install: format_mb(row.compressed_bytes),
                delta_decompressed: format_mb(row.uncompressed_bytes),
            })
            .map_err(to_io_error)?;
    }

    for total in &report.type_totals {
        writer
            .serialize(CsvRecord::total(
                "Total".to_string(),
                total.kind.to_string(),
                total.compressed_bytes,
                total.uncompressed_bytes,
            ))
            .map_err(to_io_error)?;
    }
    writer
        .serialize(CsvRecord::total(
            "Total".to_string(),
            "Overall".to_string(),
            report.overall_total.compressed_bytes,
            report.overall_total.uncompressed_bytes,
        ))
        .map_err(to_io_error)?;

    writer.flush().map_err(|source| ApkSizeError::Io {
        context: format!("writing CSV to {}", path.display()),
        source,
    })?;
    Ok(())
}
