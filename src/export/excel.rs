//! Excel export
//!
//! Sheet one carries the breakdown table; sheet two (`App_Detail`) lists
//! every entry the modules did not claim, largest uncompressed first, with
//! raw byte counts next to the rounded megabyte strings.

use super::{overall_cells, row_cells, total_cells, COLUMNS};
use crate::archive::ArchiveEntry;
use crate::error::ApkSizeError;
use crate::fmt::format_mb;
use crate::report::ReportResult;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

const DETAIL_COLUMNS: [&str; 5] = [
    "Path",
    "Compressed (bytes)",
    "Uncompressed (bytes)",
    "Compressed (MB)",
    "Uncompressed (MB)",
];

fn write_workbook(
    report: &ReportResult,
    unattributed: &[&ArchiveEntry],
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Report")?;
    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    let mut row_num: u32 = 1;
    let all_rows = report
        .rows
        .iter()
        .map(row_cells)
        .chain(report.type_totals.iter().map(total_cells))
        .chain(std::iter::once(overall_cells(report)));
    for cells in all_rows {
        for (col, cell) in cells.iter().enumerate() {
            sheet.write_string(row_num, col as u16, cell.as_str())?;
        }
        row_num += 1;
    }

    let detail = workbook.add_worksheet();
    detail.set_name("App_Detail")?;
    for (col, header) in DETAIL_COLUMNS.iter().enumerate() {
        detail.write_string(0, col as u16, *header)?;
    }
    for (i, entry) in unattributed.iter().enumerate() {
        let row = (i + 1) as u32;
        detail.write_string(row, 0, entry.path.as_str())?;
        detail.write_number(row, 1, entry.compressed_size as f64)?;
        detail.write_number(row, 2, entry.uncompressed_size as f64)?;
        detail.write_string(row, 3, format_mb(entry.compressed_size))?;
        detail.write_string(row, 4, format_mb(entry.uncompressed_size))?;
    }

    workbook.save(path)
}

/// Write the report workbook to `path`.
///
/// `unattributed` must already be sorted by uncompressed size descending
/// (see [`crate::report::unattributed_entries`]).
///
/// # Errors
///
/// Returns [`ApkSizeError::ExportFailed`] on any workbook write failure.
/// Callers treat this as a reportable message, not a fatal condition.
pub fn export(
    report: &ReportResult,
    unattributed: &[&ArchiveEntry],
    path: &Path,
) -> Result<(), ApkSizeError> {
    write_workbook(report, unattributed, path).map_err(|e| ApkSizeError::ExportFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
