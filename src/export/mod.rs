//! Output adapters for the assembled report
//!
//! Each exporter consumes a finished [`ReportResult`](crate::report::ReportResult)
//! and renders it; none of them feeds back into aggregation. All three share
//! one column layout, defined here.

pub mod csv;
pub mod excel;
pub mod markdown;

use crate::fmt::format_mb;
use crate::report::{ModuleSizeRow, ReportResult, TypeTotal};
use std::path::PathBuf;

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Markdown report to standard output (the default)
    Stdout,
    /// Excel workbook with a detail sheet of unattributed entries
    Excel(PathBuf),
    /// CSV file
    Csv(PathBuf),
    /// Markdown file
    Markdown(PathBuf),
}

/// Column headers shared by every export format
pub const COLUMNS: [&str; 8] = [
    "Type",
    "SDK / Feature",
    "Original Install (MB)",
    "Original After Decompress (MB)",
    "Remaining Install (MB)",
    "Remaining After Decompress (MB)",
    "Delta Install (MB)",
    "Delta After Decompress (MB)",
];

/// Render one module row into its eight display cells.
///
/// The delta columns repeat the own-size values; consumers diffing two
/// reports read them as the change a module's removal would make.
pub(crate) fn row_cells(row: &ModuleSizeRow) -> [String; 8] {
    [
        row.kind.to_string(),
        row.name.clone(),
        format_mb(row.compressed_bytes),
        format_mb(row.uncompressed_bytes),
        format_mb(row.remaining_compressed),
        format_mb(row.remaining_uncompressed),
        format_mb(row.compressed_bytes),
        format_mb(row.uncompressed_bytes),
    ]
}

/// Render a per-kind total into its cells; the complement columns stay empty.
pub(crate) fn total_cells(total: &TypeTotal) -> [String; 8] {
    [
        "Total".to_string(),
        total.kind.to_string(),
        format_mb(total.compressed_bytes),
        format_mb(total.uncompressed_bytes),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

/// Render the overall total row.
pub(crate) fn overall_cells(report: &ReportResult) -> [String; 8] {
    [
        "Total".to_string(),
        "Overall".to_string(),
        format_mb(report.overall_total.compressed_bytes),
        format_mb(report.overall_total.uncompressed_bytes),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleKind;

    #[test]
    fn test_row_cells_delta_repeats_own_sizes() {
        let row = ModuleSizeRow {
            name: "ads".to_string(),
            kind: ModuleKind::Asset,
            compressed_bytes: 1_048_576,
            uncompressed_bytes: 2_097_152,
            remaining_compressed: 3_145_728,
            remaining_uncompressed: 6_291_456,
        };

        let cells = row_cells(&row);
        assert_eq!(cells[0], "Asset");
        assert_eq!(cells[1], "ads");
        assert_eq!(cells[2], "1.0 MB");
        assert_eq!(cells[3], "2.0 MB");
        assert_eq!(cells[4], "3.0 MB");
        assert_eq!(cells[5], "6.0 MB");
        assert_eq!(cells[6], cells[2]);
        assert_eq!(cells[7], cells[3]);
    }

    #[test]
    fn test_total_cells_leave_complement_columns_empty() {
        let total = TypeTotal {
            kind: ModuleKind::Library,
            compressed_bytes: 3_145_728,
            uncompressed_bytes: 8_388_608,
        };

        let cells = total_cells(&total);
        assert_eq!(cells[0], "Total");
        assert_eq!(cells[1], "Library");
        assert_eq!(cells[2], "3.0 MB");
        assert_eq!(cells[3], "8.0 MB");
        assert!(cells[4..].iter().all(|c| c.is_empty()));
    }
}
