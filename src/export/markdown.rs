//! Markdown report rendering
//!
//! Produces the human-readable report: a per-type summary, a column legend
//! and the aligned breakdown table. The same renderer serves standard output
//! and `--md FILE`.

use super::{overall_cells, row_cells, total_cells, COLUMNS};
use crate::fmt::format_mb;
use crate::report::ReportResult;

const LEGEND: &str = "\
Column | Description
:--|:--
**Type** | Row kind: 'Asset', 'Library' or 'App'.
**SDK / Feature** | Module name, or App for unattributed bytes.
**Original Install (MB)** | Compressed size of the module.
**Original After Decompress (MB)** | Uncompressed size of the module.
**Remaining Install (MB)** | Compressed size of everything else.
**Remaining After Decompress (MB)** | Uncompressed size of everything else.
**Delta Install (MB)** | Compressed change if the module were removed.
**Delta After Decompress (MB)** | Uncompressed change if the module were removed.
";

fn table_line(cells: &[String; 8], widths: &[usize; 8]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |", padded.join(" | "))
}

/// Render the full Markdown report.
pub fn render(report: &ReportResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Summary preamble, from exact byte totals.
    lines.push("### 📊 Summary per Type".to_string());
    lines.push(String::new());
    for total in &report.type_totals {
        lines.push(format!(
            "- **{}**: {} (compressed), {} (decompressed)",
            total.kind,
            format_mb(total.compressed_bytes),
            format_mb(total.uncompressed_bytes)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "**Total Archive Overall**: {} (compressed), {} (decompressed)",
        format_mb(report.overall_total.compressed_bytes),
        format_mb(report.overall_total.uncompressed_bytes)
    ));
    lines.push(String::new());

    lines.push("## 📦 Size Breakdown per Module".to_string());
    lines.push(String::new());
    lines.push(LEGEND.to_string());

    let row_lines: Vec<[String; 8]> = report.rows.iter().map(row_cells).collect();
    let total_lines: Vec<[String; 8]> = report.type_totals.iter().map(total_cells).collect();
    let overall_line = overall_cells(report);

    // Column widths fit the widest cell; the first column never narrower
    // than the 'Total' marker.
    let mut widths = [0usize; 8];
    for (i, header) in COLUMNS.iter().enumerate() {
        widths[i] = header.len();
    }
    widths[0] = widths[0].max("Total".len());
    for cells in row_lines
        .iter()
        .chain(total_lines.iter())
        .chain(std::iter::once(&overall_line))
    {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header: [String; 8] = COLUMNS.map(str::to_string);
    let separator: [String; 8] = widths.map(|w| "-".repeat(w));
    lines.push(table_line(&header, &widths));
    lines.push(table_line(&separator, &widths));
    for cells in &row_lines {
        lines.push(table_line(cells, &widths));
    }
    lines.push(table_line(&separator, &widths));
    for cells in &total_lines {
        lines.push(table_line(cells, &widths));
    }
    lines.push(table_line(&separator, &widths));
    lines.push(table_line(&overall_line, &widths));

    lines.join("\n")
}
