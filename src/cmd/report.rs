//! Report command implementation
//!
//! Runs the full pipeline: load the entry index, infer modules, aggregate,
//! then hand the result to the selected export sink.

use crate::archive::EntryIndex;
use crate::cmd::ReportConfig;
use crate::export::{csv, excel, markdown, ExportTarget};
use crate::fmt::{CHECKMARK, CROSSMARK};
use crate::modules::{infer_modules, ModuleMap};
use crate::report::{aggregate, unattributed_entries};
use anyhow::Result;
use console::style;
use log::info;
use std::fs;

/// Print the inferred mapping as a declaration-like listing.
fn print_module_mapping(map: &ModuleMap) {
    println!("# module mapping:");
    println!("modules = {{");
    for (name, prefixes) in &map.modules {
        let list: Vec<String> = prefixes.iter().map(|p| format!("\"{p}\"")).collect();
        println!("  \"{name}\": [{}],", list.join(", "));
    }
    println!("}}");
}

/// Generate the size report and send it to the configured sink.
///
/// Archive access failures propagate; an Excel write failure is reported as
/// a message and the run still counts as a success.
pub fn cmd_report(config: &ReportConfig) -> Result<()> {
    let index = EntryIndex::load(&config.archive_path)?;
    info!(
        "analyzing {} ({} entries)",
        config.archive_path.display(),
        index.entries.len()
    );

    let module_map = infer_modules(index.sorted_paths(), "");
    if config.generate_mapping {
        print_module_mapping(&module_map);
    }

    let kind_filter = config.type_filter.kind();
    let report = aggregate(&index, &module_map, kind_filter);

    match &config.export_target {
        ExportTarget::Stdout => {
            println!("{}", markdown::render(&report));
        }
        ExportTarget::Markdown(path) => {
            fs::write(path, markdown::render(&report)).map_err(|source| {
                crate::error::ApkSizeError::Io {
                    context: format!("writing Markdown to {}", path.display()),
                    source,
                }
            })?;
            println!(
                "{} Markdown saved to {}",
                CHECKMARK,
                style(path.display()).green()
            );
        }
        ExportTarget::Csv(path) => {
            csv::export(&report, path)?;
            println!("{} CSV saved to {}", CHECKMARK, style(path.display()).green());
        }
        ExportTarget::Excel(path) => {
            // A failed workbook write is reported, not fatal; the analysis
            // itself already succeeded.
            let leftover = unattributed_entries(&index, &module_map, kind_filter);
            match excel::export(&report, &leftover, path) {
                Ok(()) => println!(
                    "{} Excel saved to {}",
                    CHECKMARK,
                    style(path.display()).green()
                ),
                Err(e) => eprintln!("{} {}", CROSSMARK, style(e).red()),
            }
        }
    }

    Ok(())
}
