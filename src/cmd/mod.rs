//! Command handlers for the apksize CLI
//!
//! One submodule per observable behavior: the structure listing and the
//! report pipeline. The CLI front end builds a [`ReportConfig`] and hands it
//! over; nothing here parses arguments.

pub mod report;
pub mod structure;

pub use report::cmd_report;
pub use structure::cmd_show_structure;

use crate::export::ExportTarget;
use crate::modules::ModuleKind;
use clap::ValueEnum;
use std::path::PathBuf;

/// `--type` filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeFilter {
    /// Asset modules only (plus the App residual)
    Asset,
    /// Native library modules only (plus the App residual)
    Lib,
    /// Every inferred module
    All,
}

impl TypeFilter {
    /// The module kind this filter keeps, if it keeps only one.
    pub fn kind(self) -> Option<ModuleKind> {
        match self {
            Self::Asset => Some(ModuleKind::Asset),
            Self::Lib => Some(ModuleKind::Library),
            Self::All => None,
        }
    }
}

/// Resolved invocation options, independent of the flag parser
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Path to the .apk or .aab file
    pub archive_path: PathBuf,
    /// List lib/ and assets/ paths instead of producing a report
    pub show_structure: bool,
    /// Print the inferred module mapping before the report
    pub generate_mapping: bool,
    /// Which module kinds to aggregate
    pub type_filter: TypeFilter,
    /// Where the report goes
    pub export_target: ExportTarget,
}
