#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! apksize library
//!
//! Computes a size breakdown of an Android application package (.apk/.aab)
//! by attributing compressed and uncompressed bytes to modules inferred from
//! entry paths: one module per top-level `assets/` directory, one per native
//! library under `lib/<abi>/`. Everything unattributed lands in the App
//! residual row, so the rows always sum to the archive totals exactly.
//!
//! # Basic Example
//!
//! Aggregating a report from entry metadata:
//!
//! ```
//! use apksize::archive::{ArchiveEntry, EntryIndex};
//! use apksize::modules::infer_modules;
//! use apksize::report::aggregate;
//!
//! let index = EntryIndex::from_entries(vec![
//!     ArchiveEntry {
//!         path: "assets/ads/banner.png".to_string(),
//!         compressed_size: 100,
//!         uncompressed_size: 200,
//!     },
//!     ArchiveEntry {
//!         path: "classes.dex".to_string(),
//!         compressed_size: 500,
//!         uncompressed_size: 1200,
//!     },
//! ]);
//!
//! let modules = infer_modules(index.sorted_paths(), "");
//! let report = aggregate(&index, &modules, None);
//!
//! let total: u64 = report.rows.iter().map(|r| r.compressed_bytes).sum();
//! assert_eq!(total, index.total_compressed);
//! ```
//!
//! # Rendering
//!
//! ```
//! use apksize::archive::EntryIndex;
//! use apksize::export::markdown;
//! use apksize::modules::infer_modules;
//! use apksize::report::aggregate;
//!
//! let index = EntryIndex::from_entries(vec![]);
//! let modules = infer_modules(index.sorted_paths(), "");
//! let report = aggregate(&index, &modules, None);
//!
//! let rendered = markdown::render(&report);
//! assert!(rendered.contains("App"));
//! ```

/// Archive entry index loaded from a ZIP container
pub mod archive;
/// Command handlers for CLI operations
pub mod cmd;
/// Error types with contextual suggestions
pub mod error;
/// Export sinks: Markdown, CSV, Excel
pub mod export;
/// Shared formatting utilities
pub mod fmt;
/// Module inference from entry paths
pub mod modules;
/// Size aggregation and report model
pub mod report;
