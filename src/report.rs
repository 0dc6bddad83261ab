//! Size aggregation and report model
//!
//! Attributes every archive byte to a module (or the App residual), then
//! assembles the sorted rows, per-kind totals and the overall total into an
//! immutable [`ReportResult`]. All arithmetic is on exact byte counts;
//! megabyte rounding happens only at the export layer.

use crate::archive::{ArchiveEntry, EntryIndex};
use crate::modules::{ModuleKind, ModuleMap};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// One report row: a module's attributed bytes and its complements
///
/// `remaining_*` is the archive total minus this row's own bytes. The delta
/// columns in the exports reuse the own-bytes values; they are not stored
/// separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSizeRow {
    /// Module name, or `App` for the residual row
    pub name: String,
    /// Row classification
    pub kind: ModuleKind,
    /// Compressed bytes attributed to this module
    pub compressed_bytes: u64,
    /// Uncompressed bytes attributed to this module
    pub uncompressed_bytes: u64,
    /// Archive total compressed minus this row's compressed bytes
    pub remaining_compressed: u64,
    /// Archive total uncompressed minus this row's uncompressed bytes
    pub remaining_uncompressed: u64,
}

/// Byte totals for one row kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeTotal {
    /// Kind the totals cover
    pub kind: ModuleKind,
    /// Sum of compressed bytes over rows of this kind
    pub compressed_bytes: u64,
    /// Sum of uncompressed bytes over rows of this kind
    pub uncompressed_bytes: u64,
}

/// Archive-wide byte totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallTotal {
    /// Total compressed bytes
    pub compressed_bytes: u64,
    /// Total uncompressed bytes
    pub uncompressed_bytes: u64,
}

/// The assembled report: rows, per-kind totals, overall total
///
/// Built once per invocation and immutable thereafter. Row order is
/// compressed bytes descending, ties in encounter order; `type_totals`
/// follows the kinds' first appearance among the sorted rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    /// All size rows, App residual included
    pub rows: Vec<ModuleSizeRow>,
    /// Per-kind byte totals
    pub type_totals: Vec<TypeTotal>,
    /// Archive-wide byte totals (equals the sum of `type_totals`)
    pub overall_total: OverallTotal,
}

/// Name of the residual row
pub const APP_ROW_NAME: &str = "App";

fn matches_module(entry: &ArchiveEntry, prefixes: &BTreeSet<String>) -> bool {
    // Plain string prefix on purpose: a prefix `lib/x` also claims
    // `lib/xy`. Inference only emits directory-terminated or full-path
    // prefixes, so this stays unambiguous in practice.
    prefixes.iter().any(|p| entry.path.starts_with(p.as_str()))
}

fn selected_modules<'a>(
    module_map: &'a ModuleMap,
    filter: Option<ModuleKind>,
) -> Vec<(&'a String, ModuleKind, &'a BTreeSet<String>)> {
    module_map
        .modules
        .iter()
        .filter_map(|(name, prefixes)| {
            let kind = module_map.kind_of(name);
            match filter {
                Some(wanted) if kind != wanted => None,
                _ => Some((name, kind, prefixes)),
            }
        })
        .collect()
}

/// Aggregate entry sizes per module and assemble the report.
///
/// `filter` restricts which declared modules get a row; the App residual is
/// always present and absorbs every entry the remaining modules do not
/// claim. Each entry feeds the residual at most once, so the residual never
/// exceeds the archive totals even if overlapping prefixes let two modules
/// claim the same entry.
pub fn aggregate(
    index: &EntryIndex,
    module_map: &ModuleMap,
    filter: Option<ModuleKind>,
) -> ReportResult {
    let total_compressed = index.total_compressed;
    let total_uncompressed = index.total_uncompressed;

    let selected = selected_modules(module_map, filter);

    // One partition pass: each entry goes to every module that claims it,
    // and to the residual exactly when no module does.
    let mut sums = vec![(0u64, 0u64); selected.len()];
    let mut app_compressed: u64 = 0;
    let mut app_uncompressed: u64 = 0;
    for entry in &index.entries {
        let mut claimed = false;
        for (i, (_, _, prefixes)) in selected.iter().enumerate() {
            if matches_module(entry, prefixes) {
                sums[i].0 += entry.compressed_size;
                sums[i].1 += entry.uncompressed_size;
                claimed = true;
            }
        }
        if !claimed {
            app_compressed += entry.compressed_size;
            app_uncompressed += entry.uncompressed_size;
        }
    }

    let mut rows: Vec<ModuleSizeRow> = Vec::with_capacity(selected.len() + 1);
    for ((name, kind, _), (compressed, uncompressed)) in selected.iter().zip(sums) {
        rows.push(ModuleSizeRow {
            name: (*name).clone(),
            kind: *kind,
            compressed_bytes: compressed,
            uncompressed_bytes: uncompressed,
            remaining_compressed: total_compressed - compressed,
            remaining_uncompressed: total_uncompressed - uncompressed,
        });
    }

    rows.push(ModuleSizeRow {
        name: APP_ROW_NAME.to_string(),
        kind: ModuleKind::App,
        compressed_bytes: app_compressed,
        uncompressed_bytes: app_uncompressed,
        remaining_compressed: total_compressed - app_compressed,
        remaining_uncompressed: total_uncompressed - app_uncompressed,
    });

    rows.sort_by(|a, b| b.compressed_bytes.cmp(&a.compressed_bytes));

    let mut type_totals: Vec<TypeTotal> = Vec::new();
    for row in &rows {
        match type_totals.iter_mut().find(|t| t.kind == row.kind) {
            Some(total) => {
                total.compressed_bytes += row.compressed_bytes;
                total.uncompressed_bytes += row.uncompressed_bytes;
            }
            None => type_totals.push(TypeTotal {
                kind: row.kind,
                compressed_bytes: row.compressed_bytes,
                uncompressed_bytes: row.uncompressed_bytes,
            }),
        }
    }

    let overall_total = OverallTotal {
        compressed_bytes: type_totals.iter().map(|t| t.compressed_bytes).sum(),
        uncompressed_bytes: type_totals.iter().map(|t| t.uncompressed_bytes).sum(),
    };

    debug!(
        "aggregated {} rows, {} kinds, {} bytes compressed overall",
        rows.len(),
        type_totals.len(),
        overall_total.compressed_bytes
    );

    ReportResult {
        rows,
        type_totals,
        overall_total,
    }
}

/// Entries not claimed by any aggregated module, sorted by uncompressed
/// size descending.
///
/// Takes the same `filter` as [`aggregate`] and partitions identically, so
/// the returned entries are exactly the ones making up that report's App
/// residual. The Excel exporter lists them on its detail sheet.
pub fn unattributed_entries<'a>(
    index: &'a EntryIndex,
    module_map: &ModuleMap,
    filter: Option<ModuleKind>,
) -> Vec<&'a ArchiveEntry> {
    let selected = selected_modules(module_map, filter);
    let mut entries: Vec<&ArchiveEntry> = index
        .entries
        .iter()
        .filter(|entry| {
            !selected
                .iter()
                .any(|(_, _, prefixes)| matches_module(entry, prefixes))
        })
        .collect();
    entries.sort_by(|a, b| b.uncompressed_size.cmp(&a.uncompressed_size));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveEntry;
    use crate::modules::infer_modules;
    use proptest::prelude::*;

    fn entry(path: &str, compressed: u64, uncompressed: u64) -> ArchiveEntry {
        ArchiveEntry {
            path: path.to_string(),
            compressed_size: compressed,
            uncompressed_size: uncompressed,
        }
    }

    fn spec_scenario_index() -> EntryIndex {
        EntryIndex::from_entries(vec![
            entry("assets/ads/a.png", 100, 200),
            entry("lib/arm64-v8a/libcore.so", 3000, 8000),
            entry("classes.dex", 500, 1200),
        ])
    }

    #[test]
    fn test_three_entry_scenario_matches_expected_numbers() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");

        assert!(map.asset_keys.contains("ads"));
        assert!(map.library_keys.contains("core"));

        let report = aggregate(&index, &map, None);

        assert_eq!(index.total_compressed, 3600);
        assert_eq!(index.total_uncompressed, 9400);

        let app = report.rows.iter().find(|r| r.name == APP_ROW_NAME).unwrap();
        assert_eq!(app.compressed_bytes, 500);
        assert_eq!(app.uncompressed_bytes, 1200);

        let sum: u64 = report.rows.iter().map(|r| r.compressed_bytes).sum();
        assert_eq!(sum, 3600);
    }

    #[test]
    fn test_rows_sum_to_archive_totals_exactly() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        let comp: u64 = report.rows.iter().map(|r| r.compressed_bytes).sum();
        let uncomp: u64 = report.rows.iter().map(|r| r.uncompressed_bytes).sum();
        assert_eq!(comp, index.total_compressed);
        assert_eq!(uncomp, index.total_uncompressed);
        assert_eq!(report.overall_total.compressed_bytes, index.total_compressed);
        assert_eq!(
            report.overall_total.uncompressed_bytes,
            index.total_uncompressed
        );
    }

    #[test]
    fn test_remaining_plus_own_equals_total_for_every_row() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        for row in &report.rows {
            assert_eq!(
                row.remaining_compressed + row.compressed_bytes,
                index.total_compressed,
                "row {}",
                row.name
            );
            assert_eq!(
                row.remaining_uncompressed + row.uncompressed_bytes,
                index.total_uncompressed,
                "row {}",
                row.name
            );
        }
    }

    #[test]
    fn test_rows_sorted_by_compressed_descending() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        for pair in report.rows.windows(2) {
            assert!(pair[0].compressed_bytes >= pair[1].compressed_bytes);
        }
        assert_eq!(report.rows[0].name, "core");
    }

    #[test]
    fn test_sort_is_stable_for_equal_sizes() {
        let index = EntryIndex::from_entries(vec![
            entry("assets/alpha/a.bin", 100, 100),
            entry("assets/beta/b.bin", 100, 100),
            entry("assets/gamma/c.bin", 100, 100),
        ]);
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        // Modules aggregate in name order; equal sizes must keep it.
        let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma", APP_ROW_NAME]);
    }

    #[test]
    fn test_asset_filter_keeps_asset_rows_and_app_only() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, Some(ModuleKind::Asset));

        assert!(report
            .rows
            .iter()
            .all(|r| matches!(r.kind, ModuleKind::Asset | ModuleKind::App)));
        // Filtered-out library bytes flow into the residual.
        let app = report.rows.iter().find(|r| r.name == APP_ROW_NAME).unwrap();
        assert_eq!(app.compressed_bytes, 3500);
        let sum: u64 = report.rows.iter().map(|r| r.compressed_bytes).sum();
        assert_eq!(sum, index.total_compressed);
    }

    #[test]
    fn test_library_filter_keeps_library_rows_and_app_only() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, Some(ModuleKind::Library));

        assert!(report
            .rows
            .iter()
            .all(|r| matches!(r.kind, ModuleKind::Library | ModuleKind::App)));
        let app = report.rows.iter().find(|r| r.name == APP_ROW_NAME).unwrap();
        assert_eq!(app.compressed_bytes, 600);
    }

    #[test]
    fn test_empty_archive_yields_zero_app_row_without_failure() {
        let index = EntryIndex::from_entries(vec![]);
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        assert_eq!(report.rows.len(), 1);
        let app = &report.rows[0];
        assert_eq!(app.name, APP_ROW_NAME);
        assert_eq!(app.compressed_bytes, 0);
        assert_eq!(app.uncompressed_bytes, 0);
        assert_eq!(report.overall_total.compressed_bytes, 0);
    }

    #[test]
    fn test_prefix_match_is_plain_string_prefix() {
        // `lib/x` would claim `lib/xy` too; inference emits full library
        // paths so byte attribution keys on the exact file here.
        let index = EntryIndex::from_entries(vec![
            entry("lib/arm64-v8a/libx.so", 10, 20),
            entry("lib/arm64-v8a/libxy.so", 1, 2),
        ]);
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        let x = report.rows.iter().find(|r| r.name == "x").unwrap();
        let xy = report.rows.iter().find(|r| r.name == "xy").unwrap();
        assert_eq!(x.compressed_bytes, 10);
        assert_eq!(xy.compressed_bytes, 1);
    }

    #[test]
    fn test_entry_claimed_by_two_modules_feeds_residual_once() {
        // `libx.sooner.so` string-prefix-matches module x's full-path
        // prefix `lib/arm64-v8a/libx.so` as well as its own module's.
        // Both module rows count it, the residual must not go negative.
        let index = EntryIndex::from_entries(vec![
            entry("lib/arm64-v8a/libx.so", 10, 20),
            entry("lib/arm64-v8a/libx.sooner.so", 5, 8),
        ]);
        let map = infer_modules(index.sorted_paths(), "");
        assert!(map.library_keys.contains("x"));
        assert!(map.library_keys.contains("x.sooner"));

        let report = aggregate(&index, &map, None);

        let x = report.rows.iter().find(|r| r.name == "x").unwrap();
        let sooner = report.rows.iter().find(|r| r.name == "x.sooner").unwrap();
        let app = report.rows.iter().find(|r| r.name == APP_ROW_NAME).unwrap();
        assert_eq!(x.compressed_bytes, 15);
        assert_eq!(x.uncompressed_bytes, 28);
        assert_eq!(sooner.compressed_bytes, 5);
        assert_eq!(app.compressed_bytes, 0);
        assert_eq!(app.uncompressed_bytes, 0);

        // The doubly-claimed entry is still attributed, not residual.
        assert!(unattributed_entries(&index, &map, None).is_empty());
    }

    #[test]
    fn test_type_totals_follow_first_encountered_kind_order() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");
        let report = aggregate(&index, &map, None);

        // Sorted rows: core (3000), App (500), ads (100).
        let kinds: Vec<ModuleKind> = report.type_totals.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![ModuleKind::Library, ModuleKind::App, ModuleKind::Asset]
        );

        let lib = &report.type_totals[0];
        assert_eq!(lib.compressed_bytes, 3000);
        assert_eq!(lib.uncompressed_bytes, 8000);
    }

    #[test]
    fn test_unattributed_entries_sorted_by_uncompressed_descending() {
        let index = EntryIndex::from_entries(vec![
            entry("classes.dex", 500, 1200),
            entry("assets/ads/a.png", 100, 200),
            entry("res/layout/main.xml", 50, 3000),
            entry("META-INF/MANIFEST.MF", 10, 40),
        ]);
        let map = infer_modules(index.sorted_paths(), "");

        let leftover = unattributed_entries(&index, &map, None);
        let paths: Vec<&str> = leftover.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["res/layout/main.xml", "classes.dex", "META-INF/MANIFEST.MF"]
        );
    }

    #[test]
    fn test_unattributed_entries_respect_the_kind_filter() {
        let index = spec_scenario_index();
        let map = infer_modules(index.sorted_paths(), "");

        // With only asset modules aggregated, library entries join the
        // residual and must show up as unattributed.
        let leftover = unattributed_entries(&index, &map, Some(ModuleKind::Asset));
        let paths: Vec<&str> = leftover.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"lib/arm64-v8a/libcore.so"));
        assert!(paths.contains(&"classes.dex"));
        assert!(!paths.contains(&"assets/ads/a.png"));

        let report = aggregate(&index, &map, Some(ModuleKind::Asset));
        let app = report.rows.iter().find(|r| r.name == APP_ROW_NAME).unwrap();
        let leftover_comp: u64 = leftover.iter().map(|e| e.compressed_size).sum();
        assert_eq!(app.compressed_bytes, leftover_comp);
    }

    proptest! {
        #[test]
        fn prop_rows_always_sum_to_archive_totals(
            entries in prop::collection::vec(
                (
                    prop_oneof![
                        "assets/[a-d]/[a-z]{1,8}\\.bin",
                        "lib/arm64-v8a/lib[a-d]\\.so",
                        "[a-z]{1,10}\\.dex",
                        "res/[a-z]{1,6}\\.xml",
                    ],
                    0u64..5_000_000,
                    0u64..20_000_000,
                ),
                0..40,
            )
        ) {
            let index = EntryIndex::from_entries(
                entries
                    .into_iter()
                    .map(|(path, c, u)| entry(&path, c, u))
                    .collect(),
            );
            let map = infer_modules(index.sorted_paths(), "");
            let report = aggregate(&index, &map, None);

            let comp: u64 = report.rows.iter().map(|r| r.compressed_bytes).sum();
            let uncomp: u64 = report.rows.iter().map(|r| r.uncompressed_bytes).sum();
            prop_assert_eq!(comp, index.total_compressed);
            prop_assert_eq!(uncomp, index.total_uncompressed);

            for row in &report.rows {
                prop_assert_eq!(
                    row.remaining_compressed + row.compressed_bytes,
                    index.total_compressed
                );
            }
        }

        #[test]
        fn prop_residual_never_exceeds_totals_with_overlapping_prefixes(
            entries in prop::collection::vec(
                (
                    // Library names sharing stems, so one file's path can
                    // prefix-match another module's full-path prefix.
                    "lib/arm64-v8a/lib[ab](\\.so)?[a-z]{0,4}\\.so",
                    0u64..5_000_000,
                    0u64..20_000_000,
                ),
                0..20,
            )
        ) {
            let index = EntryIndex::from_entries(
                entries
                    .into_iter()
                    .map(|(path, c, u)| entry(&path, c, u))
                    .collect(),
            );
            let map = infer_modules(index.sorted_paths(), "");
            let report = aggregate(&index, &map, None);

            let app = report
                .rows
                .iter()
                .find(|r| r.name == APP_ROW_NAME)
                .expect("residual row always present");
            prop_assert!(app.compressed_bytes <= index.total_compressed);
            prop_assert!(app.uncompressed_bytes <= index.total_uncompressed);

            // Residual equals the single-counted unattributed partition.
            let leftover = unattributed_entries(&index, &map, None);
            let leftover_comp: u64 = leftover.iter().map(|e| e.compressed_size).sum();
            prop_assert_eq!(app.compressed_bytes, leftover_comp);
        }
    }
}
