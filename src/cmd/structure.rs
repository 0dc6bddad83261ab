//! `--show-structure` implementation
//!
//! Lists the archive's `lib/` and `assets/` entry paths and nothing else.
//! The caller exits right after; no report is produced.

use crate::archive::EntryIndex;
use anyhow::Result;
use console::style;
use std::path::Path;

/// Print all entry paths under `lib/`, then all under `assets/`.
pub fn cmd_show_structure(archive_path: &Path) -> Result<()> {
    let index = EntryIndex::load(archive_path)?;
    let paths = index.sorted_paths();

    println!("{}", style("== Files under lib/ ==").bold());
    for path in &paths {
        if path.starts_with("lib/") {
            println!("  {path}");
        }
    }

    println!();
    println!("{}", style("== Files under assets/ ==").bold());
    for path in &paths {
        if path.starts_with("assets/") {
            println!("  {path}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_show_structure_succeeds_on_valid_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.apk");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        writer.start_file("lib/arm64-v8a/libcore.so", options).unwrap();
        writer.write_all(b"elf").unwrap();
        writer.start_file("assets/ads/a.png", options).unwrap();
        writer.write_all(b"png").unwrap();
        writer.finish().unwrap();

        assert!(cmd_show_structure(&path).is_ok());
    }

    #[test]
    fn test_show_structure_propagates_open_failure() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.apk");

        let err = cmd_show_structure(&missing).unwrap_err();
        assert!(err.to_string().contains("Cannot open archive"));
    }
}
