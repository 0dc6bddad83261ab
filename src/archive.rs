//! Archive entry index
//!
//! Loads the member list of an APK/AAB (ZIP container) once, keeping only
//! per-entry metadata: path, compressed size, uncompressed size. File
//! contents are never decompressed.

use crate::error::ApkSizeError;
use log::debug;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// One file record inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry path, `/`-separated, no leading separator
    pub path: String,
    /// Stored (compressed) size in bytes
    pub compressed_size: u64,
    /// Size after decompression in bytes
    pub uncompressed_size: u64,
}

/// In-memory index of every archive entry, with exact archive-wide totals
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    /// All entries in central-directory order
    pub entries: Vec<ArchiveEntry>,
    /// Sum of compressed sizes over all entries
    pub total_compressed: u64,
    /// Sum of uncompressed sizes over all entries
    pub total_uncompressed: u64,
}

impl EntryIndex {
    /// Load the entry index from an archive file.
    ///
    /// Reads only the central directory; entry contents stay untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApkSizeError::ArchiveOpen`] if the file cannot be opened and
    /// [`ApkSizeError::ArchiveRead`] if it is not a readable ZIP archive.
    pub fn load(path: &Path) -> Result<Self, ApkSizeError> {
        let file = File::open(path).map_err(|source| ApkSizeError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut archive =
            zip::ZipArchive::new(file).map_err(|source| ApkSizeError::ArchiveRead {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = Vec::with_capacity(archive.len());
        let mut total_compressed: u64 = 0;
        let mut total_uncompressed: u64 = 0;

        for i in 0..archive.len() {
            let member =
                archive
                    .by_index_raw(i)
                    .map_err(|source| ApkSizeError::ArchiveRead {
                        path: path.to_path_buf(),
                        source,
                    })?;

            total_compressed += member.compressed_size();
            total_uncompressed += member.size();
            entries.push(ArchiveEntry {
                path: member.name().to_string(),
                compressed_size: member.compressed_size(),
                uncompressed_size: member.size(),
            });
        }

        debug!(
            "loaded {} entries from {} ({} bytes compressed, {} uncompressed)",
            entries.len(),
            path.display(),
            total_compressed,
            total_uncompressed
        );

        Ok(Self {
            entries,
            total_compressed,
            total_uncompressed,
        })
    }

    /// Build an index from pre-existing entries, computing exact totals.
    ///
    /// Used by tests and by callers that obtain entry metadata elsewhere.
    pub fn from_entries(entries: Vec<ArchiveEntry>) -> Self {
        let total_compressed = entries.iter().map(|e| e.compressed_size).sum();
        let total_uncompressed = entries.iter().map(|e| e.uncompressed_size).sum();
        Self {
            entries,
            total_compressed,
            total_uncompressed,
        }
    }

    /// Deduplicated, sorted list of all entry paths.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.entries.iter().map(|e| e.path.as_str()).collect();
        set.into_iter().collect()
    }
}
