//! Test fixtures: real ZIP archives built in temporary directories

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Write a ZIP archive with the given members into a fresh temp dir.
///
/// Returns the temp dir (keep it alive) and the archive path.
pub fn create_archive(members: &[(&str, &[u8])]) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("fixture.apk");
    let file = File::create(&path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in members {
        writer.start_file(*name, options)?;
        writer.write_all(content)?;
    }
    writer.finish()?;
    Ok((dir, path))
}

/// An archive shaped like a small real APK: assets, native libs, dex.
pub fn create_typical_apk() -> std::io::Result<(TempDir, PathBuf)> {
    create_archive(&[
        ("AndroidManifest.xml", b"<manifest/>".as_slice()),
        ("classes.dex", &[0u8; 4096]),
        ("assets/ads/banner.png", &[1u8; 2048]),
        ("assets/ads/video.mp4", &[2u8; 8192]),
        ("assets/maps/tiles.bin", &[3u8; 1024]),
        ("lib/arm64-v8a/libcore.so", &[4u8; 16384]),
        ("lib/armeabi-v7a/libcore.so", &[5u8; 12288]),
        ("lib/arm64-v8a/libmedia.so", &[6u8; 6144]),
        ("res/layout/main.xml", b"<layout/>".as_slice()),
    ])
}
