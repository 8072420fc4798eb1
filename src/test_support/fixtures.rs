//! Test fixtures for release archives.
//!
//! Builds in-memory ZIP archives shaped like the upstream Skia release
//! artifacts, and staging directories as the fetcher would leave them.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::platform::ResolvedPlatform;

/// Build a ZIP archive from `(name, contents)` pairs.
///
/// Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        if name.ends_with('/') {
            zip.add_directory(name.trim_end_matches('/'), options)
                .expect("failed to add directory entry");
        } else {
            zip.start_file(*name, options)
                .expect("failed to start file entry");
            zip.write_all(contents).expect("failed to write file entry");
        }
    }

    zip.finish().expect("failed to finish archive").into_inner()
}

/// Build a release archive for `platform` with files under its extraction path.
pub fn release_archive(platform: &ResolvedPlatform, files: &[(&str, &[u8])]) -> Vec<u8> {
    let root = format!("{}/", platform.extract_path);
    let mut entries: Vec<(String, &[u8])> = vec![(root.clone(), b"")];
    entries.extend(
        files
            .iter()
            .map(|(name, contents)| (format!("{}{}", root, name), *contents)),
    );

    let borrowed: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(name, contents)| (name.as_str(), *contents))
        .collect();
    zip_bytes(&borrowed)
}

/// The files a typical Skia release ships for `platform`.
pub fn skia_release_files(platform: &ResolvedPlatform) -> Vec<(&'static str, &'static [u8])> {
    let mut files: Vec<(&'static str, &'static [u8])> = vec![
        ("include/core/SkTypes.h", b"// SkTypes"),
        ("include/core/SkCanvas.h", b"// SkCanvas"),
        ("icudtl.dat", b"icu data"),
    ];

    if platform.os().is_windows() {
        files.push(("skia.lib", b"skia"));
        files.push(("libsvg.lib", b"svg"));
    } else {
        files.push(("libskia.a", b"skia"));
        files.push(("libsvg.a", b"svg"));
    }

    files
}

/// Populate a staging directory as if `platform` had been extracted into it.
pub fn stage_files(dir: &Path, files: &[(&str, &[u8])]) {
    fs::create_dir_all(dir).expect("failed to create staging dir");
    for (name, contents) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write staged file");
    }
}
