//! Packaging the bundle directory into a ZIP archive.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::util::fs::list_files;

/// Result of packaging a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    /// Path of the written archive
    pub path: PathBuf,

    /// Archive size in bytes
    pub size: u64,

    /// Number of files stored
    pub files: usize,
}

/// Archive filename for a bundle version.
pub fn archive_name(version: &str) -> String {
    format!("skia-{}.artifactbundle.zip", version)
}

/// Zip every file in `bundle_dir` into `<parent>/skia-<version>.artifactbundle.zip`.
///
/// Entries are stored under a top-level directory named after the bundle
/// directory. A partially written archive is left in place on failure.
pub fn create_zip(bundle_dir: &Path, version: &str) -> Result<PackageSummary> {
    let bundle_dir = bundle_dir
        .canonicalize()
        .with_context(|| format!("bundle directory not found: {}", bundle_dir.display()))?;

    let Some(root_name) = bundle_dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        bail!("bundle directory has no name: {}", bundle_dir.display());
    };
    let parent = bundle_dir.parent().unwrap_or(&bundle_dir);
    let zip_path = parent.join(archive_name(version));

    tracing::info!("Creating ZIP file: {}", zip_path.display());

    let files = list_files(&bundle_dir)?;

    let file = File::create(&zip_path)
        .with_context(|| format!("failed to create archive: {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for relative in &files {
        let entry_name = archive_entry_name(&root_name, relative);
        let source = bundle_dir.join(relative);

        zip.start_file(entry_name.as_str(), options)
            .with_context(|| format!("failed to add {} to archive", entry_name))?;

        let mut input = File::open(&source)
            .with_context(|| format!("failed to open {}", source.display()))?;
        io::copy(&mut input, &mut zip)
            .with_context(|| format!("failed to write {} to archive", entry_name))?;
    }

    let writer = zip
        .finish()
        .with_context(|| format!("failed to finish archive: {}", zip_path.display()))?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("failed to flush archive: {}", zip_path.display()))?;

    let size = std::fs::metadata(&zip_path)
        .with_context(|| format!("failed to stat archive: {}", zip_path.display()))?
        .len();

    tracing::info!("ZIP file created: {} ({} bytes)", zip_path.display(), size);

    Ok(PackageSummary {
        path: zip_path,
        size,
        files: files.len(),
    })
}

fn archive_entry_name(root: &str, relative: &Path) -> String {
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("{}/{}", root, parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("m126-6bfb13368b"), "skia-m126-6bfb13368b.artifactbundle.zip");
    }

    #[test]
    fn test_archive_entry_name() {
        assert_eq!(
            archive_entry_name("skia.artifactbundle", Path::new("include/core/SkTypes.h")),
            "skia.artifactbundle/include/core/SkTypes.h"
        );
    }

    #[test]
    fn test_create_zip_preserves_layout() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("skia.artifactbundle");
        fs::create_dir_all(bundle.join("linux-x64")).unwrap();
        fs::create_dir_all(bundle.join("include/core")).unwrap();
        fs::write(bundle.join("info.json"), "{}").unwrap();
        fs::write(bundle.join("linux-x64/libskia.a"), "skia").unwrap();
        fs::write(bundle.join("include/core/SkTypes.h"), "types").unwrap();

        let summary = create_zip(&bundle, "m1").unwrap();

        assert_eq!(summary.files, 3);
        assert_eq!(
            summary.path.file_name().unwrap(),
            "skia-m1.artifactbundle.zip"
        );
        assert_eq!(summary.size, fs::metadata(&summary.path).unwrap().len());

        let mut archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            [
                "skia.artifactbundle/include/core/SkTypes.h",
                "skia.artifactbundle/info.json",
                "skia.artifactbundle/linux-x64/libskia.a",
            ]
        );

        let mut contents = String::new();
        io::Read::read_to_string(
            &mut archive.by_name("skia.artifactbundle/linux-x64/libskia.a").unwrap(),
            &mut contents,
        )
        .unwrap();
        assert_eq!(contents, "skia");
    }

    #[test]
    fn test_create_zip_missing_bundle_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(create_zip(&tmp.path().join("missing"), "m1").is_err());
    }
}
