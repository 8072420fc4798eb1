//! Library collection.
//!
//! Scans each staged platform for static libraries, copies them into the
//! platform's bundle directory under their normalized names and records a
//! [`LibraryEntry`] for each.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::core::library::{is_ignored, LibraryEntry, PlatformLibraries};
use crate::core::platform::Os;
use crate::sources::StagedPlatform;
use crate::util::fs::ensure_dir;

/// Find library files under a staging directory, sorted by path.
pub fn find_libraries(staging_dir: &Path, os: Os) -> Vec<PathBuf> {
    let extension = os.library_extension();

    let mut found: Vec<PathBuf> = WalkDir::new(staging_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Failed to scan {}: {}", staging_dir.display(), err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .filter(|e| !is_ignored(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();

    found.sort();
    found
}

/// Copy one staged platform's libraries into `<bundle_dir>/<platform-id>/`.
///
/// A file that fails to copy is logged and left out; the rest continue.
pub fn collect_platform(staged: &StagedPlatform, bundle_dir: &Path) -> Result<PlatformLibraries> {
    let platform = &staged.platform;
    let target_dir = bundle_dir.join(platform.id());
    ensure_dir(&target_dir)?;

    let mut libraries: Vec<LibraryEntry> = Vec::new();

    for source in find_libraries(&staged.dir, platform.os()) {
        let Some(original) = source.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        let entry = LibraryEntry::from_file_name(&original, platform.os());

        if libraries.iter().any(|lib| lib.file_name == entry.file_name) {
            tracing::warn!(
                "Skipping {}: {} already collected for {}",
                source.display(),
                entry.file_name,
                platform.id()
            );
            continue;
        }

        let target = target_dir.join(&entry.file_name);
        if let Err(e) = fs::copy(&source, &target) {
            tracing::warn!(
                "Failed to copy {} to {}: {}",
                source.display(),
                target.display(),
                e
            );
            continue;
        }

        tracing::debug!("Copied {} to {}", source.display(), target.display());
        libraries.push(entry);
    }

    let collected = PlatformLibraries {
        platform: platform.clone(),
        libraries,
    };

    if collected.main_library().is_none() {
        tracing::warn!(
            "No main library found for {} (expected {})",
            platform.id(),
            platform.descriptor.lib_name
        );
    }

    tracing::info!(
        "Copied {} libraries for {}",
        collected.libraries.len(),
        platform.id()
    );

    Ok(collected)
}

/// Collect libraries for every staged platform, preserving order.
pub fn collect_all(staged: &[StagedPlatform], bundle_dir: &Path) -> Result<Vec<PlatformLibraries>> {
    staged
        .iter()
        .map(|s| collect_platform(s, bundle_dir))
        .collect()
}
