//! Downloading and staging platform archives.
//!
//! Each platform's archive is written to `<staging>/<id>.zip` and the
//! entries under its extraction path are unpacked into `<staging>/<id>/`
//! with that prefix stripped. A failing platform never aborts the others.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::platform::ResolvedPlatform;
use crate::sources::transport::{Transport, TransportError};

/// Error while fetching or staging one platform.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to read archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    fn io(path: &Path, source: io::Error) -> Self {
        FetchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A platform whose archive was downloaded and extracted.
#[derive(Debug, Clone)]
pub struct StagedPlatform {
    pub platform: ResolvedPlatform,

    /// Directory holding the extracted files
    pub dir: PathBuf,

    /// Number of files extracted
    pub files: usize,
}

/// Download and extract a single platform.
pub fn fetch_platform(
    transport: &dyn Transport,
    platform: &ResolvedPlatform,
    staging_root: &Path,
) -> Result<StagedPlatform, FetchError> {
    tracing::info!("Downloading {} from {}", platform.id(), platform.url);

    fs::create_dir_all(staging_root).map_err(|e| FetchError::io(staging_root, e))?;

    let archive_path = staging_root.join(format!("{}.zip", platform.id()));
    download_to(transport, platform, &archive_path)?;

    let dir = staging_root.join(platform.id());
    let files = extract_prefixed(&archive_path, &dir, &platform.extract_path)?;

    if files == 0 {
        tracing::warn!(
            "No entries under `{}` in {}",
            platform.extract_path,
            platform.artifact_name
        );
    }

    tracing::info!("Extracted {} files for {} to {}", files, platform.id(), dir.display());

    Ok(StagedPlatform {
        platform: platform.clone(),
        dir,
        files,
    })
}

/// Fetch every platform in order, one result per platform.
///
/// Failures are logged and returned; they do not stop later platforms.
pub fn fetch_all(
    transport: &dyn Transport,
    platforms: &[ResolvedPlatform],
    staging_root: &Path,
) -> Vec<Result<StagedPlatform, FetchError>> {
    platforms
        .iter()
        .map(|platform| {
            let result = fetch_platform(transport, platform, staging_root);
            if let Err(e) = &result {
                tracing::warn!("Skipping {}: {}", platform.id(), e);
            }
            result
        })
        .collect()
}

fn download_to(
    transport: &dyn Transport,
    platform: &ResolvedPlatform,
    archive_path: &Path,
) -> Result<u64, FetchError> {
    let file = File::create(archive_path).map_err(|e| FetchError::io(archive_path, e))?;
    let mut writer = BufWriter::new(file);

    let written = transport
        .fetch_archive(platform, &mut writer)
        .map_err(|source| FetchError::Download {
            url: platform.url.clone(),
            source,
        })?;

    writer.flush().map_err(|e| FetchError::io(archive_path, e))?;

    tracing::debug!("Downloaded {} bytes to {}", written, archive_path.display());
    Ok(written)
}

/// Extract the entries of a ZIP archive that lie under `prefix`.
///
/// The prefix is stripped from each entry path; the remaining structure is
/// kept. Directory entries are skipped and entries whose path would leave
/// the archive root are skipped with a warning. Existing files are
/// overwritten. Returns the number of files written.
pub fn extract_prefixed(archive_path: &Path, dest: &Path, prefix: &str) -> Result<usize, FetchError> {
    let file = File::open(archive_path).map_err(|e| FetchError::io(archive_path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|source| FetchError::Archive {
            path: archive_path.to_path_buf(),
            source,
        })?;

    fs::create_dir_all(dest).map_err(|e| FetchError::io(dest, e))?;

    let prefix = Path::new(prefix.trim_end_matches('/'));
    let mut extracted = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|source| FetchError::Archive {
            path: archive_path.to_path_buf(),
            source,
        })?;

        if entry.is_dir() {
            continue;
        }

        let entry_path = match entry.enclosed_name() {
            Some(path) => normalize_enclosed(&path),
            None => {
                tracing::warn!("Skipping unsafe archive entry {}", entry.name());
                continue;
            }
        };

        let relative = match entry_path.strip_prefix(prefix) {
            Ok(relative) if relative.as_os_str().is_empty() => continue,
            Ok(relative) => relative.to_path_buf(),
            Err(_) => continue,
        };

        let target = dest.join(&relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }

        let mut out = File::create(&target).map_err(|e| FetchError::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| FetchError::io(&target, e))?;

        tracing::debug!("Extracted {}", relative.display());
        extracted += 1;
    }

    Ok(extracted)
}

/// Fold `.` and `..` out of a path returned by `enclosed_name`.
///
/// Prefix matching then works on whole components, so
/// `out/Release-linux-x64` never matches `out/Release-linux-x64-debug/...`
/// and `out/Release-linux-x64/../x` no longer lies under the prefix.
fn normalize_enclosed(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
