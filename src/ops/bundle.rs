//! Artifact bundle assembly.
//!
//! Runs the whole pipeline once: resolve platforms, fetch and stage each
//! archive, then write the module map, headers, libraries and manifest into
//! the bundle directory and optionally zip it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use thiserror::Error;

use crate::core::library::PlatformLibraries;
use crate::core::manifest::{BundleManifest, MANIFEST_NAME};
use crate::core::platform::{self, ResolvedPlatform, DEFAULT_VERSION};
use crate::ops::collect::collect_all;
use crate::ops::headers::{assemble_headers, write_module_map, HeaderOutcome};
use crate::ops::package::{create_zip, PackageSummary};
use crate::sources::{fetch_all, FetchError, StagedPlatform, Transport};
use crate::util::fs::{ensure_dir, list_files};

/// Default bundle output directory.
pub const DEFAULT_OUTPUT: &str = "skia.artifactbundle";

/// Fatal bundle errors.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no platforms were successfully downloaded")]
    NoPlatformsStaged { failures: Vec<PlatformFailure> },

    #[error("unknown platform `{id}` (known platforms: {known})")]
    UnknownPlatform { id: String, known: String },
}

/// A platform that could not be fetched or staged.
#[derive(Debug)]
pub struct PlatformFailure {
    pub platform: &'static str,
    pub error: FetchError,
}

/// Options for assembling a bundle.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Skia release tag
    pub version: String,

    /// Output directory for the bundle
    pub output_dir: PathBuf,

    /// Platform identifiers to include (empty = all)
    pub platforms: Vec<String>,

    /// Base URL replacing each platform's repository
    pub mirror: Option<String>,

    /// Persistent staging directory; a temporary one is used when unset
    pub staging_dir: Option<PathBuf>,

    /// Create a ZIP archive of the bundle
    pub create_zip: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        BundleOptions {
            version: DEFAULT_VERSION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT),
            platforms: Vec::new(),
            mirror: None,
            staging_dir: None,
            create_zip: false,
        }
    }
}

impl BundleOptions {
    /// Create new bundle options with the given output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        BundleOptions {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_mirror(mut self, mirror: Option<String>) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_staging_dir(mut self, staging_dir: Option<PathBuf>) -> Self {
        self.staging_dir = staging_dir;
        self
    }

    pub fn with_zip(mut self, create_zip: bool) -> Self {
        self.create_zip = create_zip;
        self
    }

    /// Resolve the selected platforms in catalog order.
    pub fn resolve_platforms(&self) -> Result<Vec<ResolvedPlatform>, BundleError> {
        for id in &self.platforms {
            if platform::find(id).is_none() {
                return Err(BundleError::UnknownPlatform {
                    id: id.clone(),
                    known: platform::catalog()
                        .iter()
                        .map(|p| p.id)
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        }

        Ok(platform::catalog()
            .iter()
            .filter(|p| self.platforms.is_empty() || self.platforms.iter().any(|id| id == p.id))
            .map(|p| p.resolve(&self.version, self.mirror.as_deref()))
            .collect())
    }
}

/// Result of assembling a bundle.
#[derive(Debug)]
pub struct BundleReport {
    pub bundle_dir: PathBuf,

    /// Platforms that were staged and bundled, in catalog order
    pub staged: Vec<&'static str>,

    pub failures: Vec<PlatformFailure>,

    /// Libraries collected per platform
    pub libraries: Vec<PlatformLibraries>,

    pub manifest: BundleManifest,

    pub headers: HeaderOutcome,

    /// Files in the bundle directory, relative to it
    pub files: Vec<PathBuf>,

    pub archive: Option<PackageSummary>,
}

/// Per-run staging root.
///
/// A temporary root is removed when dropped; a user-supplied one is kept.
#[derive(Debug)]
enum StagingRoot {
    Temporary(TempDir),
    Persistent(PathBuf),
}

impl StagingRoot {
    fn create(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => {
                ensure_dir(dir)?;
                Ok(StagingRoot::Persistent(dir.to_path_buf()))
            }
            None => {
                let tmp = tempfile::Builder::new()
                    .prefix("skia-bundle-")
                    .tempdir()
                    .context("failed to create staging directory")?;
                Ok(StagingRoot::Temporary(tmp))
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            StagingRoot::Temporary(tmp) => tmp.path(),
            StagingRoot::Persistent(dir) => dir,
        }
    }
}

/// Assemble the artifact bundle.
///
/// Platforms that fail to fetch are skipped. When none succeed nothing is
/// written to the bundle directory and [`BundleError::NoPlatformsStaged`]
/// is returned.
pub fn build_bundle(opts: &BundleOptions, transport: &dyn Transport) -> Result<BundleReport> {
    let platforms = opts.resolve_platforms()?;

    tracing::info!("Building Skia artifact bundle version {}", opts.version);

    let staging = StagingRoot::create(opts.staging_dir.as_deref())?;
    tracing::debug!("Staging directory: {}", staging.path().display());

    let (staged, failures) = partition_results(&platforms, fetch_all(transport, &platforms, staging.path()));

    if staged.is_empty() {
        return Err(BundleError::NoPlatformsStaged { failures }.into());
    }

    let bundle_dir = &opts.output_dir;
    ensure_dir(bundle_dir)?;
    tracing::info!("Output bundle: {}", bundle_dir.display());

    write_module_map(bundle_dir)?;
    let headers = assemble_headers(&staged, bundle_dir, &opts.version)?;
    let libraries = collect_all(&staged, bundle_dir)?;

    let manifest = BundleManifest::build(&opts.version, &libraries);
    manifest.save(&bundle_dir.join(MANIFEST_NAME))?;

    let archive = if opts.create_zip {
        Some(create_zip(bundle_dir, &opts.version)?)
    } else {
        None
    };

    let files = list_files(bundle_dir)?;

    Ok(BundleReport {
        bundle_dir: bundle_dir.clone(),
        staged: staged.iter().map(|s| s.platform.id()).collect(),
        failures,
        libraries,
        manifest,
        headers,
        files,
        archive,
    })
}

fn partition_results(
    platforms: &[ResolvedPlatform],
    results: Vec<Result<StagedPlatform, FetchError>>,
) -> (Vec<StagedPlatform>, Vec<PlatformFailure>) {
    let mut staged = Vec::new();
    let mut failures = Vec::new();

    for (platform, result) in platforms.iter().zip(results) {
        match result {
            Ok(s) => staged.push(s),
            Err(error) => failures.push(PlatformFailure {
                platform: platform.id(),
                error,
            }),
        }
    }

    (staged, failures)
}
