//! The artifact bundle manifest (`info.json`).
//!
//! One artifact per distinct library name. Each artifact lists a variant for
//! every platform that shipped the library; only the main library's variants
//! carry header and module map metadata.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::library::PlatformLibraries;
use crate::core::platform;

/// Manifest filename inside the bundle.
pub const MANIFEST_NAME: &str = "info.json";

/// Schema version written to every manifest.
pub const SCHEMA_VERSION: &str = "1.0";

/// Header directory name inside the bundle.
pub const INCLUDE_DIR: &str = "include";

/// Module map filename inside the bundle.
pub const MODULE_MAP_NAME: &str = "module.modulemap";

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleManifest {
    pub schema_version: String,

    /// Artifacts keyed by display name; sorted by construction
    pub artifacts: BTreeMap<String, Artifact>,
}

/// Kind of artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactType {
    StaticLibrary,
}

/// A named library with its per-platform variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub version: String,

    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,

    pub variants: Vec<Variant>,
}

/// One platform-specific instance of a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Path relative to the bundle root
    pub path: String,

    pub supported_triples: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_library_metadata: Option<StaticLibraryMetadata>,
}

/// Header and module map locations for the main library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticLibraryMetadata {
    pub header_paths: Vec<String>,
    pub module_map_path: String,
}

impl Default for StaticLibraryMetadata {
    fn default() -> Self {
        StaticLibraryMetadata {
            header_paths: vec![INCLUDE_DIR.to_string()],
            module_map_path: MODULE_MAP_NAME.to_string(),
        }
    }
}

impl BundleManifest {
    /// Aggregate collected libraries into a manifest.
    ///
    /// Artifact names come out sorted; variants follow catalog platform order
    /// regardless of the order `collected` is given in.
    pub fn build(version: &str, collected: &[PlatformLibraries]) -> BundleManifest {
        let mut ordered: Vec<&PlatformLibraries> = collected.iter().collect();
        ordered.sort_by_key(|p| catalog_position(p.platform.id()));

        let names: BTreeSet<&str> = collected
            .iter()
            .flat_map(|p| p.libraries.iter().map(|lib| lib.display_name.as_str()))
            .collect();

        let mut artifacts = BTreeMap::new();

        for name in names {
            let variants: Vec<Variant> = ordered
                .iter()
                .filter_map(|p| {
                    let lib = p.libraries.iter().find(|lib| lib.display_name == name)?;
                    Some(Variant {
                        path: format!("{}/{}", p.platform.id(), lib.file_name),
                        supported_triples: p
                            .platform
                            .triples()
                            .iter()
                            .map(|t| t.to_string())
                            .collect(),
                        static_library_metadata: lib
                            .is_main
                            .then(StaticLibraryMetadata::default),
                    })
                })
                .collect();

            if variants.is_empty() {
                continue;
            }

            artifacts.insert(
                name.to_string(),
                Artifact {
                    version: version.to_string(),
                    artifact_type: ArtifactType::StaticLibrary,
                    variants,
                },
            );
        }

        BundleManifest {
            schema_version: SCHEMA_VERSION.to_string(),
            artifacts,
        }
    }

    /// Serialize with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .context("failed to serialize bundle manifest")?;

        String::from_utf8(buf).context("bundle manifest is not valid UTF-8")
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Write the manifest to a file, replacing any existing one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest: {}", path.display()))?;

        tracing::info!(
            "Created {} with {} library artifacts",
            path.display(),
            self.artifacts.len()
        );
        Ok(())
    }
}

fn catalog_position(id: &str) -> usize {
    platform::catalog_index(id).unwrap_or(usize::MAX)
}
