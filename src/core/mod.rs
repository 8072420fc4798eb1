//! Core data structures.
//!
//! This module contains the foundational types of a bundle:
//! - The platform catalog and resolved download locations
//! - Collected library records and their naming rules
//! - The `info.json` manifest document

pub mod library;
pub mod manifest;
pub mod platform;

pub use library::{LibraryEntry, PlatformLibraries};
pub use manifest::{Artifact, ArtifactType, BundleManifest, StaticLibraryMetadata, Variant};
pub use platform::{catalog, find, Os, PlatformDescriptor, ResolvedPlatform, DEFAULT_VERSION};
