//! skia-bundle - Builds a cross-platform Skia artifact bundle
//!
//! Downloads prebuilt Skia release archives for every supported platform,
//! gathers their static libraries and public headers into a single bundle
//! directory and describes it with an `info.json` manifest that a package
//! manager can resolve by architecture triple.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory transport and archive fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::BundleManifest,
    platform::{PlatformDescriptor, ResolvedPlatform, DEFAULT_VERSION},
};
pub use ops::{build_bundle, BundleOptions, BundleReport};
pub use sources::{HttpTransport, LocalTransport, Transport};
