//! High-level operations.
//!
//! This module contains the steps that assemble a bundle and the
//! orchestration that runs them in order.

pub mod bundle;
pub mod collect;
pub mod headers;
pub mod package;

pub use bundle::{
    build_bundle, BundleError, BundleOptions, BundleReport, PlatformFailure, DEFAULT_OUTPUT,
};
pub use collect::{collect_all, collect_platform, find_libraries};
pub use headers::{assemble_headers, write_module_map, HeaderOutcome};
pub use package::{archive_name, create_zip, PackageSummary};
