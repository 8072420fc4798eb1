//! Archive sources.
//!
//! Sources retrieve release archives (over HTTP or from a local directory)
//! and stage their contents for bundling.

pub mod fetch;
pub mod transport;

pub use fetch::{extract_prefixed, fetch_all, fetch_platform, FetchError, StagedPlatform};
pub use transport::{HttpTransport, LocalTransport, Transport, TransportError};
