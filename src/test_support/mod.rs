//! Test utilities and mocks for unit tests.
//!
//! Provides a mock transport that serves archives from memory and records
//! every requested URL, plus archive fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use skia_bundle::test_support::{release_archive, MockTransport};
//!
//! let mut transport = MockTransport::new();
//! transport.add_archive(&platform.url, release_archive(&platform, &[("libskia.a", b"")]));
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

pub use fixtures::*;

use crate::core::platform::ResolvedPlatform;
use crate::sources::transport::{Transport, TransportError};

/// Mock response for a single URL.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Create a successful response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        MockResponse {
            status: 200,
            body: body.into(),
        }
    }

    /// Create a not found response.
    pub fn not_found() -> Self {
        MockResponse {
            status: 404,
            body: b"Not Found".to_vec(),
        }
    }

    /// Check if this is a successful response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport serving canned responses keyed by URL.
///
/// Unmatched URLs answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, MockResponse>,
    requests: RefCell<Vec<String>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Serve `archive` for `url`.
    pub fn add_archive(&mut self, url: &str, archive: Vec<u8>) -> &mut Self {
        self.mock_url(url, MockResponse::ok(archive))
    }

    /// Add a response for a URL.
    pub fn mock_url(&mut self, url: &str, response: MockResponse) -> &mut Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Get all requested URLs, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn fetch_archive(
        &self,
        platform: &ResolvedPlatform,
        dest: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        self.requests.borrow_mut().push(platform.url.clone());

        let response = self
            .responses
            .get(&platform.url)
            .cloned()
            .unwrap_or_else(MockResponse::not_found);

        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
            });
        }

        dest.write_all(&response.body)?;
        Ok(response.body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::find;

    #[test]
    fn test_mock_transport_records_requests() {
        let platform = find("linux-x64").unwrap().resolve("m1", None);
        let mut transport = MockTransport::new();
        transport.add_archive(&platform.url, b"zip".to_vec());

        let mut buf = Vec::new();
        assert_eq!(transport.fetch_archive(&platform, &mut buf).unwrap(), 3);
        assert_eq!(buf, b"zip");
        assert_eq!(transport.requests(), [platform.url.clone()]);
    }

    #[test]
    fn test_mock_transport_unmatched_is_404() {
        let platform = find("linux-x64").unwrap().resolve("m1", None);
        let transport = MockTransport::new();

        let err = transport.fetch_archive(&platform, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404 }));
    }

    #[test]
    fn test_release_archive_layout() {
        let platform = find("windows-x64").unwrap().resolve("m1", None);
        let bytes = release_archive(&platform, &[("skia.lib", b"skia")]);

        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_string).collect();
        assert!(names.contains(&"out/Release-windows-x64/skia.lib".to_string()));
    }
}
