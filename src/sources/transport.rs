//! Archive transports.
//!
//! A transport retrieves one platform's release archive. The HTTP transport
//! is the normal path; the local transport reads archives that were
//! downloaded ahead of time into a single directory.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::core::platform::ResolvedPlatform;
use crate::util::shell::Shell;

/// Error while retrieving an archive.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("archive not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Retrieves release archives.
pub trait Transport {
    /// Write the archive for `platform` into `dest`, returning the byte count.
    fn fetch_archive(
        &self,
        platform: &ResolvedPlatform,
        dest: &mut dyn Write,
    ) -> Result<u64, TransportError>;
}

/// Blocking HTTP(S) transport.
///
/// One GET per archive, no retries, transport-default timeouts.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    shell: Option<Arc<Shell>>,
}

impl HttpTransport {
    /// Create a transport with an optional custom user agent.
    pub fn new(user_agent: Option<&str>) -> Result<Self, TransportError> {
        let user_agent = user_agent
            .map(str::to_string)
            .unwrap_or_else(default_user_agent);

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(HttpTransport {
            client,
            shell: None,
        })
    }

    /// Report download progress through the given shell.
    pub fn with_progress(mut self, shell: Arc<Shell>) -> Self {
        self.shell = Some(shell);
        self
    }
}

impl Transport for HttpTransport {
    fn fetch_archive(
        &self,
        platform: &ResolvedPlatform,
        dest: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        let mut response = self.client.get(&platform.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let written = match &self.shell {
            Some(shell) => {
                let total = response.content_length().unwrap_or(0);
                let mut progress = shell.bytes_progress(platform.id(), total);
                let written = response.copy_to(&mut progress.wrap_write(dest))?;
                progress.finish();
                written
            }
            None => response.copy_to(dest)?,
        };

        Ok(written)
    }
}

/// Reads archives from a directory of pre-downloaded release files.
///
/// Archives are looked up by their release artifact name.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    dir: PathBuf,
}

impl LocalTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalTransport { dir: dir.into() }
    }
}

impl Transport for LocalTransport {
    fn fetch_archive(
        &self,
        platform: &ResolvedPlatform,
        dest: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        let path = self.dir.join(&platform.artifact_name);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TransportError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(io::copy(&mut file, dest)?)
    }
}

fn default_user_agent() -> String {
    format!("skia-bundle/{}", env!("CARGO_PKG_VERSION"))
}
