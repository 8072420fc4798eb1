//! The platform catalog.
//!
//! Every platform the bundle can carry is described here: where its release
//! archives live, how the archive is named, which library file is expected
//! and which architecture triples a consumer may match the variant against.

use std::fmt;

/// Default Skia release tag.
pub const DEFAULT_VERSION: &str = "m126-6bfb13368b";

const JETBRAINS_REPO: &str = "https://github.com/JetBrains/skia-pack";
const SHAFTUI_REPO: &str = "https://github.com/ShaftUI/skia-pack";

/// Operating system family of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    MacOs,
    Linux,
    Windows,
}

impl Os {
    /// The tag used in release artifact names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::MacOs => "macos",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }

    /// File extension of static libraries on this OS.
    pub fn library_extension(&self) -> &'static str {
        match self {
            Os::Windows => "lib",
            Os::MacOs | Os::Linux => "a",
        }
    }

    /// Whether this OS follows Windows library naming conventions.
    pub fn is_windows(&self) -> bool {
        matches!(self, Os::Windows)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a supported platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    /// Platform identifier, also the bundle subdirectory name
    pub id: &'static str,

    /// Repository hosting the release archives
    pub repository: &'static str,

    /// OS tag
    pub os: Os,

    /// Architecture tag as used in the archive name
    pub arch: &'static str,

    /// Expected primary library filename
    pub lib_name: &'static str,

    /// Architecture triples this platform's variants support
    pub triples: &'static [&'static str],
}

static CATALOG: [PlatformDescriptor; 4] = [
    PlatformDescriptor {
        id: "macos-universal",
        repository: JETBRAINS_REPO,
        os: Os::MacOs,
        // The arm64 archive ships a universal binary
        arch: "arm64",
        lib_name: "libskia.a",
        triples: &["x86_64-apple-macosx", "arm64-apple-macosx"],
    },
    PlatformDescriptor {
        id: "linux-x64",
        repository: SHAFTUI_REPO,
        os: Os::Linux,
        arch: "x64",
        lib_name: "libskia.a",
        triples: &["x86_64-unknown-linux-gnu"],
    },
    PlatformDescriptor {
        id: "linux-aarch64",
        repository: SHAFTUI_REPO,
        os: Os::Linux,
        arch: "arm64",
        lib_name: "libskia.a",
        triples: &["aarch64-unknown-linux-gnu"],
    },
    PlatformDescriptor {
        id: "windows-x64",
        repository: SHAFTUI_REPO,
        os: Os::Windows,
        arch: "x64",
        lib_name: "skia.lib",
        triples: &["x86_64-unknown-windows-msvc"],
    },
];

/// All supported platforms, in canonical order.
pub fn catalog() -> &'static [PlatformDescriptor] {
    &CATALOG
}

/// Look up a platform by identifier.
pub fn find(id: &str) -> Option<&'static PlatformDescriptor> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Position of a platform in the canonical catalog order.
pub fn catalog_index(id: &str) -> Option<usize> {
    CATALOG.iter().position(|p| p.id == id)
}

impl PlatformDescriptor {
    /// Archive filename for the given version.
    pub fn artifact_name(&self, version: &str) -> String {
        format!("Skia-{}-{}-Release-{}.zip", version, self.os, self.arch)
    }

    /// Directory inside the archive holding this platform's build output.
    pub fn extract_path(&self) -> String {
        format!("out/Release-{}-{}", self.os, self.arch)
    }

    /// Resolve the download location for a version.
    ///
    /// A `mirror` replaces the platform's repository base.
    pub fn resolve(&'static self, version: &str, mirror: Option<&str>) -> ResolvedPlatform {
        let base = mirror.unwrap_or(self.repository).trim_end_matches('/');
        let artifact_name = self.artifact_name(version);
        let url = format!("{}/releases/download/{}/{}", base, version, artifact_name);

        ResolvedPlatform {
            descriptor: self,
            url,
            artifact_name,
            extract_path: self.extract_path(),
        }
    }
}

/// A platform with its download location resolved for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlatform {
    pub descriptor: &'static PlatformDescriptor,
    pub url: String,
    pub artifact_name: String,
    pub extract_path: String,
}

impl ResolvedPlatform {
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    pub fn os(&self) -> Os {
        self.descriptor.os
    }

    pub fn triples(&self) -> &'static [&'static str] {
        self.descriptor.triples
    }
}

/// Resolve every catalog platform for a version.
pub fn resolve(version: &str, mirror: Option<&str>) -> Vec<ResolvedPlatform> {
    CATALOG
        .iter()
        .map(|p| p.resolve(version, mirror))
        .collect()
}
