//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.skia-bundle/config.toml` - User-wide defaults
//! - Project: `.skia-bundle/config.toml` - Overrides for the current directory
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration directory name, both global and per project.
pub const CONFIG_DIR: &str = ".skia-bundle";

/// Configuration filename inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Bundler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bundle settings
    pub bundle: BundleConfig,

    /// Network settings
    pub net: NetConfig,
}

/// Bundle-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Skia release tag to bundle
    pub version: Option<String>,

    /// Output directory for the bundle
    pub output: Option<PathBuf>,

    /// Always produce a ZIP archive of the bundle
    pub zip: bool,

    /// Restrict the bundle to these platform identifiers
    pub platforms: Vec<String>,

    /// Persistent staging directory (default: a temporary directory per run)
    pub staging_dir: Option<PathBuf>,
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Base URL replacing each platform's release repository
    pub mirror: Option<String>,

    /// Read archives from this directory instead of downloading
    pub archive_dir: Option<PathBuf>,

    /// User agent for HTTP requests
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.bundle.version.is_some() {
            self.bundle.version = other.bundle.version;
        }
        if other.bundle.output.is_some() {
            self.bundle.output = other.bundle.output;
        }
        if other.bundle.zip {
            self.bundle.zip = true;
        }
        if !other.bundle.platforms.is_empty() {
            self.bundle.platforms = other.bundle.platforms;
        }
        if other.bundle.staging_dir.is_some() {
            self.bundle.staging_dir = other.bundle.staging_dir;
        }

        if other.net.mirror.is_some() {
            self.net.mirror = other.net.mirror;
        }
        if other.net.archive_dir.is_some() {
            self.net.archive_dir = other.net.archive_dir;
        }
        if other.net.user_agent.is_some() {
            self.net.user_agent = other.net.user_agent;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.skia-bundle/config.toml)
/// 2. Global config (~/.skia-bundle/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));
    config
}

/// Get the global config directory (~/.skia-bundle).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.skia-bundle/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the project config path (.skia-bundle/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
[bundle]
version = "m125-abc"
output = "dist/skia.artifactbundle"
zip = true
platforms = ["linux-x64", "windows-x64"]

[net]
mirror = "https://mirror.example.com/skia"
"#,
        )
        .unwrap();

        assert_eq!(config.bundle.version.as_deref(), Some("m125-abc"));
        assert_eq!(
            config.bundle.output,
            Some(PathBuf::from("dist/skia.artifactbundle"))
        );
        assert!(config.bundle.zip);
        assert_eq!(config.bundle.platforms, ["linux-x64", "windows-x64"]);
        assert_eq!(
            config.net.mirror.as_deref(),
            Some("https://mirror.example.com/skia")
        );
        assert!(config.net.archive_dir.is_none());
    }

    #[test]
    fn test_merge_precedence() {
        let mut global = Config::default();
        global.bundle.version = Some("m120".to_string());
        global.net.user_agent = Some("global-agent".to_string());

        let mut project = Config::default();
        project.bundle.version = Some("m126".to_string());

        global.merge(project);
        assert_eq!(global.bundle.version.as_deref(), Some("m126"));
        assert_eq!(global.net.user_agent.as_deref(), Some("global-agent"));
    }

    #[test]
    fn test_load_config_layers_files() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global").join(CONFIG_FILE);
        let project_path = project_config_path(&tmp.path().join("project"));

        let mut global = Config::default();
        global.bundle.zip = true;
        global.bundle.version = Some("m120".to_string());
        global.save(&global_path).unwrap();

        let mut project = Config::default();
        project.bundle.version = Some("m126".to_string());
        project.save(&project_path).unwrap();

        let config = load_config(Some(&global_path), &project_path);
        assert!(config.bundle.zip);
        assert_eq!(config.bundle.version.as_deref(), Some("m126"));
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[bundle\nversion = ").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
