//! Command implementations

pub mod bundle;
pub mod completions;
pub mod platforms;

use anyhow::{Context, Result};

use crate::cli::Cli;
use skia_bundle::util::config::{
    global_config_path, load_config, project_config_path, BundleConfig, Config, NetConfig,
};

/// Effective settings: command-line flags over project config over global config.
pub fn load_settings(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = global_config_path();
    let mut config = load_config(global.as_deref(), &project_config_path(&cwd));

    config.merge(Config {
        bundle: BundleConfig {
            version: cli.version.clone(),
            output: cli.output.clone(),
            zip: cli.zip,
            platforms: cli.platforms.clone(),
            staging_dir: cli.staging_dir.clone(),
        },
        net: NetConfig {
            mirror: cli.mirror.clone(),
            archive_dir: cli.archive_dir.clone(),
            user_agent: None,
        },
    });

    Ok(config)
}
