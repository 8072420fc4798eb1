//! `skia-bundle --list-platforms` command
//!
//! Prints the platform catalog with the resolved download URLs.

use anyhow::Result;

use crate::cli::Cli;
use crate::commands::load_settings;
use skia_bundle::core::platform::{catalog, DEFAULT_VERSION};

pub fn execute(cli: &Cli) -> Result<()> {
    let config = load_settings(cli)?;
    let version = config
        .bundle
        .version
        .as_deref()
        .unwrap_or(DEFAULT_VERSION);

    println!("Platforms for Skia {}:", version);

    for descriptor in catalog() {
        let resolved = descriptor.resolve(version, config.net.mirror.as_deref());

        println!();
        println!("{}", descriptor.id);
        println!("  library: {}", descriptor.lib_name);
        println!("  triples: {}", descriptor.triples.join(", "));
        println!("  url:     {}", resolved.url);
    }

    Ok(())
}
