//! skia-bundle CLI - Builds a cross-platform Skia artifact bundle

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use skia_bundle::util::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.quiet {
        EnvFilter::new("skia_bundle=warn")
    } else if cli.verbose {
        EnvFilter::new("skia_bundle=debug")
    } else {
        EnvFilter::new("skia_bundle=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Arc::new(Shell::from_flags(cli.quiet, cli.verbose, cli.color));

    // Execute command
    if let Some(shell_kind) = cli.completions {
        return commands::completions::execute(shell_kind);
    }

    if cli.list_platforms {
        return commands::platforms::execute(&cli);
    }

    commands::bundle::execute(&cli, shell)
}
