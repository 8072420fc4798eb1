//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell as CompletionShell;

use skia_bundle::util::shell::ColorChoice;

/// Build a Skia artifact bundle from prebuilt release archives
#[derive(Parser)]
#[command(name = "skia-bundle")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Skia release tag to bundle [default: m126-6bfb13368b]
    #[arg(long, value_name = "TAG")]
    pub version: Option<String>,

    /// Output directory for the bundle [default: skia.artifactbundle]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also create skia-<version>.artifactbundle.zip next to the bundle
    #[arg(long)]
    pub zip: bool,

    /// Only include these platforms (repeatable)
    #[arg(short, long = "platform", value_name = "ID")]
    pub platforms: Vec<String>,

    /// Base URL replacing each platform's release repository
    #[arg(long, value_name = "URL")]
    pub mirror: Option<String>,

    /// Read release archives from this directory instead of downloading
    #[arg(long, value_name = "DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Keep downloaded and extracted archives in this directory
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// List the supported platforms and exit
    #[arg(long)]
    pub list_platforms: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_platforms() {
        let cli = Cli::parse_from([
            "skia-bundle",
            "-p",
            "linux-x64",
            "--platform",
            "windows-x64",
            "--version",
            "m1",
        ]);
        assert_eq!(cli.platforms, ["linux-x64", "windows-x64"]);
        assert_eq!(cli.version.as_deref(), Some("m1"));
        assert_eq!(cli.color, ColorChoice::Auto);
    }
}
