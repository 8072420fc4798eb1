//! Default command: assemble the artifact bundle.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::commands::load_settings;
use skia_bundle::ops::{
    build_bundle, BundleError, BundleOptions, BundleReport, HeaderOutcome, DEFAULT_OUTPUT,
};
use skia_bundle::sources::{HttpTransport, LocalTransport};
use skia_bundle::util::shell::{format_size, Shell, Status};
use skia_bundle::DEFAULT_VERSION;

pub fn execute(cli: &Cli, shell: Arc<Shell>) -> Result<()> {
    let config = load_settings(cli)?;

    let opts = BundleOptions::new(
        config
            .bundle
            .output
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT.into()),
    )
    .with_version(
        config
            .bundle
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
    )
    .with_platforms(config.bundle.platforms.clone())
    .with_mirror(config.net.mirror.clone())
    .with_staging_dir(config.bundle.staging_dir.clone())
    .with_zip(config.bundle.zip);

    let platforms = opts.resolve_platforms()?;
    shell.status(
        Status::Bundling,
        format!("skia {} for {} platform(s)", opts.version, platforms.len()),
    );

    let result = match &config.net.archive_dir {
        Some(dir) => {
            shell.status(Status::Fetching, format!("archives from {}", dir.display()));
            build_bundle(&opts, &LocalTransport::new(dir))
        }
        None => {
            let transport = HttpTransport::new(config.net.user_agent.as_deref())?
                .with_progress(Arc::clone(&shell));
            build_bundle(&opts, &transport)
        }
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if let Some(BundleError::NoPlatformsStaged { failures }) =
                e.downcast_ref::<BundleError>()
            {
                for failure in failures {
                    shell.error(format!("{}: {}", failure.platform, failure.error));
                }
            }
            return Err(e);
        }
    };

    print_summary(&shell, &report);

    if let Some(dir) = &opts.staging_dir {
        shell.note(format!("staged archives kept in {}", dir.display()));
    }

    Ok(())
}

fn print_summary(shell: &Shell, report: &BundleReport) {
    for failure in &report.failures {
        shell.status(
            Status::Skipped,
            format!("{}: {}", failure.platform, failure.error),
        );
    }

    if report.headers == HeaderOutcome::Placeholder {
        shell.warn("no headers found in the downloaded packages; wrote a placeholder skia.h");
    }

    shell.status(
        Status::Finished,
        format!(
            "{} ({} artifacts, {} of {} platforms)",
            report.bundle_dir.display(),
            report.manifest.artifacts.len(),
            report.staged.len(),
            report.staged.len() + report.failures.len()
        ),
    );

    match &report.archive {
        Some(archive) => {
            shell.status(
                Status::Packaged,
                format!("{} ({})", archive.path.display(), format_size(archive.size)),
            );
        }
        None => {
            if shell.is_quiet() {
                return;
            }
            println!("Bundle contents:");
            for file in &report.files {
                println!("  {}", file.display());
            }
        }
    }
}
