//! Public headers and the module map.
//!
//! Headers are taken from one staged platform (they are identical across
//! platforms) and an umbrella `skia.h` is written over them. The include
//! list is fixed; nothing checks that the listed headers exist.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{INCLUDE_DIR, MODULE_MAP_NAME};
use crate::core::platform::catalog_index;
use crate::sources::StagedPlatform;
use crate::util::fs::{copy_dir_all, ensure_dir, write_string};

/// Umbrella header filename inside the include directory.
pub const UMBRELLA_HEADER_NAME: &str = "skia.h";

/// Marker present in the placeholder header.
pub const PLACEHOLDER_NOTE: &str = "Headers were not found in the downloaded packages";

const UMBRELLA_HEADER: &str = r#"// Skia umbrella header
#pragma once

// Core Skia headers
#include "core/SkTypes.h"
#include "core/SkCanvas.h"
#include "core/SkPaint.h"
#include "core/SkPath.h"
#include "core/SkSurface.h"
#include "core/SkImage.h"
#include "core/SkData.h"
#include "core/SkString.h"
#include "core/SkMatrix.h"
#include "core/SkRect.h"
#include "core/SkPoint.h"
#include "core/SkSize.h"
#include "core/SkColor.h"
#include "core/SkColorSpace.h"
#include "core/SkImageInfo.h"
#include "core/SkPixmap.h"
#include "core/SkRefCnt.h"
#include "core/SkShader.h"
#include "core/SkBlendMode.h"
#include "core/SkColorType.h"
#include "core/SkPicture.h"

// GPU headers (optional)
#ifdef SK_GANESH
#include "gpu/GrDirectContext.h"
#endif

// Effects and utilities
#include "effects/SkGradientShader.h"

// SVG support
#ifdef SK_SVG
#include "svg/SkSVGCanvas.h"
#endif
"#;

const MODULE_MAP: &str = r#"module skia {
    header "include/skia.h"
    link "skia"
    export *
}"#;

/// What ended up in the bundle's include directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// Headers were copied from a staged platform.
    Copied {
        platform: &'static str,
        headers: usize,
    },
    /// No platform had headers; a placeholder umbrella header was written.
    Placeholder,
}

/// Placeholder umbrella header for when no headers were found.
pub fn placeholder_header(version: &str) -> String {
    format!(
        "// Skia minimal header - Version {version}\n\
         #pragma once\n\
         \n\
         // Include core Skia functionality\n\
         // Note: {PLACEHOLDER_NOTE}\n\
         // You may need to include specific Skia headers manually\n"
    )
}

/// Write `module.modulemap` at the bundle root.
pub fn write_module_map(bundle_dir: &Path) -> Result<PathBuf> {
    let path = bundle_dir.join(MODULE_MAP_NAME);
    write_string(&path, MODULE_MAP)?;
    tracing::info!("Created {}", path.display());
    Ok(path)
}

/// Copy headers from the first staged platform (in catalog order) that has
/// an `include/` directory, then write the umbrella header.
///
/// Falls back to a placeholder umbrella header when no platform has headers.
pub fn assemble_headers(
    staged: &[StagedPlatform],
    bundle_dir: &Path,
    version: &str,
) -> Result<HeaderOutcome> {
    let include_dir = bundle_dir.join(INCLUDE_DIR);
    ensure_dir(&include_dir)?;

    let umbrella_path = include_dir.join(UMBRELLA_HEADER_NAME);

    let Some(source) = header_source(staged) else {
        write_string(&umbrella_path, &placeholder_header(version))?;
        tracing::warn!(
            "Created minimal header {} (no headers found in packages)",
            umbrella_path.display()
        );
        return Ok(HeaderOutcome::Placeholder);
    };

    let source_include = source.dir.join(INCLUDE_DIR);
    tracing::info!("Copying headers from {}", source_include.display());
    let headers = copy_dir_all(&source_include, &include_dir)?;
    tracing::info!("Copied {} header files", headers);

    write_string(&umbrella_path, UMBRELLA_HEADER)?;
    tracing::info!("Created umbrella header {}", umbrella_path.display());

    Ok(HeaderOutcome::Copied {
        platform: source.platform.id(),
        headers,
    })
}

fn header_source(staged: &[StagedPlatform]) -> Option<&StagedPlatform> {
    let mut ordered: Vec<&StagedPlatform> = staged.iter().collect();
    ordered.sort_by_key(|s| catalog_index(s.platform.id()).unwrap_or(usize::MAX));

    ordered
        .into_iter()
        .find(|s| s.dir.join(INCLUDE_DIR).is_dir())
}
