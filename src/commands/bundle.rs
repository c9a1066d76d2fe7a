//! Bundle command
//!
//! Assemble the app configuration for a bundled application. No
//! external build tools run in this mode.

use anyhow::{Context, Result};
use gantry::{Manifest, manifest, mode};
use std::path::{Path, PathBuf};

/// Write the bundled application configuration
pub(crate) fn run(
    manifest_path: Option<&Path>,
    build_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let manifest_path = manifest::locate_manifest(manifest_path);
    let manifest = Manifest::load(&manifest_path)?;
    let bundle = mode::bundle_spec(&manifest)
        .with_context(|| format!("nothing to bundle in {}", manifest_path.display()))?;

    let out_dir = output.map_or_else(
        || {
            build_dir
                .map_or_else(
                    || PathBuf::from(gantry::DEFAULT_BUILD_DIR),
                    Path::to_path_buf,
                )
                .join("bundle")
        },
        Path::to_path_buf,
    );

    let path = gantry::write_app_config(&manifest.package, &bundle, &out_dir)?;
    println!("Wrote app configuration to {}", path.display());

    Ok(())
}
