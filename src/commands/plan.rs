//! Plan command
//!
//! Print the resolved packaging plan without building anything.

use anyhow::{Context, Result};
use gantry::{Manifest, Mode, manifest, resolve_plan};
use std::path::Path;

/// Resolve the manifest and print the packaging plan as JSON
pub(crate) fn run(manifest_path: Option<&Path>, mode: Mode) -> Result<()> {
    let manifest_path = manifest::locate_manifest(manifest_path);
    let manifest = Manifest::load(&manifest_path)?;
    let plan = resolve_plan(&manifest, mode)?;

    let rendered =
        serde_json::to_string_pretty(&plan).context("failed to serialize packaging plan")?;
    println!("{rendered}");

    Ok(())
}
