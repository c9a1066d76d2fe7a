//! Artifact placement
//!
//! Second stage of the build pipeline. Compiled artifacts land in a
//! staging tree during the build; placement then copies them into the
//! final package layout. Keeping the stages separate means a build
//! can be inspected before anything touches the destination.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of one placement pass
#[derive(Debug, Clone, Default)]
pub struct PlacementReport {
    /// Files copied, relative to the destination root
    pub placed: Vec<PathBuf>,

    /// Total bytes copied
    pub bytes: u64,
}

impl PlacementReport {
    /// Number of files placed
    #[must_use]
    pub fn count(&self) -> usize {
        self.placed.len()
    }
}

/// Copy every staged file below `stage_root` into `dest_root`
///
/// Directory structure is preserved. Existing destination files are
/// overwritten; nothing in the destination is deleted. A missing or
/// empty staging tree yields an empty report.
pub fn place_artifacts(stage_root: &Path, dest_root: &Path) -> Result<PlacementReport> {
    let mut report = PlacementReport::default();

    if !stage_root.exists() {
        return Ok(report);
    }

    for entry in WalkDir::new(stage_root).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!("failed to walk staging directory {}", stage_root.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(stage_root).with_context(|| {
            format!("staged file {} outside staging root", entry.path().display())
        })?;
        let destination = dest_root.join(relative);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let copied = fs::copy(entry.path(), &destination).with_context(|| {
            format!(
                "failed to copy {} to {}",
                entry.path().display(),
                destination.display()
            )
        })?;

        report.placed.push(relative.to_path_buf());
        report.bytes += copied;
    }

    Ok(report)
}
