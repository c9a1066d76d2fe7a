//! Build command
//!
//! Configure and build every native extension declared in the
//! manifest, then place the staged artifacts into the package layout.

use anyhow::{Context, Result};
use gantry::{Manifest, Orchestrator, manifest, mode, placement};
use std::path::{Path, PathBuf};

/// Build native extensions and place their artifacts
pub(crate) fn run(
    manifest_path: Option<&Path>,
    build_dir: Option<&Path>,
    cmake_args: &str,
    make_args: &str,
    dest: Option<&Path>,
    ext_suffix: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let manifest_path = manifest::locate_manifest(manifest_path);
    let manifest = Manifest::load(&manifest_path)?;
    let extensions = mode::extension_plans(&manifest)
        .with_context(|| format!("nothing to build in {}", manifest_path.display()))?;

    let project_root = manifest::project_root(&manifest_path);
    let extensions: Vec<_> = extensions
        .into_iter()
        .map(|mut extension_plan| {
            if extension_plan.source_dir.is_relative() {
                extension_plan.source_dir = project_root.join(&extension_plan.source_dir);
            }
            extension_plan
        })
        .collect();

    let build_root = build_dir.map_or_else(
        || PathBuf::from(gantry::DEFAULT_BUILD_DIR),
        Path::to_path_buf,
    );
    let resolver = gantry::resolver_for(ext_suffix);
    let orchestrator = Orchestrator::new(build_root, resolver.as_ref())?
        .configure_args(cmake_args)
        .build_args(make_args)
        .verbose(verbose);

    orchestrator.build_all(&extensions)?;

    let dest_root = dest.map_or(project_root, Path::to_path_buf);
    let report = placement::place_artifacts(&orchestrator.stage_root(), &dest_root)?;
    println!(
        "Placed {} artifact(s) in {}",
        report.count(),
        dest_root.display()
    );

    Ok(())
}
