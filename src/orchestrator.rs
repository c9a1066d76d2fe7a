//! Build orchestration
//!
//! Drives the external `CMake` project for each native extension: a
//! configure phase followed by a build phase, strictly in declaration
//! order, with tool output streaming through. The first failing tool
//! aborts the whole run. Partially written build directories are left
//! in place for inspection.

use crate::ext_paths::PathResolver;
use crate::mode::ExtensionPlan;
use crate::process::{ToolCommand, split_args};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `CMake` variable that redirects compiled artifacts into staging
const OUTPUT_DIR_VARIABLE: &str = "CMAKE_LIBRARY_OUTPUT_DIRECTORY";

/// Runs the configure and build phases for native extensions
///
/// One build context per extension: a dedicated temp directory for
/// out-of-tree build files and a staging directory the compiled
/// artifact is redirected into. Contexts are never shared between
/// extensions.
#[derive(Debug)]
pub struct Orchestrator<'a> {
    cmake: PathBuf,
    make: String,
    build_root: PathBuf,
    resolver: &'a dyn PathResolver,
    configure_args: Vec<String>,
    build_args: Vec<String>,
    verbose: bool,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator, discovering the external tools
    ///
    /// The cmake executable comes from `CMAKE` or PATH; the build
    /// phase command comes from `MAKE` and falls back to `make`.
    pub fn new(build_root: PathBuf, resolver: &'a dyn PathResolver) -> Result<Self> {
        let cmake = find_cmake_executable()?;
        let make = crate::env_vars::make_command().unwrap_or_else(|| "make".to_string());
        Ok(Self::with_tools(cmake, make, build_root, resolver))
    }

    /// Create an orchestrator with explicit tool commands
    #[must_use]
    pub fn with_tools(
        cmake: PathBuf,
        make: String,
        build_root: PathBuf,
        resolver: &'a dyn PathResolver,
    ) -> Self {
        Self {
            cmake,
            make,
            build_root,
            resolver,
            configure_args: Vec::new(),
            build_args: Vec::new(),
            verbose: false,
        }
    }

    /// Extra arguments appended verbatim to every configure command
    ///
    /// Takes the raw string form; an empty string means no extras.
    #[must_use]
    pub fn configure_args(mut self, args: &str) -> Self {
        self.configure_args = split_args(args);
        self
    }

    /// Extra arguments appended verbatim to every build command
    #[must_use]
    pub fn build_args(mut self, args: &str) -> Self {
        self.build_args = split_args(args);
        self
    }

    /// Echo composed command lines before running them
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Staging directory compiled artifacts are redirected into
    #[must_use]
    pub fn stage_root(&self) -> PathBuf {
        self.build_root.join("stage")
    }

    /// Configure and build every extension, in the order given
    ///
    /// Stops at the first tool failure; extensions already built keep
    /// their artifacts and build directories.
    pub fn build_all(&self, plans: &[ExtensionPlan]) -> Result<()> {
        for plan in plans {
            self.build_extension(plan)?;
        }
        Ok(())
    }

    /// Run both phases for a single extension
    pub fn build_extension(&self, plan: &ExtensionPlan) -> Result<()> {
        let extension = &plan.extension;
        println!("Building {}", extension.name);

        let build_temp = self.build_root.join("temp").join(&extension.name);
        let extdir = self.resolver.output_dir(&self.stage_root(), extension);

        fs::create_dir_all(&build_temp)
            .with_context(|| format!("failed to create {}", build_temp.display()))?;
        fs::create_dir_all(&extdir)
            .with_context(|| format!("failed to create {}", extdir.display()))?;

        let source_dir = absolute_path(&plan.source_dir)?;
        let extdir = absolute_path(&extdir)?;
        crate::debug!(
            "build temp {} staging into {}",
            build_temp.display(),
            extdir.display()
        );

        self.configure(&build_temp, &source_dir, &extdir)?;
        self.build(&build_temp, extension.target_name())?;

        Ok(())
    }

    /// Configure phase: generate build files, pointing library output
    /// at the staging directory
    fn configure(&self, build_temp: &Path, source_dir: &Path, extdir: &Path) -> Result<()> {
        let command = ToolCommand::new(&self.cmake)
            .arg(source_dir.display().to_string())
            .arg(format!("-D{OUTPUT_DIR_VARIABLE}={}", extdir.display()))
            .args(self.configure_args.iter().cloned())
            .current_dir(build_temp);

        if self.verbose {
            println!("  configure: {}", command.render());
        }
        command.run()
    }

    /// Build phase: compile only the requested target
    fn build(&self, build_temp: &Path, target: &str) -> Result<()> {
        let command = ToolCommand::new(&self.make)
            .arg(target)
            .args(self.build_args.iter().cloned())
            .current_dir(build_temp);

        if self.verbose {
            println!("  build: {}", command.render());
        }
        command.run()
    }
}

/// Locate the cmake executable
///
/// A set `CMAKE` is honored as a file path or a PATH lookup; a value
/// that resolves to neither is an error. With `CMAKE` unset, PATH
/// decides.
fn find_cmake_executable() -> Result<PathBuf> {
    if let Some(cmake) = crate::env_vars::cmake_command() {
        let path = PathBuf::from(&cmake);
        if path.exists() {
            return Ok(path);
        }
        if let Some(resolved) = lookup_on_path(&cmake) {
            return Ok(resolved);
        }
        anyhow::bail!("CMAKE is set to `{cmake}` but no such executable exists");
    }

    if let Some(found) = lookup_on_path("cmake") {
        return Ok(found);
    }

    anyhow::bail!("CMake executable not found. Install CMake from https://cmake.org")
}

/// Resolve a command name through `which`
fn lookup_on_path(program: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(program).output().ok()?;
    output.status.success().then_some(())?;

    let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    path.exists().then_some(path)
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("failed to resolve absolute path for {}", path.display()))
}
