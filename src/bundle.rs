//! Bundled application assembly
//!
//! Bundle mode packages a pure-Python application: an entry script,
//! an optional console command, icon, and package lists. No external
//! build tools run in this mode; the output is a declarative app
//! configuration consumed by the downstream bundling tool.

use crate::manifest::{BundleDecl, PackageMeta};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the generated app configuration
pub const APP_CONFIG_FILE: &str = "app.json";

/// Complete description of a bundled application
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BundleSpec {
    /// Script executed when the app starts
    pub entry_script: String,

    /// Console command exposed by the package, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_entry: Option<ConsoleEntry>,

    /// Icon file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    /// Packages embedded in the bundle
    #[serde(default)]
    pub include: Vec<String>,

    /// Packages excluded from dependency collection
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Name shown to users
    pub display_name: String,

    /// Forward open events from the desktop shell as arguments
    #[serde(default)]
    pub argv_emulation: bool,
}

/// Mapping from a console command to its entry point
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleEntry {
    /// Command name installed on PATH
    pub command: String,

    /// Entry point in `module:function` form
    pub launcher: String,
}

/// App configuration document written for the bundling tool
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct AppConfig<'a> {
    name: &'a str,
    version: &'a str,
    #[serde(flatten)]
    bundle: &'a BundleSpec,
}

impl BundleSpec {
    /// Assemble a bundle spec from manifest declarations
    ///
    /// The display name falls back to the package name, and the
    /// include list falls back to the package list. A console entry
    /// exists only when both `command` and `launcher` are declared.
    #[must_use]
    pub fn from_manifest(meta: &PackageMeta, decl: &BundleDecl) -> Self {
        let console_entry = match (&decl.command, &decl.launcher) {
            (Some(command), Some(launcher)) => Some(ConsoleEntry {
                command: command.clone(),
                launcher: launcher.clone(),
            }),
            _ => None,
        };

        let include = if decl.include.is_empty() {
            meta.packages.clone()
        } else {
            decl.include.clone()
        };

        Self {
            entry_script: decl.entry_script.clone(),
            console_entry,
            icon: decl.icon.clone(),
            include,
            exclude: decl.exclude.clone(),
            display_name: decl
                .display_name
                .clone()
                .unwrap_or_else(|| meta.name.clone()),
            argv_emulation: decl.argv_emulation,
        }
    }
}

/// Write the app configuration below `out_dir`
///
/// Creates `out_dir` if needed and returns the path of the written
/// file.
pub fn write_app_config(meta: &PackageMeta, spec: &BundleSpec, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let config = AppConfig {
        name: &meta.name,
        version: &meta.version,
        bundle: spec,
    };
    let rendered =
        serde_json::to_string_pretty(&config).context("failed to serialize app configuration")?;

    let path = out_dir.join(APP_CONFIG_FILE);
    fs::write(&path, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}
