//! Manifest loading
//!
//! `gantry.toml` declares the package metadata plus everything the
//! project can produce: native extensions compiled by `CMake`, a bundled
//! application, or both. Which of the two an invocation acts on is
//! chosen by the subcommand, never inferred from the manifest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default manifest filename searched for in the working directory
pub const MANIFEST_FILE: &str = "gantry.toml";

/// Errors from manifest parsing and validation
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest file at the resolved path
    #[error("manifest not found at {path}")]
    NotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// The file exists but is not a valid manifest
    #[error("invalid manifest: {0}")]
    Invalid(String),

    /// `package.name` is missing or blank
    #[error("package name must not be empty")]
    EmptyName,

    /// An extension name is not a dotted identifier path
    #[error("extension name `{name}` is not a valid dotted module path")]
    BadExtensionName {
        /// Offending name as written in the manifest
        name: String,
    },

    /// Neither packaging section declared
    #[error("manifest declares neither an [[extension]] nor a [bundle] section")]
    MissingMode,

    /// A bundle console command without a launcher, or vice versa
    #[error("bundle `command` and `launcher` must be set together")]
    PartialConsoleEntry,

    /// A launcher entry point that is not `module:function`
    #[error("bundle launcher `{launcher}` is not a module:function entry point")]
    BadLauncher {
        /// Offending launcher as written in the manifest
        launcher: String,
    },
}

/// Parsed `gantry.toml`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Manifest {
    /// Package metadata shared by every mode
    pub package: PackageMeta,

    /// Native extension declarations (extension mode)
    #[serde(default, rename = "extension", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionDecl>,

    /// Bundled application declaration (bundle mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleDecl>,
}

/// The `[package]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageMeta {
    /// Distribution name
    pub name: String,

    /// Version string, e.g. `0.1.0`
    pub version: String,

    /// Importable packages shipped with the distribution
    #[serde(default)]
    pub packages: Vec<String>,
}

/// One `[[extension]]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionDecl {
    /// Dotted module path of the compiled extension
    pub name: String,

    /// `CMake` source directory, relative to the manifest
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

/// The `[bundle]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BundleDecl {
    /// Script executed when the bundled app starts
    pub entry_script: String,

    /// Console command name installed alongside the app
    #[serde(default)]
    pub command: Option<String>,

    /// Entry point the console command resolves to, `module:function`
    #[serde(default)]
    pub launcher: Option<String>,

    /// Icon file for the app
    #[serde(default)]
    pub icon: Option<PathBuf>,

    /// Packages embedded in the bundle (defaults to `package.packages`)
    #[serde(default)]
    pub include: Vec<String>,

    /// Packages excluded from dependency collection
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Human-facing application name (defaults to the package name)
    #[serde(default)]
    pub display_name: Option<String>,

    /// Forward open events from the desktop shell as arguments
    #[serde(default)]
    pub argv_emulation: bool,
}

impl Manifest {
    /// Load and validate a manifest
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: Self =
            toml::from_str(&contents).map_err(|err| ManifestError::Invalid(err.to_string()))?;
        manifest.validate()?;

        crate::debug!(
            "loaded manifest {} ({} v{})",
            path.display(),
            manifest.package.name,
            manifest.package.version
        );
        Ok(manifest)
    }

    /// Check that the declared sections are internally consistent
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.package.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }

        if self.extensions.is_empty() && self.bundle.is_none() {
            return Err(ManifestError::MissingMode);
        }

        for extension in &self.extensions {
            if !is_valid_module_path(&extension.name) {
                return Err(ManifestError::BadExtensionName {
                    name: extension.name.clone(),
                });
            }
        }

        if let Some(bundle) = &self.bundle {
            if bundle.command.is_some() != bundle.launcher.is_some() {
                return Err(ManifestError::PartialConsoleEntry);
            }

            if let Some(launcher) = &bundle.launcher
                && !is_valid_launcher(launcher)
            {
                return Err(ManifestError::BadLauncher {
                    launcher: launcher.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Resolve the manifest path from an optional explicit override
///
/// Falls back to `gantry.toml` in the current directory.
#[must_use]
pub fn locate_manifest(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(MANIFEST_FILE), Path::to_path_buf)
}

/// Directory containing the manifest, used as the default placement
/// destination
#[must_use]
pub fn project_root(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Check that a launcher names a callable as `module:function`
fn is_valid_launcher(launcher: &str) -> bool {
    launcher
        .split_once(':')
        .is_some_and(|(module, function)| {
            is_valid_module_path(module) && is_valid_module_path(function)
        })
}

/// Check that a dotted module path has only identifier segments
fn is_valid_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
