//! Packaging mode selection
//!
//! The mode for an invocation is an explicit input. Resolution is a
//! pure function of the requested mode and the manifest contents;
//! nothing here touches the filesystem or spawns tools, and the
//! choice is final for the invocation.

use crate::bundle::BundleSpec;
use crate::extension::NativeExtension;
use crate::manifest::{ExtensionDecl, Manifest, PackageMeta};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// The packaging mode requested for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compile the declared native extensions
    Extension,

    /// Assemble the bundled application configuration
    Bundle,
}

/// Errors from requesting a mode the manifest does not declare
#[derive(Debug, Clone, Copy, Error)]
pub enum PlanError {
    /// Extension mode without any `[[extension]]` sections
    #[error("manifest declares no [[extension]] section")]
    MissingExtensions,

    /// Bundle mode without a `[bundle]` section
    #[error("manifest declares no [bundle] section")]
    MissingBundle,
}

/// A fully resolved packaging plan for one manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackagingPlan {
    /// Package metadata shared by every mode
    #[serde(flatten)]
    pub meta: PackageMeta,

    /// Mode-specific plan
    #[serde(flatten)]
    pub kind: PlanKind,
}

/// The two packaging modes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "mode")]
pub enum PlanKind {
    /// Compile native extensions through the external build system
    #[serde(rename = "extension")]
    Extensions {
        /// Extensions to configure and build, in declaration order
        extensions: Vec<ExtensionPlan>,
    },

    /// Assemble a bundled application; no build tools run
    #[serde(rename = "bundle")]
    Bundle {
        /// Bundle description
        bundle: Box<BundleSpec>,
    },
}

/// One extension together with the `CMake` project that builds it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionPlan {
    /// Extension descriptor
    #[serde(flatten)]
    pub extension: NativeExtension,

    /// `CMake` source directory
    pub source_dir: PathBuf,
}

impl ExtensionPlan {
    fn from_decl(decl: &ExtensionDecl) -> Self {
        Self {
            extension: NativeExtension::new(decl.name.clone()),
            source_dir: decl.source_dir.clone(),
        }
    }
}

impl PackagingPlan {
    /// Human-readable mode name
    #[must_use]
    pub const fn mode_name(&self) -> &'static str {
        match self.kind {
            PlanKind::Extensions { .. } => "extension",
            PlanKind::Bundle { .. } => "bundle",
        }
    }
}

/// Resolve a manifest into the packaging plan for the requested mode
///
/// Fails only when the manifest does not declare the sections the
/// mode needs; a manifest may declare both and serve either request.
pub fn resolve_plan(manifest: &Manifest, mode: Mode) -> Result<PackagingPlan, PlanError> {
    let kind = match mode {
        Mode::Extension => PlanKind::Extensions {
            extensions: extension_plans(manifest)?,
        },
        Mode::Bundle => PlanKind::Bundle {
            bundle: Box::new(bundle_spec(manifest)?),
        },
    };

    Ok(PackagingPlan {
        meta: manifest.package.clone(),
        kind,
    })
}

/// Plan every `[[extension]]` for the build pipeline, in declaration order
pub fn extension_plans(manifest: &Manifest) -> Result<Vec<ExtensionPlan>, PlanError> {
    if manifest.extensions.is_empty() {
        return Err(PlanError::MissingExtensions);
    }

    Ok(manifest
        .extensions
        .iter()
        .map(ExtensionPlan::from_decl)
        .collect())
}

/// Assemble the bundle description from the `[bundle]` section
pub fn bundle_spec(manifest: &Manifest) -> Result<BundleSpec, PlanError> {
    manifest
        .bundle
        .as_ref()
        .map(|decl| BundleSpec::from_manifest(&manifest.package, decl))
        .ok_or(PlanError::MissingBundle)
}
