//! Gantry CLI internal library code
//!
//! A build bridge that drives an external `CMake` project to compile
//! Python native extension modules, plus a bundle mode that assembles
//! the app configuration for pure-Python applications. A manifest may
//! declare either mode or both; each invocation acts on exactly one.

/// Default directory for build temporaries and staged artifacts
pub const DEFAULT_BUILD_DIR: &str = "build";

pub mod bundle;
pub mod debug;
pub mod env_vars;
pub mod ext_paths;
pub mod extension;
pub mod manifest;
pub mod mode;
pub mod orchestrator;
pub mod placement;
pub mod process;

pub use bundle::{APP_CONFIG_FILE, BundleSpec, ConsoleEntry, write_app_config};
pub use debug::{init_debug, is_debug_enabled};
pub use ext_paths::{PathResolver, StaticResolver, SysconfigResolver, resolver_for};
pub use extension::NativeExtension;
pub use manifest::{
    BundleDecl, ExtensionDecl, MANIFEST_FILE, Manifest, ManifestError, PackageMeta,
    locate_manifest, project_root,
};
pub use mode::{
    ExtensionPlan, Mode, PackagingPlan, PlanError, PlanKind, bundle_spec, extension_plans,
    resolve_plan,
};
pub use orchestrator::Orchestrator;
pub use placement::{PlacementReport, place_artifacts};
pub use process::{ToolCommand, ToolError, split_args};
