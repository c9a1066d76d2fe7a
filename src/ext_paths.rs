//! Extension artifact path resolution
//!
//! Maps a dotted extension name to the filename and directory of its
//! compiled artifact. The filename suffix is platform and interpreter
//! specific (`.cpython-312-x86_64-linux-gnu.so`, `.pyd`, ...), so
//! resolution sits behind a trait and the default implementation asks
//! the interpreter itself.

use crate::extension::NativeExtension;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

/// Suffix reported by the first reachable interpreter, cached for the
/// life of the process
static EXT_SUFFIX: LazyLock<String> = LazyLock::new(detect_suffix);

const SUFFIX_PROBE: &str = "import sysconfig; print(sysconfig.get_config_var('EXT_SUFFIX'))";

/// Strategy for naming and locating compiled extension artifacts
pub trait PathResolver: Debug {
    /// Filename suffix for compiled extensions, e.g. `.so` or `.pyd`
    fn extension_suffix(&self) -> String;

    /// Artifact filename for the given extension
    fn artifact_name(&self, extension: &NativeExtension) -> String {
        format!("{}{}", extension.target_name(), self.extension_suffix())
    }

    /// Path the compiled artifact conventionally installs to, below
    /// `root`
    fn artifact_path(&self, root: &Path, extension: &NativeExtension) -> PathBuf {
        let mut path = root.to_path_buf();
        for component in extension.package_components() {
            path.push(component);
        }
        path.push(self.artifact_name(extension));
        path
    }

    /// Directory the build system must drop the artifact into
    fn output_dir(&self, root: &Path, extension: &NativeExtension) -> PathBuf {
        self.artifact_path(root, extension)
            .parent()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf)
    }
}

/// Resolves suffixes by asking the Python interpreter for its
/// `EXT_SUFFIX` sysconfig value
///
/// The interpreter is taken from `PYTHON`, then `python3`, then
/// `python`. When none can be queried the platform default applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysconfigResolver;

impl PathResolver for SysconfigResolver {
    fn extension_suffix(&self) -> String {
        EXT_SUFFIX.clone()
    }
}

/// Resolves with a fixed suffix, bypassing interpreter probing
#[derive(Debug, Clone)]
pub struct StaticResolver {
    suffix: String,
}

impl StaticResolver {
    /// Create a resolver that always uses the given suffix
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Platform default without consulting an interpreter
    #[must_use]
    pub fn platform_default() -> Self {
        Self::new(fallback_suffix())
    }
}

impl PathResolver for StaticResolver {
    fn extension_suffix(&self) -> String {
        self.suffix.clone()
    }
}

/// Build a resolver, honoring an explicit suffix override
#[must_use]
pub fn resolver_for(suffix: Option<&str>) -> Box<dyn PathResolver> {
    if let Some(fixed) = suffix {
        return Box::new(StaticResolver::new(fixed));
    }
    Box::new(SysconfigResolver)
}

fn detect_suffix() -> String {
    for interpreter in interpreter_candidates() {
        if let Some(suffix) = query_ext_suffix(&interpreter) {
            return suffix;
        }
    }

    fallback_suffix().to_string()
}

fn interpreter_candidates() -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(python) = crate::env_vars::python_command() {
        candidates.push(python);
    }
    candidates.push("python3".to_string());
    candidates.push("python".to_string());
    candidates
}

/// Ask one interpreter for its extension suffix
fn query_ext_suffix(interpreter: &str) -> Option<String> {
    let output = Command::new(interpreter)
        .args(["-c", SUFFIX_PROBE])
        .output()
        .ok()?;

    output.status.success().then_some(())?;

    let suffix = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!suffix.is_empty() && suffix != "None").then_some(suffix)
}

const fn fallback_suffix() -> &'static str {
    if cfg!(windows) { ".pyd" } else { ".so" }
}
