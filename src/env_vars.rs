//! Environment variable access
//!
//! Overrides honored by the build pipeline. Variables that mirror a
//! CLI flag (`GANTRY_MANIFEST`, `GANTRY_BUILD_DIR`, and the extra
//! argument strings) are declared on the flags themselves; this
//! module covers the ones read while a build is running.

use std::env;

/// Check whether a value spells a truthy setting
///
/// Truthy values are "1", "true", and "yes" (case-insensitive).
fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Check whether an environment variable is set to a truthy value
fn is_enabled(var: &str) -> bool {
    env::var(var).is_ok_and(|value| is_truthy(&value))
}

// External build tools

/// CMAKE: Path to the cmake executable used for the configure phase
pub fn cmake_command() -> Option<String> {
    env::var("CMAKE").ok()
}

/// MAKE: Command used for the build phase instead of `make`
pub fn make_command() -> Option<String> {
    env::var("MAKE").ok()
}

/// PYTHON: Interpreter queried for the extension filename suffix
pub fn python_command() -> Option<String> {
    env::var("PYTHON").ok()
}

// Gantry behavior

/// `GANTRY_DEBUG`: Enable debug logging without passing --debug
pub fn debug_enabled() -> bool {
    is_enabled("GANTRY_DEBUG")
}
