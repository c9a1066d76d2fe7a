//! Native extension descriptors
//!
//! A native extension is identified by its dotted module path, for
//! example `mypkg.backend._native`. The final segment doubles as the
//! build target name in the external `CMake` project.

use serde::{Deserialize, Serialize};

/// A native extension module compiled by an external `CMake` project.
///
/// The descriptor is inert: it names the module and nothing else.
/// Source discovery, compilation, and linking all belong to the
/// external build system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeExtension {
    /// Fully qualified dotted module path, e.g. `mypkg._native`
    pub name: String,

    /// Source files compiled by the host packaging layer.
    ///
    /// Always empty, on every construction path including
    /// deserialization. The external build system owns compilation,
    /// so the host layer is never handed any sources to compile.
    #[serde(skip_deserializing)]
    pub sources: Vec<String>,
}

impl NativeExtension {
    /// Create a descriptor for the given dotted module path
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            sources: Vec::new(),
        }
    }

    /// Create a descriptor, discarding any caller-supplied sources
    ///
    /// The stored source list is always empty; compilation belongs to
    /// the external build system, never to the host packaging layer.
    #[must_use]
    pub fn with_sources(name: String, _sources: Vec<String>) -> Self {
        Self::new(name)
    }

    /// The build target name: the last segment of the dotted path
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry::NativeExtension;
    ///
    /// let ext = NativeExtension::new("mypkg.backend._native".to_string());
    /// assert_eq!(ext.target_name(), "_native");
    /// ```
    #[must_use]
    pub fn target_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Package directories above the module itself
    ///
    /// For `mypkg.backend._native` this is `["mypkg", "backend"]`;
    /// the compiled artifact installs below these directories.
    #[must_use]
    pub fn package_components(&self) -> Vec<&str> {
        let mut components: Vec<&str> = self.name.split('.').collect();
        components.pop();
        components
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;

    #[test]
    fn target_name_is_last_segment() {
        let ext = NativeExtension::new("a.b.c".to_string());
        assert_eq!(ext.target_name(), "c");
    }

    #[test]
    fn target_name_without_dots_is_whole_name() {
        let ext = NativeExtension::new("native".to_string());
        assert_eq!(ext.target_name(), "native");
    }

    #[test]
    fn sources_start_empty() {
        let ext = NativeExtension::new("mypkg._native".to_string());
        assert!(ext.sources.is_empty());
    }

    #[test]
    fn with_sources_discards_caller_sources() {
        let ext = NativeExtension::with_sources(
            "mypkg._native".to_string(),
            vec!["one.c".to_string(), "two.c".to_string()],
        );
        assert!(ext.sources.is_empty());
    }

    #[test]
    fn package_components_exclude_the_module() {
        let ext = NativeExtension::new("mypkg.backend._native".to_string());
        assert_eq!(ext.package_components(), vec!["mypkg", "backend"]);
    }

    #[test]
    fn package_components_empty_for_top_level_module() {
        let ext = NativeExtension::new("_native".to_string());
        assert!(ext.package_components().is_empty());
    }

    #[test]
    fn descriptors_round_trip_through_json() {
        let ext = NativeExtension::new("mypkg._native".to_string());
        let json = serde_json::to_string(&ext).unwrap();
        let back: NativeExtension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ext);
    }

    #[test]
    fn deserialized_sources_are_dropped() {
        let ext: NativeExtension =
            serde_json::from_str(r#"{"name": "mypkg._native", "sources": ["one.c"]}"#).unwrap();
        assert!(ext.sources.is_empty());
    }
}
