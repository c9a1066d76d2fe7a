//! Debug logging
//!
//! Gated on the global debug flag set once at startup. Disabled
//! debug logging costs a single initialized-check per call site.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Set debug logging for the rest of the process
///
/// The first call wins; later calls are ignored.
pub fn init_debug(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled);
}

/// Check if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

/// Log to stderr when debug mode is on
///
/// Usage: `debug!("configuring {}", name)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}
