//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `gantry_binary`)
//! - Manifest fixtures and spy build tools (via `helpers`)

pub(crate) mod helpers;
