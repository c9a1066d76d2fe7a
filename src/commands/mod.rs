//! Command implementations
//!
//! One module per subcommand; each exposes a `run` function invoked
//! from the CLI dispatch in `main.rs`.

pub(crate) mod build;
pub(crate) mod bundle;
pub(crate) mod completion;
pub(crate) mod plan;
