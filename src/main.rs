//! Gantry command-line interface
//!
//! `CMake` build bridge and app bundler for Python packages

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

/// Display an error with its chain of causes
fn display_error(err: &anyhow::Error) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }
}

#[derive(Parser)]
#[command(name = "gantry")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CMake build bridge and app bundler for Python packages", long_about = None)]
#[command(disable_version_flag = true)]
pub(crate) struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    _version: Option<bool>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure and build native extensions with `CMake`
    Build {
        /// Path to the manifest (defaults to gantry.toml)
        #[arg(long, env = "GANTRY_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Directory for build temporaries and staged artifacts
        #[arg(long, env = "GANTRY_BUILD_DIR")]
        build_dir: Option<PathBuf>,

        /// Extra configure arguments, e.g. "-DCMAKE_BUILD_TYPE=Release"
        #[arg(long, env = "GANTRY_CMAKE_ARGS", allow_hyphen_values = true, default_value = "")]
        cmake_args: String,

        /// Extra build arguments, e.g. "-j4"
        #[arg(long, env = "GANTRY_MAKE_ARGS", allow_hyphen_values = true, default_value = "")]
        make_args: String,

        /// Place artifacts here instead of next to the manifest
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Override the compiled extension filename suffix
        #[arg(long)]
        ext_suffix: Option<String>,

        /// Echo composed tool command lines
        #[arg(long)]
        verbose: bool,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Assemble the bundled application configuration
    Bundle {
        /// Path to the manifest (defaults to gantry.toml)
        #[arg(long, env = "GANTRY_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Directory the app configuration is written under
        #[arg(long, env = "GANTRY_BUILD_DIR")]
        build_dir: Option<PathBuf>,

        /// Write the app configuration into this directory instead
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Print the resolved packaging plan as JSON
    Plan {
        /// Packaging mode to resolve
        #[arg(value_enum)]
        mode: PlanMode,

        /// Path to the manifest (defaults to gantry.toml)
        #[arg(long, env = "GANTRY_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Packaging mode argument for `gantry plan`
#[derive(Clone, Copy, ValueEnum)]
enum PlanMode {
    /// Native extensions compiled by `CMake`
    Extension,

    /// Bundled application configuration
    Bundle,
}

impl From<PlanMode> for gantry::Mode {
    fn from(mode: PlanMode) -> Self {
        match mode {
            PlanMode::Extension => Self::Extension,
            PlanMode::Bundle => Self::Bundle,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Extract the debug flag before consuming cli.command
    let debug = match &cli.command {
        Commands::Build { debug, .. }
        | Commands::Bundle { debug, .. }
        | Commands::Plan { debug, .. } => *debug,
        Commands::Completion { .. } => false,
    };

    gantry::init_debug(debug || gantry::env_vars::debug_enabled());

    let result = match cli.command {
        Commands::Build {
            manifest,
            build_dir,
            cmake_args,
            make_args,
            dest,
            ext_suffix,
            verbose,
            debug: _,
        } => commands::build::run(
            manifest.as_deref(),
            build_dir.as_deref(),
            &cmake_args,
            &make_args,
            dest.as_deref(),
            ext_suffix.as_deref(),
            verbose,
        ),
        Commands::Bundle {
            manifest,
            build_dir,
            output,
            debug: _,
        } => commands::bundle::run(manifest.as_deref(), build_dir.as_deref(), output.as_deref()),
        Commands::Plan {
            mode,
            manifest,
            debug: _,
        } => commands::plan::run(manifest.as_deref(), mode.into()),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(e) = result {
        display_error(&e);
        process::exit(1);
    }
}

mod commands;
