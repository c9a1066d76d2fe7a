//! Completion command
//!
//! Generate shell completion scripts

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Generate shell completion scripts
///
/// Outputs the completion script for the specified shell to stdout.
/// Users can save this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// gantry completion bash > /usr/local/share/bash-completion/completions/gantry
///
/// # Zsh
/// gantry completion zsh > /usr/local/share/zsh/site-functions/_gantry
///
/// # Fish
/// gantry completion fish > ~/.config/fish/completions/gantry.fish
/// ```
#[allow(
    clippy::unnecessary_wraps,
    reason = "Result type maintained for consistency with command signature pattern"
)]
pub(crate) fn run(shell: Shell) -> Result<()> {
    let mut cmd = crate::Cli::command();

    generate(shell, &mut cmd, "gantry", &mut io::stdout());

    Ok(())
}
