//! External tool invocation
//!
//! Build tools are launched with a program path and an explicit
//! argument list; nothing is ever routed through a shell, so paths
//! with spaces and caller-supplied arguments cannot be reinterpreted.
//! Tool output streams through to our own stdout/stderr live.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Error raised when an external build tool exits unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command failed: `{command}` (exit code {code})")]
pub struct ToolError {
    /// Rendered command line that failed
    pub command: String,

    /// Exit code reported by the tool, or -1 when it was terminated
    /// by a signal
    pub code: i32,
}

/// A fully resolved external tool invocation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// Start composing an invocation of the given program
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append every argument from an iterator
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the tool from the given working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Human-readable rendering used in logs and error messages
    ///
    /// Arguments containing whitespace or quotes appear in their
    /// escaped, quoted form so the rendered line stays unambiguous.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.program.display().to_string();
        for arg in &self.args {
            rendered.push(' ');
            if arg.contains(|c: char| c.is_whitespace() || c == '"') {
                rendered.push_str(&format!("{arg:?}"));
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }

    /// Run the tool to completion, streaming its output through
    ///
    /// Blocks until the process exits. A non-zero exit status becomes
    /// a [`ToolError`] carrying the rendered command line and the
    /// exit code.
    pub fn run(&self) -> Result<()> {
        let rendered = self.render();
        crate::debug!("running: {rendered}");

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let status = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to launch `{rendered}`"))?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError {
                command: rendered,
                code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }

    /// The directory the tool will run in, if one was set
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

/// Split a command-line fragment into arguments
///
/// Honors single and double quotes so a fragment like
/// `-DNAME="two words"` stays one argument. Backslash escapes are not
/// interpreted. An unterminated quote runs to the end of the input.
///
/// # Examples
///
/// ```
/// use gantry::process::split_args;
///
/// assert_eq!(split_args("-j4 VERBOSE=1"), vec!["-j4", "VERBOSE=1"]);
/// assert_eq!(split_args(r#"-DGREETING="hello there""#), vec!["-DGREETING=hello there"]);
/// assert!(split_args("").is_empty());
/// ```
#[must_use]
pub fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut has_token = false;

    for ch in input.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    has_token = true;
                }
                c if c.is_whitespace() => {
                    if has_token {
                        args.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                }
                c => {
                    current.push(c);
                    has_token = true;
                }
            },
        }
    }

    if has_token {
        args.push(current);
    }

    args
}
