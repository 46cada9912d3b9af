//! Child-process execution behind an injectable [`Executor`] seam.
use std::fmt;
use std::path::Path;
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Human-readable exit status, e.g. `exit code 3`.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.code.map_or_else(
            || "signal termination".to_string(),
            |code| format!("exit code {code}"),
        )
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over process execution so runner logic can be tested without
/// spawning real processes.
pub trait Executor: fmt::Debug {
    /// Run `program` with `args`, capturing stdout and stderr, and return the
    /// result without treating a non-zero exit as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_unchecked(&self, program: &Path, args: &[&Path]) -> std::io::Result<ExecResult>;
}

/// Production [`Executor`] that spawns real child processes.
///
/// Blocks until the child exits; output is buffered in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &Path, args: &[&Path]) -> std::io::Result<ExecResult> {
        Command::new(program)
            .args(args)
            .output()
            .map(ExecResult::from)
    }
}
