//! Named bootstrap steps and the context they share.
pub mod helpers;
pub mod scripts;
pub mod symlinks;

use std::sync::Arc;

use crate::config::Config;
use crate::error::BootstrapError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::prompt::Prompter;

/// Behavioural flags shared by every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Print captured script output.
    pub verbose: bool,
    /// Ask before the symlink batch and before each script.
    pub interactive: bool,
    /// Stop the whole run at the first failing script.
    pub exit_on_error: bool,
    /// Report intended actions without performing them.
    pub dry_run: bool,
}

/// Shared context for task execution.
pub struct Context {
    /// Resolved paths and script settings.
    pub config: Config,
    /// Behavioural flags.
    pub opts: RunOptions,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Source of interactive confirmations.
    pub prompter: Arc<dyn Prompter>,
    /// Command executor (for testing or real child processes).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("opts", &self.opts)
            .field("log", &"<dyn Log>")
            .field("prompter", &"<dyn Prompter>")
            .field("executor", &self.executor)
            .finish()
    }
}

impl Context {
    /// Bundle configuration, flags, and collaborators.
    #[must_use]
    pub fn new(
        config: Config,
        opts: RunOptions,
        log: Arc<dyn Log>,
        prompter: Arc<dyn Prompter>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            config,
            opts,
            log,
            prompter,
            executor,
        }
    }
}

/// A named bootstrap step.
///
/// Tasks record their own summary entries; an `Err` aborts the whole run.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error for failures that must stop the run: filesystem
    /// errors while linking, console errors while prompting, scripts that
    /// cannot be started, or a failing script under `--exit-on-error`.
    fn run(&self, ctx: &Context) -> Result<(), BootstrapError>;
}

/// The bootstrap steps in execution order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(symlinks::SynchronizeSymlinks),
        Box::new(scripts::RunScripts),
    ]
}

/// Announce and execute a task.
///
/// # Errors
///
/// Propagates the task's error unchanged.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<(), BootstrapError> {
    ctx.log.stage(task.name());
    task.run(ctx)
}
