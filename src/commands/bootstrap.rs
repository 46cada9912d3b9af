//! The `bootstrap` command: link the source tree, then run setup scripts.
use anyhow::{Context as _, Result};
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::prompt::ConsolePrompter;
use crate::tasks::{self, Context};

/// Run the bootstrap: resolve the root, load configuration, then link and
/// run scripts.
///
/// # Errors
///
/// Returns an error if the root or home directory cannot be determined, the
/// settings file is invalid, or a task fails fatally.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let root = config::resolve_root(cli.root.as_deref())?;
    let home = config::home_dir()?;
    let config = Config::load(&root, &home)
        .with_context(|| format!("loading configuration for {}", root.display()))?;
    log.debug(&format!("root: {}", config.root.display()));
    log.debug(&format!("home: {}", config.home.display()));

    let ctx = Context::new(
        config,
        cli.run_options(),
        Arc::<Logger>::clone(log),
        Arc::new(ConsolePrompter::stdio()),
        Arc::new(SystemExecutor),
    );
    run_with(&ctx, log)
}

/// Execute every task against an already-built context.
///
/// The summary is printed only when all tasks return normally. Tolerated
/// script failures produce a warning but not an error.
///
/// # Errors
///
/// Returns the first fatal task error.
pub fn run_with(ctx: &Context, log: &Logger) -> Result<()> {
    let version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("bootstrap {version}"));
    if ctx.opts.dry_run {
        log.info("dry run: no changes will be made");
    }

    for task in tasks::all_tasks() {
        tasks::execute(task.as_ref(), ctx)?;
    }

    log.print_summary();
    let failures = log.failure_count();
    if failures > 0 {
        log.warn(&format!("{failures} script(s) failed"));
    }
    log.info("Bootstrap process completed!");
    Ok(())
}
