//! Setup-script runner task.
use super::helpers::shorten_path;
use super::{Context, Task};
use crate::error::{BootstrapError, ScriptError};
use crate::exec::ExecResult;
use crate::logging::{TaskStatus, indent_wrapped, terminal_columns};
use crate::resources::script::{self, Discovery, Script};

/// Indentation of captured output under its heading.
const OUTPUT_INDENT: usize = 4;

/// Run every setup script in lexicographic order.
#[derive(Debug)]
pub struct RunScripts;

impl Task for RunScripts {
    fn name(&self) -> &str {
        "Run setup scripts"
    }

    fn run(&self, ctx: &Context) -> Result<(), BootstrapError> {
        let scripts_dir = &ctx.config.scripts_dir;
        if !scripts_dir.is_dir() {
            ctx.log.warn(&format!(
                "scripts directory not found: {}",
                shorten_path(scripts_dir, &ctx.config.home)
            ));
            ctx.log.record_task(
                self.name(),
                TaskStatus::Skipped,
                Some("scripts directory missing"),
            );
            return Ok(());
        }

        let filter = Discovery {
            extension: ctx.config.extension.as_deref(),
            require_executable: ctx.config.interpreter.is_none(),
        };
        let scripts = script::discover(scripts_dir, filter)?;
        if scripts.is_empty() {
            ctx.log.info("no scripts found");
            return Ok(());
        }

        for script in &scripts {
            run_one(ctx, script)?;
        }
        Ok(())
    }
}

/// Confirm, run, and report a single script.
///
/// Only returns `Err` for failures that end the run.
fn run_one(ctx: &Context, script: &Script) -> Result<(), BootstrapError> {
    let name = script.name.as_str();

    if ctx.opts.interactive && !ctx.prompter.confirm(&format!("Run {name}?"))? {
        ctx.log.info(&format!("skipping {name}"));
        ctx.log.record_task(name, TaskStatus::Skipped, Some("declined"));
        return Ok(());
    }

    if ctx.opts.dry_run {
        ctx.log.dry_run(&format!("would run {name}"));
        ctx.log.record_task(name, TaskStatus::DryRun, None);
        return Ok(());
    }

    ctx.log.info(&format!("running {name}"));
    let result = invoke(ctx, script)?;
    report_output(ctx, &result);

    if result.success {
        ctx.log.record_task(name, TaskStatus::Ok, None);
        return Ok(());
    }

    let status = result.status_text();
    ctx.log.record_task(name, TaskStatus::Failed, Some(&status));
    if ctx.opts.exit_on_error {
        return Err(ScriptError::Aborted {
            name: name.to_string(),
            status,
        }
        .into());
    }
    ctx.log.error(&format!("{name} failed with {status}"));
    Ok(())
}

fn invoke(ctx: &Context, script: &Script) -> Result<ExecResult, ScriptError> {
    let result = match &ctx.config.interpreter {
        Some(interpreter) => ctx
            .executor
            .run_unchecked(interpreter, &[script.path.as_path()]),
        None => ctx.executor.run_unchecked(&script.path, &[]),
    };
    result.map_err(|source| ScriptError::Spawn {
        name: script.name.clone(),
        source,
    })
}

/// Log captured output, on the console when verbose and in the log file always.
fn report_output(ctx: &Context, result: &ExecResult) {
    let width = terminal_columns();
    for (label, text) in [("output", &result.stdout), ("error output", &result.stderr)] {
        if text.trim().is_empty() {
            continue;
        }
        let msg = format!("{label}:\n{}", indent_wrapped(text, OUTPUT_INDENT, width));
        if ctx.opts.verbose {
            ctx.log.info(&msg);
        } else {
            ctx.log.debug(&msg);
        }
    }
}
