//! Symlink synchronisation task.
use super::helpers::shorten_path;
use super::{Context, Task};
use crate::error::BootstrapError;
use crate::logging::TaskStatus;
use crate::resources::symlink;

/// Mirror the symlink source tree into `$HOME`.
#[derive(Debug)]
pub struct SynchronizeSymlinks;

impl Task for SynchronizeSymlinks {
    fn name(&self) -> &str {
        "Create symlinks"
    }

    fn run(&self, ctx: &Context) -> Result<(), BootstrapError> {
        let home = &ctx.config.home;
        let source_dir = &ctx.config.source_dir;

        if ctx.opts.interactive && !ctx.prompter.confirm("Create all symlinks?")? {
            ctx.log.info("skipping symlink creation");
            ctx.log
                .record_task(self.name(), TaskStatus::Skipped, Some("declined"));
            return Ok(());
        }

        if !source_dir.is_dir() {
            ctx.log.warn(&format!(
                "symlink source not found: {}",
                shorten_path(source_dir, home)
            ));
            ctx.log.record_task(
                self.name(),
                TaskStatus::Skipped,
                Some("source directory missing"),
            );
            return Ok(());
        }

        let links = symlink::collect(source_dir, home)?;
        for link in &links {
            let line = format!(
                "{} -> {}",
                shorten_path(&link.source, home),
                shorten_path(&link.target, home)
            );
            if ctx.opts.dry_run {
                ctx.log.dry_run(&format!("would symlink {line}"));
                continue;
            }
            link.apply()?;
            ctx.log.info(&format!("symlinked {line}"));
        }

        let count = links.len();
        if ctx.opts.dry_run {
            let summary = format!("{count} would be linked");
            ctx.log.info(&summary);
            ctx.log
                .record_task(self.name(), TaskStatus::DryRun, Some(&summary));
        } else {
            let summary = format!("{count} linked");
            ctx.log.info(&summary);
            ctx.log.record_task(self.name(), TaskStatus::Ok, Some(&summary));
        }
        Ok(())
    }
}
