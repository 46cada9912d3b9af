//! `bootstrap` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotfiles_bootstrap::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log_file = logging::init_subscriber(args.run_options());
    let log = Arc::new(logging::Logger::with_log_file(log_file));

    match commands::bootstrap::run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
