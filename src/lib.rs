//! Personal-machine bootstrap engine.
//!
//! Mirrors a source tree of dotfiles into `$HOME` as symlinks, then runs an
//! ordered set of setup scripts. Both steps honour dry-run, interactive, and
//! verbose modes, and scripts may be made fatal with exit-on-error.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: resolve the repository root, home, and optional settings
//! - **[`resources`]**: filesystem primitives (symlink creation, script discovery)
//! - **[`tasks`]**: the named steps wired to resources, logging, and prompting
//! - **[`commands`]**: top-level orchestration invoked by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod prompt;
pub mod resources;
pub mod tasks;
