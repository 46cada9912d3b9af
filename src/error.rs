//! Domain-specific error types for the bootstrap utility.
//!
//! Library modules return typed errors built with [`thiserror`]; the command
//! layer converts them to [`anyhow::Error`] via `?` and `main` prints the
//! resulting chain once with a uniform prefix.
//!
//! # Error hierarchy
//!
//! ```text
//! BootstrapError
//! ├── Config(ConfigError)    root resolution, bootstrap.toml, $HOME
//! ├── Symlink(SymlinkError)  walking the source tree, replacing links
//! ├── Script(ScriptError)    discovery, spawning, aborting failures
//! └── Prompt(PromptError)    interactive console I/O
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the bootstrap utility.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Symlink synchronization failed.
    #[error("Symlink error: {0}")]
    Symlink(#[from] SymlinkError),

    /// A setup script could not be run or aborted the run.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Reading a confirmation from the console failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Errors that arise while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No candidate directory looked like a dotfiles repository.
    #[error("cannot determine dotfiles root. Use --root or set BOOTSTRAP_ROOT env var")]
    RootNotFound,

    /// The home directory could not be determined from the environment.
    #[error("{0} environment variable is not set")]
    HomeNotSet(&'static str),

    /// `bootstrap.toml` could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `bootstrap.toml` is not valid TOML or has unknown keys.
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// The configured script interpreter is not on `PATH`.
    #[error("interpreter '{0}' not found on PATH")]
    InterpreterNotFound(String),
}

/// Errors that abort symlink synchronization.
#[derive(Error, Debug)]
pub enum SymlinkError {
    /// A directory in the source tree could not be read.
    #[error("reading {}: {source}", path.display())]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The parent directory of a link target could not be created.
    #[error("create parent {}: {source}", path.display())]
    CreateParent {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An existing entry at the link target could not be removed.
    #[error("remove existing {}: {source}", path.display())]
    RemoveExisting {
        /// Entry that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink itself could not be created.
    #[error("create link {} -> {}: {source}", link.display(), source_path.display())]
    CreateLink {
        /// Path of the link being created.
        link: PathBuf,
        /// File the link should point to.
        source_path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by the script runner.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The scripts directory could not be listed.
    #[error("reading {}: {source}", path.display())]
    Discover {
        /// Scripts directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A script could not be started.
    #[error("failed to execute {name}: {source}")]
    Spawn {
        /// File name of the script.
        name: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A script failed while `--exit-on-error` was set.
    #[error("{name} failed with {status}. Aborting.")]
    Aborted {
        /// File name of the failing script.
        name: String,
        /// Human-readable exit status (e.g. `exit code 3`).
        status: String,
    },
}

/// Errors raised while asking the user for confirmation.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Reading from or writing to the console failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before a valid answer was given.
    #[error("no answer given (end of input)")]
    Eof,
}
