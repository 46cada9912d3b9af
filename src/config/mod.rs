//! Runtime configuration: repository root, source and scripts directories,
//! home directory, and optional script interpreter.
//!
//! Defaults follow the repository layout (`ubuntu_setup/symlink_fs` and
//! `ubuntu_setup/scripts`); an optional `bootstrap.toml` at the root may
//! override them.
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory under the root that holds the setup tree.
pub const SETUP_DIR: &str = "ubuntu_setup";
/// Name of the optional settings file at the repository root.
pub const SETTINGS_FILE: &str = "bootstrap.toml";

/// Resolved configuration passed to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository root.
    pub root: PathBuf,
    /// Tree mirrored into `home` as symlinks.
    pub source_dir: PathBuf,
    /// Directory whose executables are run in order.
    pub scripts_dir: PathBuf,
    /// Home directory that receives the symlinks.
    pub home: PathBuf,
    /// Interpreter used to run each script; scripts run directly when `None`.
    pub interpreter: Option<PathBuf>,
    /// Only scripts with this extension are discovered when set.
    pub extension: Option<String>,
}

/// Contents of `bootstrap.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
struct Settings {
    symlink_dir: Option<PathBuf>,
    scripts_dir: Option<PathBuf>,
    interpreter: Option<String>,
    extension: Option<String>,
}

impl Config {
    /// Configuration using the default layout under `root`.
    #[must_use]
    pub fn with_defaults(root: &Path, home: &Path) -> Self {
        let setup = root.join(SETUP_DIR);
        Self {
            root: root.to_path_buf(),
            source_dir: setup.join("symlink_fs"),
            scripts_dir: setup.join("scripts"),
            home: home.to_path_buf(),
            interpreter: None,
            extension: None,
        }
    }

    /// Load configuration for `root`, applying `bootstrap.toml` if present.
    ///
    /// Relative directories in the settings file are resolved against
    /// `root`. A configured interpreter is looked up on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed, or the
    /// interpreter cannot be found.
    pub fn load(root: &Path, home: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml_loader::load_config(&root.join(SETTINGS_FILE))?;
        let mut config = Self::with_defaults(root, home);

        if let Some(dir) = settings.symlink_dir {
            config.source_dir = root.join(dir);
        }
        if let Some(dir) = settings.scripts_dir {
            config.scripts_dir = root.join(dir);
        }
        if let Some(interpreter) = settings.interpreter {
            let resolved = which::which(&interpreter)
                .map_err(|_| ConfigError::InterpreterNotFound(interpreter.clone()))?;
            config.interpreter = Some(resolved);
        }
        config.extension = settings
            .extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty());

        Ok(config)
    }
}

/// Determine the user's home directory from the environment.
///
/// # Errors
///
/// Returns an error if `HOME` (or `USERPROFILE` on Windows) is not set.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map(PathBuf::from)
            .map_err(|_| ConfigError::HomeNotSet("USERPROFILE"))
    } else {
        std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::HomeNotSet("HOME"))
    }
}

/// Resolve the dotfiles root directory from an explicit override or
/// auto-detection.
///
/// Order: `explicit`, `BOOTSTRAP_ROOT`, locations relative to the running
/// binary, then the current directory. Auto-detected candidates must contain
/// the `ubuntu_setup/` directory.
///
/// # Errors
///
/// Returns an error if no candidate qualifies or the chosen root cannot be
/// canonicalized.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(root) = explicit {
        return canonicalize(root);
    }

    if let Ok(root) = std::env::var("BOOTSTRAP_ROOT") {
        return canonicalize(Path::new(&root));
    }

    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        candidates.push(parent.join("../..")); // target/release/ → repo root
        candidates.push(parent.join("..")); // bin/ → repo root
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    first_repo_root(&candidates).unwrap_or(Err(ConfigError::RootNotFound))
}

/// Canonicalize the first candidate that contains the setup directory.
fn first_repo_root(candidates: &[PathBuf]) -> Option<Result<PathBuf, ConfigError>> {
    candidates
        .iter()
        .find(|candidate| is_repo_root(candidate))
        .map(|candidate| canonicalize(candidate))
}

fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(SETUP_DIR).is_dir()
}

fn canonicalize(path: &Path) -> Result<PathBuf, ConfigError> {
    dunce::canonicalize(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
