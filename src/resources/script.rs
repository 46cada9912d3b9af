//! Setup-script discovery.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScriptError;

/// A setup script found in the scripts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// File name, used for ordering and reporting.
    pub name: String,
    /// Full path to the script.
    pub path: PathBuf,
}

/// Which files in the scripts directory count as scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discovery<'a> {
    /// Only accept files with this extension (without the leading dot).
    pub extension: Option<&'a str>,
    /// Only accept files with an executable permission bit (Unix).
    pub require_executable: bool,
}

/// List the scripts directly inside `dir`, sorted by file name.
///
/// Subdirectories are ignored. Symlinks are followed when checking whether
/// an entry is a regular file.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover(dir: &Path, filter: Discovery<'_>) -> Result<Vec<Script>, ScriptError> {
    let discover_err = |source| ScriptError::Discover {
        path: dir.to_path_buf(),
        source,
    };

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir).map_err(discover_err)? {
        let path = entry.map_err(discover_err)?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = filter.extension
            && path.extension().is_none_or(|e| e != ext)
        {
            continue;
        }
        if filter.require_executable && !is_executable(&path) {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        scripts.push(Script {
            name: name.to_string_lossy().into_owned(),
            path,
        });
    }

    scripts.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(scripts)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
