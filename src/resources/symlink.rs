//! Symlink resource and source-tree walking.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SymlinkError;

/// A symlink to be created at `target`, pointing to `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkResource {
    /// The source file (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Create the link, replacing whatever currently occupies the target.
    ///
    /// Parent directories are created as needed. An existing file, symlink
    /// (broken or not), or empty directory at the target is removed first.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent cannot be created, the existing entry
    /// cannot be removed (e.g. a non-empty directory), or the link cannot be
    /// created.
    pub fn apply(&self) -> Result<(), SymlinkError> {
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).map_err(|source| SymlinkError::CreateParent {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        remove_existing(&self.target).map_err(|source| SymlinkError::RemoveExisting {
            path: self.target.clone(),
            source,
        })?;

        create_symlink(&self.source, &self.target).map_err(|source| SymlinkError::CreateLink {
            link: self.target.clone(),
            source_path: self.source.clone(),
            source,
        })
    }
}

/// Collect one [`SymlinkResource`] per regular file under `source_dir`,
/// targeting the same relative path under `home`.
///
/// Entries are visited in file-name order. Symlinks that resolve to files are
/// treated as files; symlinked directories are not descended into. Sources
/// are made absolute so the created links do not depend on the working
/// directory.
///
/// # Errors
///
/// Returns an error if any directory in the tree cannot be read.
pub fn collect(source_dir: &Path, home: &Path) -> Result<Vec<SymlinkResource>, SymlinkError> {
    let root = std::path::absolute(source_dir).map_err(|source| SymlinkError::Walk {
        path: source_dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    walk_files(&root, &mut files)?;

    Ok(files
        .into_iter()
        .filter_map(|source| {
            let relative = source.strip_prefix(&root).ok()?.to_path_buf();
            Some(SymlinkResource::new(source, home.join(relative)))
        })
        .collect())
}

fn walk_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SymlinkError> {
    let walk_err = |source| SymlinkError::Walk {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(walk_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_err)?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(walk_err)?;
        if file_type.is_dir() {
            walk_files(&path, files)?;
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            files.push(path);
        }
    }
    Ok(())
}

/// Remove whatever exists at `path`, including broken symlinks.
///
/// Does nothing if nothing is there. Directories are removed with
/// `remove_dir`, so only empty ones succeed.
fn remove_existing(path: &Path) -> std::io::Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if is_dir_like(&meta) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Check if metadata represents a directory-like entry.
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory symlinks,
/// so we check the raw `FILE_ATTRIBUTE_DIRECTORY` bit instead.
fn is_dir_like(meta: &fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link)
    }
}
