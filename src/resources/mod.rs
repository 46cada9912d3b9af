//! Filesystem primitives: source-tree symlinks and setup-script discovery.
pub mod script;
pub mod symlink;
