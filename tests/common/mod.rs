// Shared helpers for integration tests.
//
// Provides a temporary repository and home directory plus a fluent builder
// so each test can lay out symlink sources and setup scripts without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::io::{Cursor, Sink};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotfiles_bootstrap::commands::bootstrap;
use dotfiles_bootstrap::config::Config;
use dotfiles_bootstrap::exec::SystemExecutor;
use dotfiles_bootstrap::logging::Logger;
use dotfiles_bootstrap::prompt::ConsolePrompter;
use dotfiles_bootstrap::tasks::{Context, RunOptions};

/// File that recording scripts append their name to.
pub const ORDER_FILE: &str = "order.log";

/// An isolated repository and home directory, both deleted on drop.
pub struct IntegrationTestContext {
    /// Temporary dotfiles repository containing `ubuntu_setup/`.
    pub root: tempfile::TempDir,
    /// Temporary home directory receiving the symlinks.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a repository with empty source and scripts directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp root");
        let home = tempfile::tempdir().expect("create temp home");
        std::fs::create_dir_all(root.path().join("ubuntu_setup/symlink_fs"))
            .expect("create symlink_fs dir");
        std::fs::create_dir_all(root.path().join("ubuntu_setup/scripts"))
            .expect("create scripts dir");
        Self { root, home }
    }

    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Absolute path of a file under `ubuntu_setup/symlink_fs`.
    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.root.path().join("ubuntu_setup/symlink_fs").join(rel)
    }

    /// Names appended by recording scripts, in execution order.
    pub fn executed_scripts(&self) -> Vec<String> {
        std::fs::read_to_string(self.root.path().join(ORDER_FILE))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Sorted entry names directly inside the home directory.
    pub fn home_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.home.path())
            .expect("read home")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Load configuration the way the binary does.
    pub fn load_config(&self) -> Config {
        Config::load(self.root.path(), self.home.path()).expect("load config")
    }

    /// Run every task with `opts`, feeding `answers` to the console prompter.
    ///
    /// Returns the command result and the logger holding the summary entries.
    pub fn run(&self, opts: RunOptions, answers: &str) -> (anyhow::Result<()>, Arc<Logger>) {
        let log = Arc::new(Logger::with_log_file(None));
        let prompter: ConsolePrompter<Cursor<Vec<u8>>, Sink> =
            ConsolePrompter::new(Cursor::new(answers.as_bytes().to_vec()), std::io::sink());
        let ctx = Context::new(
            self.load_config(),
            opts,
            Arc::<Logger>::clone(&log),
            Arc::new(prompter),
            Arc::new(SystemExecutor),
        );
        let result = bootstrap::run_with(&ctx, &log);
        (result, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by an empty repository.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Create `ubuntu_setup/symlink_fs/<rel>` with `content`.
    pub fn with_source_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.source_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Add an executable shell script that records its name and exits with `code`.
    pub fn with_script(self, name: &str, code: i32) -> Self {
        let body = recording_body(&self.ctx, name, code);
        let path = self.ctx.root.path().join("ubuntu_setup/scripts").join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
        make_executable(&path);
        self
    }

    /// Add a recording script without the executable bit or a shebang.
    pub fn with_plain_script(self, name: &str, code: i32) -> Self {
        let body = recording_body(&self.ctx, name, code);
        let path = self.ctx.root.path().join("ubuntu_setup/scripts").join(name);
        std::fs::write(&path, body).expect("write script");
        self
    }

    /// Write `bootstrap.toml` at the repository root.
    pub fn with_settings(self, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join("bootstrap.toml"), content)
            .expect("write settings");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn recording_body(ctx: &IntegrationTestContext, name: &str, code: i32) -> String {
    let order = ctx.root.path().join(ORDER_FILE);
    format!("echo '{name}' >> '{}'\nexit {code}\n", order.display())
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
