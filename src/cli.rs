//! Command-line flags for the `bootstrap` binary.
use clap::Parser;

use crate::tasks::RunOptions;

/// Help epilogue describing `bootstrap.toml`.
const SETTINGS_HELP: &str = "\
Settings:
  An optional bootstrap.toml at the root may set symlink_dir, scripts_dir,
  interpreter and extension. By default every executable file in
  ubuntu_setup/scripts runs directly. To run *.py scripts with python3
  instead, executable or not:

    interpreter = \"python3\"
    extension = \"py\"";

/// Command-line interface for the bootstrap utility.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bootstrap",
    about = "Bootstrap script for setting up dotfiles.",
    version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
    after_help = SETTINGS_HELP
)]
pub struct Cli {
    /// Show script output
    #[arg(short, long)]
    pub verbose: bool,

    /// Prompt before performing actions
    #[arg(short, long)]
    pub interactive: bool,

    /// Abort if any scripts error
    #[arg(short, long)]
    pub exit_on_error: bool,

    /// Simulate actions without making changes
    #[arg(short, long)]
    pub dry_run: bool,

    /// Dotfiles root containing ubuntu_setup/ and an optional bootstrap.toml
    /// [default: BOOTSTRAP_ROOT, the binary's repository, or the current directory]
    #[arg(long, value_name = "DIR")]
    pub root: Option<std::path::PathBuf>,
}

impl Cli {
    /// Collect the behavioural flags into [`RunOptions`].
    #[must_use]
    pub const fn run_options(&self) -> RunOptions {
        RunOptions {
            verbose: self.verbose,
            interactive: self.interactive,
            exit_on_error: self.exit_on_error,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_all_off() {
        let cli = Cli::parse_from(["bootstrap"]);
        assert_eq!(cli.run_options(), RunOptions::default());
        assert!(cli.root.is_none());
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["bootstrap", "-v", "-i", "-e", "-d"]);
        let opts = cli.run_options();
        assert!(opts.verbose);
        assert!(opts.interactive);
        assert!(opts.exit_on_error);
        assert!(opts.dry_run);
    }

    #[test]
    fn parse_combined_short_flags() {
        let cli = Cli::parse_from(["bootstrap", "-ved"]);
        let opts = cli.run_options();
        assert!(opts.verbose);
        assert!(!opts.interactive);
        assert!(opts.exit_on_error);
        assert!(opts.dry_run);
    }

    #[test]
    fn parse_long_flags() {
        let cli = Cli::parse_from([
            "bootstrap",
            "--verbose",
            "--interactive",
            "--exit-on-error",
            "--dry-run",
        ]);
        let opts = cli.run_options();
        assert!(opts.verbose && opts.interactive && opts.exit_on_error && opts.dry_run);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["bootstrap", "--root", "/tmp/dotfiles"]);
        assert_eq!(cli.root, Some(std::path::PathBuf::from("/tmp/dotfiles")));
    }

    #[test]
    fn help_explains_interpreter_settings() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("bootstrap.toml"), "{help}");
        assert!(help.contains("interpreter = \"python3\""), "{help}");
        assert!(help.contains("extension = \"py\""), "{help}");
    }

    #[test]
    fn rejects_positional_arguments() {
        let result = Cli::try_parse_from(["bootstrap", "extra"]);
        assert!(result.is_err(), "positional arguments should be rejected");
    }
}
