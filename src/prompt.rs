//! Yes/no confirmation prompts with a default of "yes".
use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::PromptError;

/// Outcome of interpreting a single line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Empty input, `y` or `yes`.
    Confirmed,
    /// `n` or `no`.
    Declined,
    /// Anything else; the caller should ask again.
    Invalid,
}

impl Confirmation {
    /// Interpret raw input, ignoring surrounding whitespace and case.
    ///
    /// ```
    /// use dotfiles_bootstrap::prompt::Confirmation;
    ///
    /// assert_eq!(Confirmation::parse(""), Confirmation::Confirmed);
    /// assert_eq!(Confirmation::parse(" No\n"), Confirmation::Declined);
    /// assert_eq!(Confirmation::parse("maybe"), Confirmation::Invalid);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => Self::Confirmed,
            "n" | "no" => Self::Declined,
            _ => Self::Invalid,
        }
    }
}

/// Source of interactive confirmations.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask `prompt` and return whether the user agreed.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be read or input ends before a
    /// valid answer is given.
    fn confirm(&self, prompt: &str) -> Result<bool, PromptError>;
}

/// [`Prompter`] that reads answers line by line from `input` and writes
/// prompts to `output`, re-asking until the answer is valid.
pub struct ConsolePrompter<R, W> {
    io: RefCell<(R, W)>,
}

impl<R, W> fmt::Debug for ConsolePrompter<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsolePrompter").finish_non_exhaustive()
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    /// Wrap an input/output pair.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn confirm(&self, prompt: &str) -> Result<bool, PromptError> {
        let mut guard = self.io.borrow_mut();
        let (input, output) = &mut *guard;
        loop {
            write!(output, "{prompt} (Y/n): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Err(PromptError::Eof);
            }

            match Confirmation::parse(&line) {
                Confirmation::Confirmed => return Ok(true),
                Confirmation::Declined => return Ok(false),
                Confirmation::Invalid => {
                    writeln!(output, "Invalid input. Please enter 'y' or 'n'.")?;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn answer(input: &str) -> (Result<bool, PromptError>, String) {
        let prompter = ConsolePrompter::new(input.as_bytes(), Vec::new());
        let result = prompter.confirm("Proceed?");
        let (_, output) = prompter.io.into_inner();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parse_accepts_default_and_yes_forms() {
        for input in ["", "\n", "y", "Y", "yes", "YES", "  yes  "] {
            assert_eq!(Confirmation::parse(input), Confirmation::Confirmed, "{input:?}");
        }
    }

    #[test]
    fn parse_accepts_no_forms() {
        for input in ["n", "N", "no", "No\n"] {
            assert_eq!(Confirmation::parse(input), Confirmation::Declined, "{input:?}");
        }
    }

    #[test]
    fn parse_rejects_everything_else() {
        for input in ["yep", "nah", "1", "y n"] {
            assert_eq!(Confirmation::parse(input), Confirmation::Invalid, "{input:?}");
        }
    }

    #[test]
    fn empty_line_means_yes() {
        let (result, output) = answer("\n");
        assert!(result.unwrap());
        assert_eq!(output, "Proceed? (Y/n): ");
    }

    #[test]
    fn no_declines() {
        let (result, _) = answer("no\n");
        assert!(!result.unwrap());
    }

    #[test]
    fn invalid_input_reprompts_until_valid() {
        let (result, output) = answer("what\nmaybe\nn\n");
        assert!(!result.unwrap());
        assert_eq!(output.matches("Proceed? (Y/n): ").count(), 3);
        assert_eq!(output.matches("Invalid input").count(), 2);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let (result, _) = answer("bogus\n");
        assert!(matches!(result, Err(PromptError::Eof)));
    }
}
