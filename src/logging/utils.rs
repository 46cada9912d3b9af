//! Utility functions for path resolution, ANSI stripping, wrapping, and time formatting.
use std::path::PathBuf;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range).
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Return the terminal width in columns.
///
/// Queries the attached terminal, then the `COLUMNS` environment variable,
/// falling back to 80.
#[must_use]
pub fn terminal_columns() -> usize {
    let detected = terminal_size::terminal_size().map(|(w, _)| usize::from(w.0));
    columns_from(detected, std::env::var("COLUMNS").ok().as_deref())
}

fn columns_from(detected: Option<usize>, env: Option<&str>) -> usize {
    detected
        .filter(|&n| n > 0)
        .or_else(|| env.and_then(|v| v.parse::<usize>().ok()).filter(|&n| n > 0))
        .unwrap_or(80)
}

/// Indent every line of `text` by `indent` spaces, hard-wrapping lines so
/// that no output line exceeds `width` columns.
///
/// Surrounding blank lines are trimmed. At least 20 columns of content are
/// kept per line even on very narrow terminals.
///
/// ```
/// use dotfiles_bootstrap::logging::indent_wrapped;
///
/// assert_eq!(indent_wrapped("hello\nworld\n", 4, 80), "    hello\n    world");
/// assert_eq!(indent_wrapped("abcdefghij", 2, 7), "  abcdefghij");
/// ```
#[must_use]
pub fn indent_wrapped(text: &str, indent: usize, width: usize) -> String {
    let pad = " ".repeat(indent);
    let room = width.saturating_sub(indent).max(20);
    let mut lines = Vec::new();
    for line in text.trim().lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(pad.clone());
            continue;
        }
        for chunk in chars.chunks(room) {
            lines.push(format!("{pad}{}", chunk.iter().collect::<String>()));
        }
    }
    lines.join("\n")
}

/// Return the `$XDG_CACHE_HOME/dotfiles/` directory (not created here).
pub(super) fn cache_dir() -> PathBuf {
    let cache_dir = std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    cache_dir.join("dotfiles")
}

/// Return the log file path under `$XDG_CACHE_HOME/dotfiles/` (or `~/.cache/dotfiles/`).
pub(super) fn log_file_path() -> PathBuf {
    cache_dir().join("bootstrap.log")
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mERROR\x1b[0m hello"), "ERROR hello");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mstage\x1b[0m"),
            "==> stage"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_sequences() {
        assert_eq!(strip_ansi("\x1b[2Jhello"), "hello");
        assert_eq!(strip_ansi("\x1b[Kworld"), "world");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn columns_prefers_detected_terminal() {
        assert_eq!(columns_from(Some(132), Some("100")), 132);
    }

    #[test]
    fn columns_falls_back_to_env_then_default() {
        assert_eq!(columns_from(None, Some("120")), 120);
        assert_eq!(columns_from(None, Some("0")), 80);
        assert_eq!(columns_from(None, Some("wide")), 80);
        assert_eq!(columns_from(Some(0), None), 80);
    }

    #[test]
    fn terminal_columns_returns_positive() {
        assert!(terminal_columns() > 0);
    }

    #[test]
    fn indent_wrapped_splits_long_lines() {
        let text = "a".repeat(50);
        let wrapped = indent_wrapped(&text, 4, 24);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("    {}", "a".repeat(20)));
        assert_eq!(lines[2], format!("    {}", "a".repeat(10)));
    }

    #[test]
    fn indent_wrapped_keeps_inner_blank_lines() {
        assert_eq!(indent_wrapped("\none\n\ntwo\n\n", 2, 80), "  one\n  \n  two");
    }

    #[test]
    fn indent_wrapped_empty_text() {
        assert_eq!(indent_wrapped("   \n", 4, 80), "");
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":");
        assert_eq!(&s[5..6], ":");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[10..11], " ");
    }
}
