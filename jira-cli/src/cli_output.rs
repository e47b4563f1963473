// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Errors, warnings, hints and success notes go to stderr so stdout stays pipeable

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Decide whether to emit ANSI colours: never with `--no-color` or `NO_COLOR`,
/// otherwise only when stdout is a terminal.
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag
        && std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stdout().is_terminal()
}

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.tagged("warning:", message, Tag::Warning));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.tagged("info:", message, Tag::Info));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.tagged("success:", message, Tag::Success));
    }

    /// Follow-up advice printed under an error
    pub fn hint(&self, message: &str) {
        eprintln!("{}", self.tagged("hint:", message, Tag::Hint));
    }

    pub fn render_error(&self, message: &str) -> String {
        self.tagged("error:", message, Tag::Error)
    }

    fn tagged(&self, tag: &str, message: &str, kind: Tag) -> String {
        if !self.use_color {
            return format!("{} {}", tag, message);
        }

        let tag = match kind {
            Tag::Error => tag.red().bold().to_string(),
            Tag::Warning => tag.yellow().bold().to_string(),
            Tag::Info => tag.blue().bold().to_string(),
            Tag::Success => tag.green().bold().to_string(),
            Tag::Hint => tag.dimmed().to_string(),
        };
        format!("{} {}", tag, message)
    }
}

#[derive(Clone, Copy)]
enum Tag {
    Error,
    Warning,
    Info,
    Success,
    Hint,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
