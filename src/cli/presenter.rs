//! CLI presenter for log output

use colored::*;

use crate::application::ports::Reporter;

/// Presenter for log lines on stderr
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    debug: bool,
}

impl Presenter {
    /// Create a new presenter; `debug` enables `[debug]` lines
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Format a debug line, or None when debug output is off
    pub fn format_debug(&self, message: &str) -> Option<String> {
        self.debug
            .then(|| format!("{} {}", "[debug]".dimmed(), message))
    }

    /// Print a normal-level line to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Print a debug line to stderr if enabled
    pub fn debug(&self, message: &str) {
        if let Some(line) = self.format_debug(message) {
            eprintln!("{}", line);
        }
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }
}

impl Reporter for Presenter {
    fn info(&self, message: &str) {
        Presenter::info(self, message);
    }

    fn debug(&self, message: &str) {
        Presenter::debug(self, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_lines_hidden_by_default() {
        let presenter = Presenter::default();
        assert!(presenter.format_debug("hello").is_none());
    }

    #[test]
    fn debug_lines_carry_prefix() {
        let presenter = Presenter::new(true);
        let line = presenter.format_debug("clipboard selection empty; waiting").unwrap();
        assert!(line.contains("[debug]"));
        assert!(line.ends_with(" clipboard selection empty; waiting"));
    }
}
