//! User-facing messages with quiet and verbose modes.
//!
//! ```
//! use pdfdeck::output::formatter::OutputFormatter;
//!
//! let out = OutputFormatter::new(false, false);
//! out.info("Arranging 3 files");
//! out.success("Wrote merged.pdf");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal};

/// Kind of message, which decides prefix and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Operation finished.
    Success,
    /// Something the user should look at.
    Warning,
    /// Operation failed.
    Error,
    /// Verbose-only detail.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            MessageLevel::Info => "",
            MessageLevel::Success => "✓ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Debug => "→ ",
        }
    }

    fn color(self) -> Option<&'static str> {
        match self {
            MessageLevel::Info => None,
            MessageLevel::Success => Some("\x1b[32m"),
            MessageLevel::Warning => Some("\x1b[33m"),
            MessageLevel::Error => Some("\x1b[31m"),
            MessageLevel::Debug => Some("\x1b[36m"),
        }
    }
}

/// Prints messages honouring quiet and verbose settings.
///
/// Regular output goes to stdout. Warnings and errors go to stderr and are
/// printed even in quiet mode.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter; colour is enabled when stdout is a terminal.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Create a formatter from a run's settings.
    ///
    /// Dry runs always report, so `quiet` is ignored for them. With `json`
    /// set, stdout carries only the JSON document and the formatter is quiet.
    pub fn from_config(config: &Config) -> Self {
        if config.json {
            return Self::quiet();
        }
        Self::new(!config.should_print(), config.verbose)
    }

    /// Formatter that only prints warnings and errors.
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Formatter that also prints debug detail.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print(MessageLevel::Info, message);
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print(MessageLevel::Success, message);
        }
    }

    /// Print a warning, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print(MessageLevel::Warning, message);
    }

    /// Print an error, even in quiet mode.
    pub fn error(&self, message: &str) {
        self.print(MessageLevel::Error, message);
    }

    /// Print a message only in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print(MessageLevel::Debug, message);
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a `label: value` line in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print one already formatted line of a listing.
    pub fn line(&self, text: &str) {
        if !self.quiet {
            println!("  {text}");
        }
    }

    /// Print a blank line.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Whether non-error output is shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Whether verbose output is shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether quiet mode is on.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Render a message the way it will be printed.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        match level.color() {
            Some(color) if self.colored => format!("{color}{prefix}{message}\x1b[0m"),
            _ => format!("{prefix}{message}"),
        }
    }

    fn print(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Warning | MessageLevel::Error => {
                eprintln!("{}", self.render(level, message));
            }
            _ => println!("{}", self.render(level, message)),
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
