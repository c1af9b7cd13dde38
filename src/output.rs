//! Terminal output for the swatch CLI.
//!
//! Status lines go to stderr in the Cargo style (right-aligned coloured
//! verb). Resolved colours go to stdout so they can be piped.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::coverage::{CoverageReport, Severity};
use crate::types::Colour;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
pub struct Printer {
    /// ANSI colour on stderr
    color: bool,
    /// Truecolor chips on stdout
    chips: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            chips: io::stdout().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color: false,
            chips: false,
        }
    }

    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// A two-cell block painted with `colour`, or nothing without a terminal.
    pub fn chip(&self, colour: Colour) -> String {
        if self.chips {
            format!("\x1b[48;2;{};{};{}m  {RESET} ", colour.r, colour.g, colour.b)
        } else {
            String::new()
        }
    }

    /// One line of resolve output on stdout.
    pub fn resolved(&self, description: &str, colour: Option<Colour>) {
        match colour {
            Some(colour) => println!("{}{}: {}", self.chip(colour), description, colour),
            None => println!("{}: none", description),
        }
    }

    /// Print every diagnostic in a coverage report, then a summary line.
    pub fn coverage(&self, report: &CoverageReport) {
        for d in report.iter() {
            let is_error = d.severity == Severity::Error;
            let label = format!("{}[{}]", d.severity, d.code);
            let label = if self.color {
                let color = if is_error { RED } else { YELLOW };
                format!("{BOLD}{color}{label}{RESET}")
            } else {
                label
            };
            eprintln!("  {}: {}", label, d.message);
            if let Some(help) = &d.help {
                eprintln!("    {}", self.dim(&format!("help: {}", help)));
            }
        }

        let errors = report.error_count();
        let warnings = report.warning_count();
        let summary = format!(
            "scheme '{}' ({}, {})",
            report.scheme,
            plural(errors, "error", "errors"),
            plural(warnings, "warning", "warnings")
        );

        if errors > 0 {
            self.error("Incomplete", &summary);
        } else if warnings > 0 {
            self.warning("Covered", &summary);
        } else {
            self.status("Covered", &format!("scheme '{}'", report.scheme));
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "name", "names")` → "1 name".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "scheme", "schemes"), "1 scheme");
        assert_eq!(plural(0, "scheme", "schemes"), "0 schemes");
        assert_eq!(plural(3, "name", "names"), "3 names");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/path/to/swatch.yaml");
        assert_eq!(display_path(p), "/nonexistent/path/to/swatch.yaml");
    }

    #[test]
    fn test_plain_printer_has_no_escapes() {
        let printer = Printer::plain();
        assert_eq!(printer.chip(Colour::WHITE), "");
        assert_eq!(printer.dim("x"), "x");
    }
}
