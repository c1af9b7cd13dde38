//! Scheme coverage checks.
//!
//! Resolution reports a missing colour as `None` and carries on. An
//! application that expects a scheme to know every name it uses runs this
//! check up front (at startup, or in `swatch check`) and treats errors as a
//! configuration bug.

use std::fmt;

use crate::error::{Result, SwatchError};
use crate::scheme::{lookup_with_fallback, ColourScheme};
use crate::types::SymbolicName;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single coverage diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code (e.g. "swatch::coverage::missing").
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Diagnostics from checking one scheme.
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    pub scheme: String,
    diagnostics: Vec<Diagnostic>,
}

impl CoverageReport {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// No diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Turn errors into a `SwatchError::Coverage`. Warnings pass.
    pub fn into_result(self) -> Result<()> {
        let missing: Vec<&str> = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(SwatchError::Coverage {
            message: format!("scheme '{}': {}", self.scheme, missing.join("; ")),
            help: Some("Add the missing names to the scheme or to a parent name".to_string()),
        })
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Check that `scheme` resolves every name in `expected`.
///
/// A name with no colour, even after catalog fallback, is an error. A name
/// served only by a shorter ancestor is a warning, since prefix matching
/// being switched off would lose it.
pub fn check_coverage<C, S>(
    scheme_name: &str,
    scheme: &S,
    expected: &[SymbolicName],
) -> CoverageReport
where
    S: ColourScheme<C> + ?Sized,
{
    let mut report = CoverageReport::new(scheme_name);

    for name in expected {
        if scheme.colour_for(name).is_some() {
            continue;
        }

        match lookup_with_fallback(scheme, name) {
            Some((matched, _)) => report.push(
                Diagnostic::warning(
                    "swatch::coverage::fallback",
                    format!("'{}' is only served by '{}'", name, matched),
                )
                .with_help(format!("Define '{}' explicitly", name)),
            ),
            None => report.push(Diagnostic::error(
                "swatch::coverage::missing",
                format!("no colour for '{}'", name),
            )),
        }
    }

    tracing::debug!(
        scheme = scheme_name,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "coverage checked"
    );

    report
}
