//! Check verdicts with optional per-line diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single offending line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// 1-based line number.
    pub line: usize,
    /// Line text, possibly truncated.
    pub text: String,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} {}", self.line, self.text)
    }
}

/// Verdict of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Whether the check passed.
    pub passed: bool,
    /// `Passed: ...` or `Failed at: ...`.
    pub summary: String,
    /// Offending lines behind a failure, if the check reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<LineDiagnostic>,
}

impl CheckReport {
    /// Creates a passing report; `what` follows `Passed: `.
    pub fn passed(what: impl fmt::Display) -> Self {
        Self {
            passed: true,
            summary: format!("Passed: {}", what),
            diagnostics: Vec::new(),
        }
    }

    /// Creates a failing report; `at` follows `Failed at: `.
    pub fn failed(at: impl fmt::Display) -> Self {
        Self {
            passed: false,
            summary: format!("Failed at: {}", at),
            diagnostics: Vec::new(),
        }
    }

    /// Attaches line diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Vec<LineDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Writes the summary and diagnostics to stderr and returns the summary.
    pub fn emit(&self) -> &str {
        eprintln!("{}", self.summary);
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
        &self.summary
    }
}
