//! Final verdict of a test-bench run.

use serde::Serialize;
use std::fmt;

use crate::runner::RunTotals;

/// Prefix of every successful verdict.
pub const PASSED_PREFIX: &str = "Passed";

/// Outcome of a whole run: one verdict, no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Every device validated.
    Passed { devices: usize, tests: usize },
    /// The run stopped at the first error.
    Failed { message: String },
}

impl ValidationResult {
    /// Builds a passing verdict from run totals.
    pub fn passed(totals: RunTotals) -> Self {
        ValidationResult::Passed {
            devices: totals.devices,
            tests: totals.tests,
        }
    }

    /// Builds a failing verdict.
    pub fn failed(message: impl Into<String>) -> Self {
        ValidationResult::Failed {
            message: message.into(),
        }
    }

    /// Returns true for a passing verdict.
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationResult::Passed { .. })
    }

    /// Writes the summary line to stderr and returns it.
    pub fn emit(&self) -> String {
        let summary = self.to_string();
        eprintln!("{}", summary);
        summary
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Passed { devices, tests } => write!(
                f,
                "{}: {} devices {} total tests",
                PASSED_PREFIX, devices, tests
            ),
            ValidationResult::Failed { message } => write!(f, "Failed at: {}", message),
        }
    }
}

/// Returns true when a summary line reports success.
pub fn is_passing_summary(summary: &str) -> bool {
    summary.starts_with(PASSED_PREFIX)
}
