//! Error types for the source checks.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for source-check operations.
pub type LintResult<T> = Result<T, LintError>;

/// Errors that prevent a check from producing a verdict.
#[derive(Debug, Error)]
pub enum LintError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory tree could not be walked.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
