//! Source checks for a Verilog device library.
//!
//! Two checks complement the test-bench engine: the device index must list
//! every device file exactly once, and source lines must stay within a
//! maximum length.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tbcheck_lint::{line_length_files, tb_assert_exemption, LineLengthCheck};
//!
//! let root = Path::new(".");
//! let excluded = vec!["helper.v".to_string(), "tbhelper.v".to_string()];
//! let files = line_length_files(root, &root.join("source-7400"), &excluded).unwrap();
//!
//! let report = LineLengthCheck::new(100)
//!     .with_filter(tb_assert_exemption())
//!     .check(root, &files)
//!     .unwrap();
//! report.emit();
//! ```

pub mod editorconfig;
pub mod error;
pub mod files;
pub mod index;
pub mod line_length;
pub mod report;

pub use error::{LintError, LintResult};
pub use index::{check_index_contents, find_index_problem, indexed_device_files, IndexProblem};
pub use line_length::{
    line_length_files, tb_assert_exemption, LineFilter, LineLengthCheck, LineLengthViolation,
};
pub use report::{CheckReport, LineDiagnostic};
