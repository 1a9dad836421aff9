//! Test-bench verification engine for tbcheck.
//!
//! For each device file in a worklist, the engine locates the sibling test
//! bench, runs it through the compile-and-simulate toolchain, and checks that
//! the simulator reported its `Passed: Test ...` lines in the expected order.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tbcheck_bench::{device_worklist, BenchPlan, BenchRunner, DumpMode};
//! use tbcheck_bench::{IcarusConfig, IcarusToolchain};
//!
//! let plan = BenchPlan {
//!     devices_root: PathBuf::from("source-7400"),
//!     support_files: [
//!         PathBuf::from("includes/helper.v"),
//!         PathBuf::from("includes/tbhelper.v"),
//!     ],
//!     output_dir: PathBuf::from("target/tbcheck"),
//!     dump_mode: DumpMode::Enabled,
//! };
//! let toolchain = IcarusToolchain::resolve(IcarusConfig::default()).unwrap();
//! let worklist = device_worklist(&plan.devices_root).unwrap();
//!
//! let result = BenchRunner::new(plan, &toolchain).run(&worklist, |_| {});
//! result.emit();
//! ```

pub mod classify;
pub mod device;
pub mod error;
pub mod report;
pub mod runner;
pub mod sequence;
pub mod toolchain;
pub mod worklist;

pub use classify::{Boundary, Classifier, DumpMode, LineClass, TestRecord};
pub use device::DeviceFile;
pub use error::{BenchError, BenchResult, ToolchainError};
pub use report::{is_passing_summary, ValidationResult};
pub use runner::{BenchPlan, BenchRunner, DeviceReport, RunTotals};
pub use sequence::{validate_output, SequenceState};
pub use toolchain::{IcarusConfig, IcarusToolchain, Toolchain, ToolchainInvocation};
pub use worklist::device_worklist;
