//! Error types for the test-bench engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for test-bench engine operations.
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that abort a test-bench run.
///
/// The `Display` text of each variant is the message reported after
/// `Failed at: `.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A worklist entry does not look like a device file.
    #[error("Unexpected file: {path}")]
    UnexpectedFile { path: String },

    /// The sibling test bench of a device file does not exist.
    #[error("No test bench file: {path}")]
    MissingTestBench { path: String },

    /// A line of simulator output is neither boundary noise nor a test record.
    #[error("Device {device} Output Line {position} {line}")]
    UnexpectedLine {
        device: String,
        position: usize,
        line: String,
    },

    /// A test record's indices do not follow the expected sequence.
    #[error("Test number sequence incorrect: Device {device} Output Line {position} {label}")]
    Sequence {
        device: String,
        position: usize,
        label: String,
    },

    /// A group of inner tests closed with a single member.
    #[error(
        "Group consists of only one test (or minor/major index numbers are swapped): Device {device} Output Line {position} {label}"
    )]
    GroupSize {
        device: String,
        position: usize,
        label: String,
    },

    /// The external toolchain could not produce output.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// The output directory could not be prepared.
    #[error("Cannot prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device tree could not be enumerated.
    #[error("Cannot enumerate devices under {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl BenchError {
    /// Short, stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            BenchError::UnexpectedFile { .. } => "BENCH_001",
            BenchError::MissingTestBench { .. } => "BENCH_002",
            BenchError::UnexpectedLine { .. } => "BENCH_003",
            BenchError::Sequence { .. } => "BENCH_004",
            BenchError::GroupSize { .. } => "BENCH_005",
            BenchError::Toolchain(_) => "BENCH_006",
            BenchError::OutputDir { .. } => "BENCH_007",
            BenchError::Walk { .. } => "BENCH_008",
        }
    }
}

/// Errors raised by a toolchain invocation.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// A toolchain executable could not be located.
    #[error("{tool} executable not found. Ensure Icarus Verilog is installed and in PATH, or set {env_var}")]
    NotFound {
        tool: &'static str,
        env_var: &'static str,
    },

    /// A toolchain process could not be spawned.
    #[error("Failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The compile stage exited with a non-zero status.
    #[error("Compile failed for {device} (exit status {exit_code}): {stderr}")]
    CompileFailed {
        device: String,
        exit_code: i32,
        stderr: String,
    },

    /// The simulation stage exited with a non-zero status.
    #[error("Simulation failed for {device} (exit status {exit_code}): {stderr}")]
    SimulationFailed {
        device: String,
        exit_code: i32,
        stderr: String,
    },
}
