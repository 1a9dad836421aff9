//! Command implementations for the tbcheck CLI

pub mod doctor;
pub mod exec;
pub mod index;
pub mod line_lengths;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Resolves `--root` (default: current directory) to an absolute path.
pub fn resolve_root(root: Option<&str>) -> Result<PathBuf> {
    let root = root.unwrap_or(".");
    std::fs::canonicalize(root)
        .with_context(|| format!("Failed to resolve project root: {}", root))
}

/// Maps a verdict to the process exit code.
pub fn exit_code_for(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Renders `path` relative to `root` when possible.
pub(crate) fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
