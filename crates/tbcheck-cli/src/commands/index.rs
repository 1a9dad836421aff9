//! Index command implementation
//!
//! Checks the device index against the device files on disk.

use anyhow::{Context, Result};
use std::process::ExitCode;

use tbcheck_lint::{check_index_contents, indexed_device_files, CheckReport};

use super::{exit_code_for, resolve_root};
use crate::config::CheckConfig;

/// Run the index command
///
/// # Returns
/// Exit code: 0 if the index lists every device exactly once, 1 otherwise
pub fn run(root: Option<&str>, config_path: Option<&str>, json: bool) -> Result<ExitCode> {
    let root = resolve_root(root)?;
    let config = CheckConfig::load(config_path, &root)?;

    let index_path = root.join(&config.index_file);
    let index_text = std::fs::read_to_string(&index_path)
        .with_context(|| format!("Failed to read index file: {}", index_path.display()))?;

    let devices = indexed_device_files(&root, &config.index_ignored_dirs)?;
    log::debug!("{} device files on disk", devices.len());

    let report = check_index_contents(&index_text, &devices);
    emit(&report, json)
}

/// Prints a lint verdict and maps it to an exit code.
pub(crate) fn emit(report: &CheckReport, json: bool) -> Result<ExitCode> {
    if json {
        let output =
            serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", output);
    }
    report.emit();
    Ok(exit_code_for(report.passed))
}
