//! Exec command implementation
//!
//! Runs every device test bench in the library and validates the simulator
//! output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use tbcheck_bench::{
    device_worklist, is_passing_summary, BenchPlan, BenchRunner, DeviceReport, DumpMode,
    IcarusConfig, IcarusToolchain, ValidationResult,
};

use super::{display_relative, exit_code_for, resolve_root};
use crate::config::CheckConfig;

/// Options for one `exec` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Run `vvp` with `-none`.
    pub no_dump: bool,
    /// Print per-device progress.
    pub verbose: bool,
    /// Print the verdict as JSON on stdout.
    pub json: bool,
}

/// Run the exec command
///
/// # Arguments
/// * `root` - Project root (default: current directory)
/// * `config_path` - Config file (default: `tbcheck.json` under the root)
/// * `options` - Dump, progress and output options
///
/// # Returns
/// Exit code: 0 if every device passed, 1 otherwise
pub fn run(
    root: Option<&str>,
    config_path: Option<&str>,
    options: ExecOptions,
) -> Result<ExitCode> {
    let root = resolve_root(root)?;
    let config = CheckConfig::load(config_path, &root)?;

    let plan = BenchPlan {
        devices_root: root.join(&config.source_dir),
        support_files: config.support_paths(&root),
        output_dir: root.join(&config.output_dir),
        dump_mode: DumpMode::from_suppress_flag(options.no_dump),
    };

    if options.verbose && !options.json {
        println!(
            "{} {}",
            "Devices:".bold(),
            display_relative(&plan.devices_root, &root)
        );
        println!(
            "{} {}",
            "Output:".bold(),
            display_relative(&plan.output_dir, &root)
        );
    }

    let result = validate_library(plan, &config, options);
    report(&result, options.json)
}

fn validate_library(
    plan: BenchPlan,
    config: &CheckConfig,
    options: ExecOptions,
) -> ValidationResult {
    let toolchain = match IcarusToolchain::resolve(IcarusConfig {
        iverilog: config.iverilog.clone(),
        vvp: config.vvp.clone(),
        dump_mode: plan.dump_mode,
        working_dir: Some(plan.output_dir.clone()),
    }) {
        Ok(toolchain) => toolchain,
        Err(e) => return ValidationResult::failed(e.to_string()),
    };
    log::info!(
        "using {} and {}",
        toolchain.iverilog().display(),
        toolchain.vvp().display()
    );

    let worklist = match device_worklist(&plan.devices_root) {
        Ok(worklist) => worklist,
        Err(e) => return ValidationResult::failed(e.to_string()),
    };
    log::info!("{} devices to validate", worklist.len());

    let show_progress = options.verbose && !options.json;
    BenchRunner::new(plan, &toolchain).run(&worklist, |device| {
        if show_progress {
            print_progress(device);
        }
    })
}

fn print_progress(report: &DeviceReport<'_>) {
    let progress = format!("[{}/{}]", report.index + 1, report.total).cyan().bold();
    println!(
        "{} {} {}",
        progress,
        report.device.path(),
        format!("{} tests", report.tests).green()
    );
}

fn report(result: &ValidationResult, json: bool) -> Result<ExitCode> {
    if json {
        let output =
            serde_json::to_string_pretty(result).context("Failed to serialize verdict")?;
        println!("{}", output);
    }

    let summary = result.emit();
    Ok(exit_code_for(is_passing_summary(&summary)))
}
