//! Doctor command implementation
//!
//! Checks that the simulation toolchain can be found and runs.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use tbcheck_bench::toolchain::{find_executable, IVERILOG_ENV, VVP_ENV};

use super::resolve_root;
use crate::config::CheckConfig;

/// Run the doctor command
///
/// Checks:
/// - `iverilog` resolution and version
/// - `vvp` resolution and version
/// - Support files under the project root
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(root: Option<&str>, config_path: Option<&str>) -> Result<ExitCode> {
    let root = resolve_root(root)?;
    let config = CheckConfig::load(config_path, &root)?;

    println!("{}", "tbcheck Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!(
        "  {} tbcheck-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    let mut all_ok = true;

    println!("{}", "Toolchain:".bold());
    for (name, explicit, env_var) in [
        ("iverilog", config.iverilog.as_deref(), IVERILOG_ENV),
        ("vvp", config.vvp.as_deref(), VVP_ENV),
    ] {
        match check_tool(name, explicit, env_var) {
            ToolStatus::Found { path, version } => {
                println!(
                    "  {} {} {} ({})",
                    "ok".green(),
                    name,
                    version,
                    path.display()
                );
            }
            ToolStatus::NotFound(e) => {
                println!("  {} {}", "!!".red(), e);
                println!(
                    "     {}",
                    "Icarus Verilog is required to run test benches.".dimmed()
                );
                all_ok = false;
            }
            ToolStatus::Error { path, message } => {
                println!(
                    "  {} {} check failed ({}): {}",
                    "!!".red(),
                    name,
                    path.display(),
                    message
                );
                all_ok = false;
            }
        }
    }
    println!();

    println!("{}", "Project:".bold());
    for path in config.support_paths(&root) {
        if path.is_file() {
            println!("  {} {}", "ok".green(), path.display());
        } else {
            println!("  {} Support file missing: {}", "!!".yellow(), path.display());
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Status of one toolchain executable
enum ToolStatus {
    Found { path: PathBuf, version: String },
    NotFound(String),
    Error { path: PathBuf, message: String },
}

fn check_tool(name: &'static str, explicit: Option<&Path>, env_var: &'static str) -> ToolStatus {
    let path = match find_executable(explicit, env_var, name) {
        Ok(path) => path,
        Err(e) => return ToolStatus::NotFound(e.to_string()),
    };

    match Command::new(&path).arg("-V").output() {
        Ok(output) => {
            // Exit status is ignored; `-V` alone exits non-zero on some builds.
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = parse_icarus_version(&stdout).unwrap_or_else(|| "unknown".to_string());
            ToolStatus::Found { path, version }
        }
        Err(e) => ToolStatus::Error {
            path,
            message: e.to_string(),
        },
    }
}

/// Extracts the version from output like
/// `Icarus Verilog version 12.0 (stable) ()`.
fn parse_icarus_version(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (_, rest) = line.split_once(" version ")?;
        rest.split_whitespace().next().map(|v| v.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_icarus_version() {
        let out = "Icarus Verilog version 12.0 (stable) ()\n\nCopyright 1998-2020 Stephen Williams\n";
        assert_eq!(parse_icarus_version(out).as_deref(), Some("12.0"));

        let vvp = "Icarus Verilog runtime version 11.0 (stable) ()\n";
        assert_eq!(parse_icarus_version(vvp).as_deref(), Some("11.0"));

        assert_eq!(parse_icarus_version("usage: vvp\n"), None);
    }
}
