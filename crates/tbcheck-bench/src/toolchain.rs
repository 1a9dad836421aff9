//! External compile-and-simulate toolchain.
//!
//! The engine only needs "give me the simulator's output for this device",
//! expressed by the [`Toolchain`] trait. [`IcarusToolchain`] implements it
//! with `iverilog` followed by `vvp`; tests use closures returning canned
//! text.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::classify::DumpMode;
use crate::error::ToolchainError;

/// Environment variable overriding the `iverilog` executable.
pub const IVERILOG_ENV: &str = "TBCHECK_IVERILOG";

/// Environment variable overriding the `vvp` executable.
pub const VVP_ENV: &str = "TBCHECK_VVP";

/// Everything needed to build and run one device's test bench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInvocation {
    /// Device designator, used in error messages.
    pub device_number: String,
    /// Test bench source.
    pub test_bench: PathBuf,
    /// Device source.
    pub device: PathBuf,
    /// Shared helper sources compiled ahead of the test bench.
    pub support_files: [PathBuf; 2],
    /// Compiled simulation artifact to write.
    pub artifact: PathBuf,
}

/// Produces the captured output of a test bench run.
pub trait Toolchain {
    /// Compiles and simulates `invocation`, returning captured stdout.
    fn run(&self, invocation: &ToolchainInvocation) -> Result<String, ToolchainError>;
}

impl<F> Toolchain for F
where
    F: Fn(&ToolchainInvocation) -> Result<String, ToolchainError>,
{
    fn run(&self, invocation: &ToolchainInvocation) -> Result<String, ToolchainError> {
        self(invocation)
    }
}

/// Executable overrides and run options for [`IcarusToolchain`].
#[derive(Debug, Clone, Default)]
pub struct IcarusConfig {
    /// Explicit `iverilog` path.
    pub iverilog: Option<PathBuf>,
    /// Explicit `vvp` path.
    pub vvp: Option<PathBuf>,
    /// Whether `vvp` should write dump files.
    pub dump_mode: DumpMode,
    /// Working directory for both stages; dump files land here.
    pub working_dir: Option<PathBuf>,
}

/// Icarus Verilog: `iverilog -g2012` then `vvp`.
#[derive(Debug, Clone)]
pub struct IcarusToolchain {
    iverilog: PathBuf,
    vvp: PathBuf,
    dump_mode: DumpMode,
    working_dir: Option<PathBuf>,
}

impl IcarusToolchain {
    /// Resolves both executables and builds the toolchain.
    pub fn resolve(config: IcarusConfig) -> Result<Self, ToolchainError> {
        let iverilog = find_executable(config.iverilog.as_deref(), IVERILOG_ENV, "iverilog")?;
        let vvp = find_executable(config.vvp.as_deref(), VVP_ENV, "vvp")?;
        Ok(Self {
            iverilog,
            vvp,
            dump_mode: config.dump_mode,
            working_dir: config.working_dir,
        })
    }

    /// Resolved `iverilog` path.
    pub fn iverilog(&self) -> &Path {
        &self.iverilog
    }

    /// Resolved `vvp` path.
    pub fn vvp(&self) -> &Path {
        &self.vvp
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.stdin(Stdio::null());
        if let Some(ref cwd) = self.working_dir {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

impl Toolchain for IcarusToolchain {
    fn run(&self, invocation: &ToolchainInvocation) -> Result<String, ToolchainError> {
        let mut compile = self.command(&self.iverilog);
        compile
            .arg("-g2012")
            .arg("-o")
            .arg(&invocation.artifact)
            .args(&invocation.support_files)
            .arg(&invocation.test_bench)
            .arg(&invocation.device);
        log::debug!("compiling: {:?}", compile);

        let compiled = run_captured(&mut compile, &self.iverilog)?;
        if !compiled.status.success() {
            return Err(ToolchainError::CompileFailed {
                device: invocation.device_number.clone(),
                exit_code: compiled.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&compiled.stderr).to_string(),
            });
        }

        let mut simulate = self.command(&self.vvp);
        simulate.arg(&invocation.artifact);
        if self.dump_mode == DumpMode::Suppressed {
            simulate.arg("-none");
        }
        log::debug!("simulating: {:?}", simulate);

        let simulated = run_captured(&mut simulate, &self.vvp)?;
        if !simulated.status.success() {
            return Err(ToolchainError::SimulationFailed {
                device: invocation.device_number.clone(),
                exit_code: simulated.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&simulated.stderr).to_string(),
            });
        }

        let mut stdout = String::from_utf8_lossy(&compiled.stdout).to_string();
        stdout.push_str(&String::from_utf8_lossy(&simulated.stdout));
        Ok(stdout)
    }
}

fn run_captured(cmd: &mut Command, program: &Path) -> Result<Output, ToolchainError> {
    cmd.output().map_err(|source| ToolchainError::SpawnFailed {
        tool: program.display().to_string(),
        source,
    })
}

/// Finds a toolchain executable: explicit path, then environment variable,
/// then `PATH`.
pub fn find_executable(
    explicit: Option<&Path>,
    env_var: &'static str,
    name: &'static str,
) -> Result<PathBuf, ToolchainError> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        log::warn!("configured {} not found at {}", name, path.display());
    }

    if let Ok(path) = std::env::var(env_var) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        log::warn!("{} points at missing file {}", env_var, path.display());
    }

    which::which(name).map_err(|_| ToolchainError::NotFound {
        tool: name,
        env_var,
    })
}
