//! Per-device driver: find the test bench, run the toolchain, validate the
//! output, and aggregate counts across the worklist.

use std::path::{Path, PathBuf};

use crate::classify::{Classifier, DumpMode};
use crate::device::DeviceFile;
use crate::error::{BenchError, BenchResult};
use crate::report::ValidationResult;
use crate::sequence::validate_output;
use crate::toolchain::{Toolchain, ToolchainInvocation};

/// Fixed locations shared by every device in a run.
#[derive(Debug, Clone)]
pub struct BenchPlan {
    /// Directory the worklist paths are relative to.
    pub devices_root: PathBuf,
    /// Helper sources compiled with every test bench.
    pub support_files: [PathBuf; 2],
    /// Directory receiving one compiled artifact per device.
    pub output_dir: PathBuf,
    /// Banner variant expected on the first output line.
    pub dump_mode: DumpMode,
}

/// Running totals of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Devices whose output validated.
    pub devices: usize,
    /// Passing tests across all devices.
    pub tests: usize,
}

/// Progress notice for one validated device.
#[derive(Debug, Clone, Copy)]
pub struct DeviceReport<'a> {
    /// Zero-based position in the worklist.
    pub index: usize,
    /// Worklist length.
    pub total: usize,
    /// The device just validated.
    pub device: &'a DeviceFile,
    /// Tests it reported.
    pub tests: usize,
}

/// Runs a worklist of devices through a toolchain, one at a time.
#[derive(Debug)]
pub struct BenchRunner<'t, T: Toolchain> {
    plan: BenchPlan,
    toolchain: &'t T,
    classifier: Classifier,
}

impl<'t, T: Toolchain> BenchRunner<'t, T> {
    /// Creates a runner for `plan` using `toolchain`.
    pub fn new(plan: BenchPlan, toolchain: &'t T) -> Self {
        let classifier = Classifier::new(plan.dump_mode);
        Self {
            plan,
            toolchain,
            classifier,
        }
    }

    /// Returns the plan this runner was built with.
    pub fn plan(&self) -> &BenchPlan {
        &self.plan
    }

    /// Runs the worklist and folds any error into a `Failed` result.
    pub fn run<F>(&self, worklist: &[String], on_device: F) -> ValidationResult
    where
        F: FnMut(&DeviceReport<'_>),
    {
        match self.try_run(worklist, on_device) {
            Ok(totals) => ValidationResult::passed(totals),
            Err(err) => {
                log::debug!("run aborted ({}): {}", err.code(), err);
                ValidationResult::failed(err.to_string())
            }
        }
    }

    /// Runs the worklist, stopping at the first error.
    pub fn try_run<F>(&self, worklist: &[String], mut on_device: F) -> BenchResult<RunTotals>
    where
        F: FnMut(&DeviceReport<'_>),
    {
        let mut totals = RunTotals::default();
        let mut output_dir_ready = false;

        for (index, path) in worklist.iter().enumerate() {
            let device = DeviceFile::parse(path)?;

            let test_bench = self.plan.devices_root.join(device.test_bench());
            if !test_bench.is_file() {
                return Err(BenchError::MissingTestBench {
                    path: device.test_bench().to_string(),
                });
            }

            if !output_dir_ready {
                prepare_output_dir(&self.plan.output_dir)?;
                output_dir_ready = true;
            }

            let invocation = ToolchainInvocation {
                device_number: device.number().to_string(),
                test_bench,
                device: self.plan.devices_root.join(device.path()),
                support_files: self.plan.support_files.clone(),
                artifact: self.plan.output_dir.join(device.artifact_name()),
            };

            log::debug!("device {}: running {}", device.number(), device.test_bench());
            let output = self.toolchain.run(&invocation)?;
            let tests = validate_output(device.number(), &output, &self.classifier)?;

            totals.tests += tests;
            totals.devices += 1;
            log::debug!("device {}: {} tests passed", device.number(), tests);

            on_device(&DeviceReport {
                index,
                total: worklist.len(),
                device: &device,
                tests,
            });
        }

        log::info!(
            "{} devices validated, {} tests in total",
            totals.devices,
            totals.tests
        );
        Ok(totals)
    }
}

fn prepare_output_dir(path: &Path) -> BenchResult<()> {
    if path.exists() && !path.is_dir() {
        return Err(BenchError::OutputDir {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "exists but is not a directory",
            ),
        });
    }
    std::fs::create_dir_all(path).map_err(|source| BenchError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
