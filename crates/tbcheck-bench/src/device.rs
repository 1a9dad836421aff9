//! Device file naming.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{BenchError, BenchResult};

/// Suffix replacing `.v` for a device's test bench file.
pub const TEST_BENCH_SUFFIX: &str = "-tb.v";

/// Suffix replacing `.v` for a device's compiled simulation artifact.
pub const ARTIFACT_SUFFIX: &str = "-tb.vvp";

fn device_file_regex() -> &'static Regex {
    static DEVICE: OnceLock<Regex> = OnceLock::new();
    DEVICE.get_or_init(|| Regex::new(r"^(.*?([0-9]+[A-Z]?))\.v$").expect("valid regex"))
}

/// A device source file and the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFile {
    path: String,
    number: String,
    test_bench: String,
}

impl DeviceFile {
    /// Parses a device path relative to the devices root, e.g.
    /// `counter/74161.v` or `74H.v`.
    pub fn parse(path: &str) -> BenchResult<Self> {
        let caps = device_file_regex()
            .captures(path)
            .ok_or_else(|| BenchError::UnexpectedFile {
                path: path.to_string(),
            })?;
        let stem = &caps[1];
        Ok(Self {
            path: path.to_string(),
            number: caps[2].to_string(),
            test_bench: format!("{}{}", stem, TEST_BENCH_SUFFIX),
        })
    }

    /// Path of the device file, as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Device designator, e.g. `7400` or `74A`.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Path of the sibling test bench, relative like [`DeviceFile::path`].
    pub fn test_bench(&self) -> &str {
        &self.test_bench
    }

    /// File name of the compiled simulation artifact.
    pub fn artifact_name(&self) -> String {
        format!("{}{}", self.number, ARTIFACT_SUFFIX)
    }
}
