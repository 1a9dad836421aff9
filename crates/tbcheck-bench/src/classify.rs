//! Classification of simulator output lines.
//!
//! Every line printed by `vvp` for a test bench is one of: boundary noise
//! (the dump banner on the first line, the `$finish` notice on the last
//! line, blank lines), a `Passed: Test ...` record, or something unexpected.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Banner printed when `vvp` opens a VCD dump file.
pub const DUMP_OPENED_MARKER: &str = "opened for output";

/// Banner printed when `vvp` runs with `-none`.
pub const DUMP_SUPPRESSED_MARKER: &str = "dumping is suppressed";

/// Notice printed by `vvp` when the test bench calls `$finish`.
pub const FINISH_MARKER: &str = "$finish called";

fn passed_line_regex() -> &'static Regex {
    static PASSED: OnceLock<Regex> = OnceLock::new();
    PASSED.get_or_init(|| {
        Regex::new(r"^Passed: (Test.*? (?:([0-9]+)-)?([0-9]+)) *$").expect("valid regex")
    })
}

/// Which dump banner the simulator prints on its first output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpMode {
    /// The test bench writes a VCD file.
    #[default]
    Enabled,
    /// The simulator was asked not to write dump files.
    Suppressed,
}

impl DumpMode {
    /// Returns the mode for the `--no-dump` style flag.
    pub fn from_suppress_flag(suppress: bool) -> Self {
        if suppress {
            DumpMode::Suppressed
        } else {
            DumpMode::Enabled
        }
    }

    /// Returns the substring identifying this mode's banner line.
    pub fn banner_marker(&self) -> &'static str {
        match self {
            DumpMode::Enabled => DUMP_OPENED_MARKER,
            DumpMode::Suppressed => DUMP_SUPPRESSED_MARKER,
        }
    }
}

/// One reported passing test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRecord<'a> {
    /// The `Test <label> <indices>` part of the line, used in diagnostics.
    pub label: &'a str,
    /// Major test-case number.
    pub outer: u32,
    /// Minor test-case number within the major case, when present.
    pub inner: Option<u32>,
}

/// Kind of boundary line that is skipped during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Dump banner on the first line.
    Banner,
    /// `$finish` notice on the last line.
    Finish,
    /// Zero-length line.
    Empty,
}

/// Result of classifying one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Noise to skip.
    Boundary(Boundary),
    /// A structured test record.
    Record(TestRecord<'a>),
    /// Anything else.
    Unexpected,
}

/// Classifies simulator output lines for a given dump mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    dump_mode: DumpMode,
}

impl Classifier {
    /// Creates a classifier expecting the banner of `dump_mode`.
    pub fn new(dump_mode: DumpMode) -> Self {
        Self { dump_mode }
    }

    /// Returns the dump mode this classifier expects.
    pub fn dump_mode(&self) -> DumpMode {
        self.dump_mode
    }

    /// Classifies `line`, found at zero-based `position` in output whose
    /// last non-empty line is at `last_position`.
    pub fn classify<'a>(
        &self,
        line: &'a str,
        position: usize,
        last_position: usize,
    ) -> LineClass<'a> {
        if line.is_empty() {
            return LineClass::Boundary(Boundary::Empty);
        }
        if position == 0 && line.contains(self.dump_mode.banner_marker()) {
            return LineClass::Boundary(Boundary::Banner);
        }
        if position == last_position && line.contains(FINISH_MARKER) {
            return LineClass::Boundary(Boundary::Finish);
        }

        parse_record(line).map_or(LineClass::Unexpected, LineClass::Record)
    }
}

/// Parses a `Passed: Test <label> [<inner>-]<outer>` line.
///
/// Returns `None` when the line does not follow the template or an index
/// does not fit in a `u32`.
pub fn parse_record(line: &str) -> Option<TestRecord<'_>> {
    let caps = passed_line_regex().captures(line)?;
    let label = caps.get(1)?.as_str();
    let outer = caps.get(3)?.as_str().parse().ok()?;
    let inner = match caps.get(2) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    Some(TestRecord {
        label,
        outer,
        inner,
    })
}
