//! Validation of the test-record sequence reported by one test bench.
//!
//! Test benches number their cases 1..N in order. A case may be split into
//! inner cases 1..M, reported as `<inner>-<outer>`; inner numbering restarts
//! at 1 for each outer case and a group must have more than one member,
//! which catches swapped inner/outer indices.

use crate::classify::{Classifier, LineClass, TestRecord};
use crate::error::{BenchError, BenchResult};

/// Position and label of the last accepted record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviousRecord {
    position: usize,
    label: String,
}

/// Counters for one device's validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceState {
    outer_count: u32,
    inner_count: u32,
    total_line_count: usize,
    previous: Option<PreviousRecord>,
}

impl SequenceState {
    /// Creates the state for a fresh device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current outer (major) case number.
    pub fn outer_count(&self) -> u32 {
        self.outer_count
    }

    /// Current inner (minor) case number; 0 outside a group.
    pub fn inner_count(&self) -> u32 {
        self.inner_count
    }

    /// Number of records accepted so far.
    pub fn test_count(&self) -> usize {
        self.total_line_count
    }

    /// Accepts the record found at `position` in `device`'s output.
    pub fn accept(
        &mut self,
        device: &str,
        position: usize,
        record: &TestRecord<'_>,
    ) -> BenchResult<()> {
        match record.inner {
            None => {
                self.outer_count += 1;
                self.inner_count = 0;

                if record.outer != self.outer_count {
                    return Err(sequence_error(device, position, record));
                }
            }
            Some(inner) => {
                let starts_group = self.inner_count == 0
                    || record.outer == self.outer_count.saturating_add(1);

                if starts_group {
                    self.outer_count += 1;
                    self.close_group(device)?;
                    self.inner_count = 1;
                } else {
                    self.inner_count += 1;
                }

                if record.outer != self.outer_count || inner != self.inner_count {
                    return Err(sequence_error(device, position, record));
                }
            }
        }

        self.total_line_count += 1;
        self.previous = Some(PreviousRecord {
            position,
            label: record.label.to_string(),
        });
        Ok(())
    }

    /// Rejects a group that a new group start closes with a single member.
    /// The error points at that member, not at the record that closed it.
    fn close_group(&self, device: &str) -> BenchResult<()> {
        if self.inner_count != 1 {
            return Ok(());
        }
        match &self.previous {
            Some(prev) => Err(BenchError::GroupSize {
                device: device.to_string(),
                position: prev.position,
                label: prev.label.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn sequence_error(device: &str, position: usize, record: &TestRecord<'_>) -> BenchError {
    BenchError::Sequence {
        device: device.to_string(),
        position,
        label: record.label.to_string(),
    }
}

/// Validates the captured output of one device's test bench and returns the
/// number of passing tests it reported.
pub fn validate_output(device: &str, output: &str, classifier: &Classifier) -> BenchResult<usize> {
    let lines: Vec<&str> = output.lines().collect();
    let last_position = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(0);
    let mut state = SequenceState::new();

    for (position, line) in lines.iter().enumerate() {
        match classifier.classify(line, position, last_position) {
            LineClass::Boundary(kind) => {
                log::trace!("device {}: skipping {:?} line {}", device, kind, position);
            }
            LineClass::Record(record) => state.accept(device, position, &record)?,
            LineClass::Unexpected => {
                return Err(BenchError::UnexpectedLine {
                    device: device.to_string(),
                    position,
                    line: (*line).to_string(),
                });
            }
        }
    }

    Ok(state.test_count())
}

#[cfg(test)]
mod tests;
