use super::*;
use crate::classify::DumpMode;
use pretty_assertions::assert_eq;

fn validate(output: &str) -> BenchResult<usize> {
    validate_output("7400", output, &Classifier::new(DumpMode::Enabled))
}

#[test]
fn test_outer_only_sequence_passes() {
    let output = "Passed: Test 1\nPassed: Test 2\nPassed: Test 3\n";
    assert_eq!(validate(output).unwrap(), 3);
}

#[test]
fn test_outer_gap_is_sequence_error() {
    let output = "Passed: Test 1\nPassed: Test 3\n";
    match validate(output) {
        Err(BenchError::Sequence {
            device,
            position,
            label,
        }) => {
            assert_eq!(device, "7400");
            assert_eq!(position, 1);
            assert_eq!(label, "Test 3");
        }
        other => panic!("expected sequence error, got {:?}", other),
    }
}

#[test]
fn test_outer_repeat_is_sequence_error() {
    let output = "Passed: Test 1\nPassed: Test 2\nPassed: Test 2\n";
    let err = validate(output).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Test number sequence incorrect: Device 7400 Output Line 2 Test 2"
    );
}

#[test]
fn test_outer_must_start_at_one() {
    let err = validate("Passed: Test 2\n").unwrap_err();
    assert!(matches!(err, BenchError::Sequence { position: 0, .. }));
}

#[test]
fn test_two_groups_of_two_pass() {
    let output = "Passed: Test 1-1\nPassed: Test 2-1\nPassed: Test 1-2\nPassed: Test 2-2\n";
    assert_eq!(validate(output).unwrap(), 4);
}

#[test]
fn test_groups_mixed_with_outer_records() {
    let output = "\
Passed: Test Reset 1
Passed: Test Count 1-2
Passed: Test Count 2-2
Passed: Test Count 3-2
Passed: Test Hold 3
Passed: Test Load 1-4
Passed: Test Load 2-4
";
    assert_eq!(validate(output).unwrap(), 7);
}

#[test]
fn test_single_member_group_closed_by_new_group() {
    let output = "Passed: Test 1-1\nPassed: Test 1-2\nPassed: Test 2-2\n";
    match validate(output) {
        Err(BenchError::GroupSize {
            position, label, ..
        }) => {
            assert_eq!(position, 0);
            assert_eq!(label, "Test 1-1");
        }
        other => panic!("expected group size error, got {:?}", other),
    }
}

#[test]
fn test_outer_record_after_single_member_group_passes() {
    let output = "Passed: Test 1\nPassed: Test A 1-2\nPassed: Test 3\n";
    assert_eq!(validate(output).unwrap(), 3);

    let output = "Passed: Test 1-1\nPassed: Test 2\n";
    assert_eq!(validate(output).unwrap(), 2);
}

#[test]
fn test_group_size_error_points_past_blank_lines() {
    let output = "Passed: Test 1-1\n\nPassed: Test 1-2\n";
    let err = validate(output).unwrap_err();
    assert!(matches!(err, BenchError::GroupSize { position: 0, .. }));
}

#[test]
fn test_inner_gap_is_sequence_error() {
    let output = "Passed: Test 1-1\nPassed: Test 3-1\n";
    match validate(output) {
        Err(BenchError::Sequence { position, label, .. }) => {
            assert_eq!(position, 1);
            assert_eq!(label, "Test 3-1");
        }
        other => panic!("expected sequence error, got {:?}", other),
    }
}

#[test]
fn test_inner_must_start_at_one() {
    let err = validate("Passed: Test 2-1\n").unwrap_err();
    assert!(matches!(err, BenchError::Sequence { position: 0, .. }));
}

#[test]
fn test_swapped_indices_are_reported() {
    // 1-1, 1-2, 1-3 is what a bench with swapped indices prints for three
    // outer cases; the first group has a single member.
    let output = "Passed: Test 1-1\nPassed: Test 1-2\nPassed: Test 1-3\n";
    assert!(matches!(
        validate(output).unwrap_err(),
        BenchError::GroupSize { position: 0, .. }
    ));
}

#[test]
fn test_trailing_single_member_group_is_accepted() {
    let output = "Passed: Test 1-1\nPassed: Test 2-1\nPassed: Test 1-2\n";
    assert_eq!(validate(output).unwrap(), 3);
}

#[test]
fn test_boundary_lines_are_not_counted() {
    let output = "\
VCD info: dumpfile 7400-tb.vcd opened for output.
Passed: Test 1

Passed: Test 2
7400-tb.v:120: $finish called at 2000 (1ps)
";
    assert_eq!(validate(output).unwrap(), 2);
}

#[test]
fn test_finish_line_before_trailing_blank_lines() {
    let output = "Passed: Test 1\n$finish called at 10\n\n\n";
    assert_eq!(validate(output).unwrap(), 1);
}

#[test]
fn test_crlf_output() {
    let output = "Passed: Test 1\r\nPassed: Test 2\r\n";
    assert_eq!(validate(output).unwrap(), 2);
}

#[test]
fn test_unexpected_line_reports_raw_text() {
    let output = "Passed: Test 1\nPassed: something\n";
    match validate(output) {
        Err(BenchError::UnexpectedLine {
            device,
            position,
            line,
        }) => {
            assert_eq!(device, "7400");
            assert_eq!(position, 1);
            assert_eq!(line, "Passed: something");
        }
        other => panic!("expected unexpected line error, got {:?}", other),
    }
}

#[test]
fn test_misplaced_finish_line_is_unexpected() {
    let output = "$finish called at 10\nPassed: Test 1\n";
    assert!(matches!(
        validate(output).unwrap_err(),
        BenchError::UnexpectedLine { position: 0, .. }
    ));
}

#[test]
fn test_empty_output_has_no_tests() {
    assert_eq!(validate("").unwrap(), 0);
}

#[test]
fn test_state_counters_follow_records() {
    let mut state = SequenceState::new();
    let first = TestRecord {
        label: "Test 1-1",
        outer: 1,
        inner: Some(1),
    };
    let second = TestRecord {
        label: "Test 2-1",
        outer: 1,
        inner: Some(2),
    };
    state.accept("74", 0, &first).unwrap();
    state.accept("74", 1, &second).unwrap();
    assert_eq!(state.outer_count(), 1);
    assert_eq!(state.inner_count(), 2);
    assert_eq!(state.test_count(), 2);
}
