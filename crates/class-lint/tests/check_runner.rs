//! Integration tests for [`class_lint::Check`].
//!
//! Paths are relative to the workspace root, as they would be in a
//! downstream test.

use class_lint::{Check, Severity};

const STORE: &str = "crates/class-lint/tests/fixtures/store.json";
const BROKEN: &str = "crates/class-lint/tests/fixtures/broken-store.json";
const STRICT: &str = "crates/class-lint/tests/fixtures/strict.toml";

#[test]
fn clean_snapshot_passes() {
    Check::new().snapshot(STORE).run();
}

#[test]
fn clean_snapshot_counts_classes() {
    let result = Check::new().snapshot(STORE).analyze();
    assert!(result.findings.is_empty());
    assert_eq!(result.classes_checked, 3);
    assert_eq!(result.classes_skipped, 0);
}

#[test]
fn strict_config_flags_observer_session_access() {
    let result = Check::new().snapshot(STORE).config(STRICT).analyze();
    let subjects: Vec<&str> = result
        .findings
        .iter()
        .map(|f| f.violation.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["Acme\\Store\\Observer\\CartSaved"]);
    assert_eq!(result.findings[0].violation.code, "CL002");
}

#[test]
#[should_panic(expected = "class-lint: 1 violation(s)")]
fn strict_preset_fails_run() {
    Check::new().snapshot(STORE).preset("strict").run();
}

#[test]
#[should_panic(expected = "class-lint: 2 violation(s)")]
fn broken_snapshot_fails() {
    Check::new().snapshot(BROKEN).run();
}

#[test]
fn fail_on_threshold_is_respected() {
    let result = Check::new().snapshot(BROKEN).analyze();
    let codes: Vec<&str> = result.findings.iter().map(|f| f.violation.code.as_str()).collect();
    assert_eq!(codes, vec!["CL001", "CL002"]);
    assert!(result.has_violations_at(Severity::Error));
}

#[test]
#[should_panic(expected = "unknown preset")]
fn unknown_preset_panics() {
    Check::new().snapshot(STORE).preset("lenient").run();
}

#[test]
#[should_panic(expected = "duplicate class")]
fn overlapping_snapshots_panic() {
    Check::new().snapshot(STORE).snapshot(STORE).run();
}
