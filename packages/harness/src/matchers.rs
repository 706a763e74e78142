//! Report matchers
//!
//! Assertion helpers over a collected [`ReportSnapshot`]. Each matcher
//! panics with a diagnostic message on mismatch, so acceptance tests read
//! as a straight sequence of expectations.

// Assertion helpers panic by design; they only run inside test processes.
#![allow(clippy::panic)]

use crate::runner::ReportSnapshot;
use verslag_engine::{Status, TestResult};

/// Assert that the snapshot contains the given case and return it.
///
/// # Panics
///
/// Panics if no case with that full name was collected, listing the names
/// that were.
#[track_caller]
pub fn has_test_case<'a>(snapshot: &'a ReportSnapshot, full_name: &str) -> &'a TestResult {
    match snapshot.test_case(full_name) {
        Some(case) => case,
        None => panic!(
            "Expected test case '{}' in report, found: {:?}",
            full_name,
            snapshot.full_names()
        ),
    }
}

/// Assert the case's plain-text description equals the expected text.
#[track_caller]
pub fn assert_description(case: &TestResult, expected: &str) {
    assert_eq!(
        case.description.as_deref(),
        Some(expected),
        "Unexpected description for '{}'",
        case.full_name
    );
}

/// Assert the case has no plain-text description at all.
#[track_caller]
pub fn assert_no_description(case: &TestResult) {
    assert_eq!(
        case.description, None,
        "Expected no description for '{}'",
        case.full_name
    );
}

/// Assert the case's HTML description equals the expected markup.
#[track_caller]
pub fn assert_description_html(case: &TestResult, expected: &str) {
    assert_eq!(
        case.description_html.as_deref(),
        Some(expected),
        "Unexpected HTML description for '{}'",
        case.full_name
    );
}

/// Assert the case has no HTML description at all.
#[track_caller]
pub fn assert_no_description_html(case: &TestResult) {
    assert_eq!(
        case.description_html, None,
        "Expected no HTML description for '{}'",
        case.full_name
    );
}

/// Assert the case finished with the expected status.
#[track_caller]
pub fn assert_status(case: &TestResult, expected: Status) {
    assert_eq!(
        case.status, expected,
        "Unexpected status for '{}' (details: {:?})",
        case.full_name, case.status_details
    );
}
