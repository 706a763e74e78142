//! Then step definitions
//!
//! Steps that verify the collected report.

use cucumber::{gherkin::Step, then};
use verslag_engine::Status;

use crate::world::VerslagWorld;

// =============================================================================
// Report shape
// =============================================================================

#[then(expr = "the report contains test case {string}")]
fn assert_contains_case(world: &mut VerslagWorld, full_name: String) {
    let snapshot = world.snapshot();
    assert!(
        snapshot.test_case(&full_name).is_some(),
        "Expected test case '{}' in report, found: {:?}",
        full_name,
        snapshot.full_names()
    );
}

#[then(expr = "the report contains {int} test case(s)")]
fn assert_case_count(world: &mut VerslagWorld, count: usize) {
    let snapshot = world.snapshot();
    assert_eq!(
        snapshot.case_count(),
        count,
        "Unexpected case count, found: {:?}",
        snapshot.full_names()
    );
}

// =============================================================================
// Descriptions
// =============================================================================

#[then(expr = "the test case {string} has description {string}")]
fn assert_description(world: &mut VerslagWorld, full_name: String, expected: String) {
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.description.as_deref(),
        Some(expected.as_str()),
        "Unexpected description for '{}'",
        full_name
    );
}

#[then(expr = "the test case {string} has description:")]
fn assert_description_docstring(world: &mut VerslagWorld, full_name: String, step: &Step) {
    let expected = docstring_text(step);
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.description.as_deref(),
        Some(expected.as_str()),
        "Unexpected description for '{}'",
        full_name
    );
}

#[then(expr = "the test case {string} has HTML description {string}")]
fn assert_description_html(world: &mut VerslagWorld, full_name: String, expected: String) {
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.description_html.as_deref(),
        Some(expected.as_str()),
        "Unexpected HTML description for '{}'",
        full_name
    );
}

#[then(expr = "the test case {string} has no description")]
fn assert_no_description(world: &mut VerslagWorld, full_name: String) {
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.description, None,
        "Expected no description for '{}'",
        full_name
    );
}

#[then(expr = "the test case {string} has no HTML description")]
fn assert_no_description_html(world: &mut VerslagWorld, full_name: String) {
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.description_html, None,
        "Expected no HTML description for '{}'",
        full_name
    );
}

// =============================================================================
// Statuses
// =============================================================================

#[then(expr = "the test case {string} has status {string}")]
fn assert_status(world: &mut VerslagWorld, full_name: String, expected: String) {
    let expected = parse_status(&expected);
    let case = expect_case(world, &full_name);
    assert_eq!(
        case.status, expected,
        "Unexpected status for '{}' (details: {:?})",
        full_name, case.status_details
    );
}

#[then(expr = "the test case {string} reports step {string} as {string}")]
fn assert_step_status(world: &mut VerslagWorld, full_name: String, step_name: String, expected: String) {
    let expected = parse_status(&expected);
    let case = expect_case(world, &full_name);
    let record = case
        .steps
        .iter()
        .find(|s| s.name == step_name)
        .unwrap_or_else(|| {
            panic!(
                "Step '{}' not recorded for '{}', found: {:?}",
                step_name,
                full_name,
                case.steps.iter().map(|s| &s.name).collect::<Vec<_>>()
            )
        });
    assert_eq!(
        record.status, expected,
        "Unexpected status for step '{}' of '{}'",
        step_name, full_name
    );
}

#[then(expr = "the test case {string} has a failure message containing {string}")]
fn assert_failure_message(world: &mut VerslagWorld, full_name: String, expected: String) {
    let case = expect_case(world, &full_name);
    let message = case
        .status_details
        .as_ref()
        .and_then(|d| d.message.as_deref())
        .unwrap_or_else(|| panic!("No failure message recorded for '{}'", full_name));
    assert!(
        message.contains(&expected),
        "Expected failure message of '{}' to contain '{}', got '{}'",
        full_name,
        expected,
        message
    );
}

// =============================================================================
// Helpers
// =============================================================================

fn expect_case<'a>(
    world: &'a VerslagWorld,
    full_name: &str,
) -> &'a verslag_engine::TestResult {
    let snapshot = world.snapshot();
    snapshot.test_case(full_name).unwrap_or_else(|| {
        panic!(
            "Expected test case '{}' in report, found: {:?}",
            full_name,
            snapshot.full_names()
        )
    })
}

fn parse_status(s: &str) -> Status {
    match s {
        "passed" => Status::Passed,
        "failed" => Status::Failed,
        "broken" => Status::Broken,
        "skipped" => Status::Skipped,
        other => panic!("Unknown status '{}'", other),
    }
}

/// Docstring content with leading/trailing blank lines stripped and each
/// line trimmed, matching how the engine assembles description text.
fn docstring_text(step: &Step) -> String {
    let raw = step
        .docstring
        .as_ref()
        .unwrap_or_else(|| panic!("step requires a docstring"));
    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    let mut slice: &[&str] = &lines;
    while slice.first().is_some_and(|l| l.is_empty()) {
        slice = &slice[1..];
    }
    while slice.last().is_some_and(|l| l.is_empty()) {
        slice = &slice[..slice.len() - 1];
    }
    slice.join("\n")
}
