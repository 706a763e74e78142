//! Acceptance tests for test-case description resolution.
//!
//! Each test builds a feature document and a binding module, runs them
//! through the harness, and asserts on the description fields of the
//! collected report.

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use verslag_engine::{BindingModule, ScenarioBinding};
use verslag_harness::matchers::{
    assert_description, assert_description_html, assert_no_description, has_test_case,
};
use verslag_harness::{dialect_before, HarnessRunner};

fn run(feature_content: &str, module: BindingModule) -> verslag_harness::ReportSnapshot {
    HarnessRunner::new()
        .run(&[("sample.feature", feature_content)], module)
        .unwrap()
}

#[test]
fn test_description_binding() {
    let feature_content = "
        Feature: Foo

            This will be overwritten by code

            Scenario: Bar

                This will be overwritten by code

                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(ScenarioBinding::new("sample.feature", "Bar").with_description("Lorem Ipsum"))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum");
}

#[test]
fn test_description_at_module_level() {
    let feature_content = "
        Feature: Foo
            Scenario: Bar
                Given noop
    ";
    let module = BindingModule::builder("steps")
        .default_description("Lorem Ipsum")
        .scenarios("sample.feature")
        .step("noop", |_| Ok(()))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum");
}

#[test]
fn test_description_html_binding() {
    let feature_content = "
        Feature: Foo
            Scenario: Bar
                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(
            ScenarioBinding::new("sample.feature", "Bar").with_description_html("Lorem Ipsum"),
        )
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description_html(case, "Lorem Ipsum");
}

#[test]
fn test_description_html_at_module_level() {
    let feature_content = "
        Feature: Foo
            Scenario: Bar
                Given noop
    ";
    let module = BindingModule::builder("steps")
        .default_description_html("Lorem Ipsum")
        .scenarios("sample.feature")
        .step("noop", |_| Ok(()))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description_html(case, "Lorem Ipsum");
}

#[test]
fn test_dynamic_description() {
    let feature_content = "
        Feature: Foo

            This will be overwritten by code

            Scenario: Bar

                This will be overwritten by code

                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(
            ScenarioBinding::new("sample.feature", "Bar")
                .with_description("This will be overwritten by the runtime API")
                .with_body(|ctx| {
                    ctx.set_description("Lorem Ipsum");
                    Ok(())
                }),
        )
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum");
}

#[test]
fn test_dynamic_description_html() {
    let feature_content = "
        Feature: Foo
            Scenario: Bar
                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(
            ScenarioBinding::new("sample.feature", "Bar")
                .with_description_html("This will be overwritten by the runtime API")
                .with_body(|ctx| {
                    ctx.set_description_html("Lorem Ipsum");
                    Ok(())
                }),
        )
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description_html(case, "Lorem Ipsum");
}

#[test]
fn test_scenario_description() {
    if dialect_before(7) {
        eprintln!("skipped: the dialect does not support scenario-level descriptions until v7");
        return;
    }

    let feature_content = "
        Feature: Foo
            Scenario: Bar

                Lorem Ipsum

                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(ScenarioBinding::new("sample.feature", "Bar"))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum");
}

#[test]
fn test_feature_description() {
    let feature_content = "
        Feature: Foo

            Lorem Ipsum

            Scenario: Bar

                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(ScenarioBinding::new("sample.feature", "Bar"))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum");
}

#[test]
fn test_feature_and_scenario_description() {
    if dialect_before(7) {
        eprintln!("skipped: the dialect does not support scenario-level descriptions until v7");
        return;
    }

    let feature_content = "
        Feature: Foo

            Lorem Ipsum

            Scenario: Bar

                Dolor Sit Amet

                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(ScenarioBinding::new("sample.feature", "Bar"))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_description(case, "Lorem Ipsum\n\nDolor Sit Amet");
}

#[test]
fn test_no_description_sources_yields_none() {
    let feature_content = "
        Feature: Foo
            Scenario: Bar
                Given noop
    ";
    let module = BindingModule::builder("steps")
        .step("noop", |_| Ok(()))
        .scenario(ScenarioBinding::new("sample.feature", "Bar"))
        .build();

    let report = run(feature_content, module);

    let case = has_test_case(&report, "sample.feature:Bar");
    assert_no_description(case);
}
