//! Given step definitions
//!
//! Steps that assemble the feature documents and binding module under test.

use cucumber::{gherkin::Step, given};

use crate::world::{BindingDecl, VerslagWorld};

// =============================================================================
// Feature documents
// =============================================================================

#[given(expr = "a feature file {string}:")]
fn add_feature_file(world: &mut VerslagWorld, name: String, step: &Step) {
    let body = step
        .docstring
        .clone()
        .unwrap_or_else(|| panic!("step 'a feature file {name}:' requires a docstring body"));
    world.features.push((name, body));
}

// =============================================================================
// Step definitions
// =============================================================================

#[given(expr = "a passing step {string}")]
fn add_passing_step(world: &mut VerslagWorld, text: String) {
    world.passing_steps.push(text);
}

#[given(expr = "a failing step {string} with message {string}")]
fn add_failing_step(world: &mut VerslagWorld, text: String, message: String) {
    world.failing_steps.push((text, message));
}

// =============================================================================
// Scenario bindings
// =============================================================================

#[given(expr = "a binding for scenario {string} in {string}")]
fn add_binding(world: &mut VerslagWorld, scenario: String, feature: String) {
    world.bindings.push(BindingDecl {
        feature,
        scenario,
        ..BindingDecl::default()
    });
}

#[given(expr = "the binding declares description {string}")]
fn binding_description(world: &mut VerslagWorld, description: String) {
    world.last_binding_mut().description = Some(description);
}

#[given(expr = "the binding declares HTML description {string}")]
fn binding_description_html(world: &mut VerslagWorld, description: String) {
    world.last_binding_mut().description_html = Some(description);
}

#[given(expr = "the binding sets dynamic description {string} at runtime")]
fn binding_dynamic_description(world: &mut VerslagWorld, description: String) {
    world.last_binding_mut().dynamic_description = Some(description);
}

#[given(expr = "the binding sets dynamic HTML description {string} at runtime")]
fn binding_dynamic_description_html(world: &mut VerslagWorld, description: String) {
    world.last_binding_mut().dynamic_description_html = Some(description);
}

// =============================================================================
// Module-level declarations
// =============================================================================

#[given(expr = "the module binds every scenario of {string}")]
fn module_binds_all(world: &mut VerslagWorld, feature: String) {
    world.bind_all.push(feature);
}

#[given(expr = "the module declares default description {string}")]
fn module_default_description(world: &mut VerslagWorld, description: String) {
    world.default_description = Some(description);
}

#[given(expr = "the module declares default HTML description {string}")]
fn module_default_description_html(world: &mut VerslagWorld, description: String) {
    world.default_description_html = Some(description);
}
