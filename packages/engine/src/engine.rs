//! Scenario execution
//!
//! [`ScenarioEngine`] executes a single scenario against a binding module
//! and produces the [`TestResult`] record for it:
//!
//! - each step line is dispatched to the module's step definitions;
//! - the binding's scenario body (if any) runs after the steps;
//! - both description channels are resolved (see [`crate::description`]);
//! - step timing, case timing, labels and failure details are recorded.
//!
//! Execution failures never escape as errors: they are captured in the
//! result record (`Failed` for handler errors, `Broken` for unbound steps)
//! so one bad scenario cannot abort the rest of the run.

use crate::binding::{BindingModule, ScenarioBinding};
use crate::config;
use crate::context::ScenarioContext;
use crate::description::{document_text, DescriptionSources, ResolvedDescription};
use crate::error::EngineError;
use crate::feature::{Feature, Scenario};
use crate::ident::{history_id, CaseId};
use crate::report::{unix_millis, StatusDetails, StepRecord, TestResult};
use crate::types::{Label, Status};

/// Executes one scenario of one feature document.
pub struct ScenarioEngine<'a> {
    /// Feature document owning the scenario
    feature: &'a Feature,
    /// Scenario to execute
    scenario: &'a Scenario,
    /// Step definitions and module-level defaults
    module: &'a BindingModule,
}

impl<'a> ScenarioEngine<'a> {
    /// Create an engine for the given scenario.
    ///
    /// # Arguments
    /// * `feature` - Feature document owning the scenario
    /// * `scenario` - Scenario to execute
    /// * `module` - Binding module providing step definitions and defaults
    pub fn new(feature: &'a Feature, scenario: &'a Scenario, module: &'a BindingModule) -> Self {
        Self {
            feature,
            scenario,
            module,
        }
    }

    /// Execute the scenario and produce its result record.
    ///
    /// `binding` carries the scenario-level static descriptions and body;
    /// it is `None` for scenarios bound wholesale through
    /// [`BindingModule::bind_all`].
    pub fn execute(&self, binding: Option<&ScenarioBinding>) -> TestResult {
        let case = CaseId::new(&self.feature.source, &self.scenario.name);
        let full_name = case.full_name();
        tracing::debug!(case = %full_name, "Executing scenario");

        let mut context = ScenarioContext::new(case);
        let start = unix_millis();

        let (status, status_details, steps) = self.run_steps(&mut context);
        let (status, status_details) = self.run_body(binding, &mut context, status, status_details);

        let resolved = self.resolve_descriptions(binding, &context);
        let stop = unix_millis();

        TestResult {
            uuid: uuid::Uuid::new_v4().to_string(),
            history_id: history_id(&full_name),
            name: self.scenario.name.clone(),
            full_name,
            status,
            status_details,
            description: clamp_description(resolved.description),
            description_html: clamp_description(resolved.description_html),
            steps,
            labels: self.labels(),
            start,
            stop,
        }
    }

    /// Dispatch every step line; once a step does not pass, the remaining
    /// steps are recorded as skipped.
    fn run_steps(
        &self,
        context: &mut ScenarioContext,
    ) -> (Status, Option<StatusDetails>, Vec<StepRecord>) {
        let mut status = Status::Passed;
        let mut details: Option<StatusDetails> = None;
        let mut records = Vec::with_capacity(self.scenario.steps.len());

        for step in &self.scenario.steps {
            let name = step.display_name();
            if !status.is_ok() {
                let now = unix_millis();
                records.push(StepRecord {
                    name,
                    status: Status::Skipped,
                    start: now,
                    stop: now,
                });
                continue;
            }

            let step_start = unix_millis();
            let step_status = match self.module.step(&step.text) {
                Some(handler) => match handler(context) {
                    Ok(()) => Status::Passed,
                    Err(e) => {
                        tracing::debug!(step = %step.text, error = %e, "Step failed");
                        details = Some(StatusDetails::from_message(e.to_string()));
                        Status::Failed
                    }
                },
                None => {
                    let err = EngineError::StepNotBound(step.text.clone());
                    tracing::warn!(step = %step.text, "No step definition bound");
                    details = Some(StatusDetails::from_message(err.to_string()));
                    Status::Broken
                }
            };

            status = status.combine(step_status);
            records.push(StepRecord {
                name,
                status: step_status,
                start: step_start,
                stop: unix_millis(),
            });
        }

        (status, details, records)
    }

    /// Run the binding's scenario body after the steps, if all steps passed.
    fn run_body(
        &self,
        binding: Option<&ScenarioBinding>,
        context: &mut ScenarioContext,
        status: Status,
        details: Option<StatusDetails>,
    ) -> (Status, Option<StatusDetails>) {
        if !status.is_ok() {
            return (status, details);
        }
        let Some(body) = binding.and_then(ScenarioBinding::body) else {
            return (status, details);
        };
        match body(context) {
            Ok(()) => (status, details),
            Err(e) => {
                tracing::debug!(scenario = %self.scenario.name, error = %e, "Scenario body failed");
                (
                    Status::Failed,
                    Some(StatusDetails::from_message(e.to_string())),
                )
            }
        }
    }

    /// Build both description channels from their sources and resolve them.
    fn resolve_descriptions(
        &self,
        binding: Option<&ScenarioBinding>,
        context: &ScenarioContext,
    ) -> ResolvedDescription {
        let plain = DescriptionSources {
            dynamic: context.dynamic_description().map(String::from),
            binding: binding
                .and_then(ScenarioBinding::description)
                .map(String::from),
            module_default: self.module.default_description().map(String::from),
            document: document_text(
                self.feature.description.as_deref(),
                self.scenario.description.as_deref(),
            ),
        };
        let html = DescriptionSources {
            dynamic: context.dynamic_description_html().map(String::from),
            binding: binding
                .and_then(ScenarioBinding::description_html)
                .map(String::from),
            module_default: self.module.default_description_html().map(String::from),
            document: None,
        };
        ResolvedDescription::resolve(plain, html)
    }

    /// Report labels for this case: feature name, suite, scenario tags.
    fn labels(&self) -> Vec<Label> {
        let mut labels = vec![
            Label::feature(&self.feature.name),
            Label::suite(&self.feature.source),
        ];
        for tag in &self.scenario.tags {
            labels.push(Label::tag(tag));
        }
        labels
    }
}

/// Bound a resolved description to the configured maximum size.
fn clamp_description(description: Option<String>) -> Option<String> {
    let description = description?;
    if description.len() <= config::MAX_DESCRIPTION_SIZE {
        return Some(description);
    }
    tracing::warn!(
        size = description.len(),
        max = config::MAX_DESCRIPTION_SIZE,
        "Truncating oversized description"
    );
    let mut end = 0;
    for (index, _) in description.char_indices() {
        if index > config::MAX_DESCRIPTION_SIZE {
            break;
        }
        end = index;
    }
    Some(description[..end].to_string())
}
