//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario: the
//! feature documents and binding declarations being assembled, and the
//! report snapshot once the suite has run.

use cucumber::World;
use verslag_engine::{BindingModule, EngineError, ScenarioBinding};
use verslag_harness::{HarnessRunner, ReportSnapshot};

/// Declarative form of one scenario binding, assembled by Given steps and
/// turned into a real [`ScenarioBinding`] when the suite runs.
#[derive(Debug, Clone, Default)]
pub struct BindingDecl {
    pub feature: String,
    pub scenario: String,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub dynamic_description: Option<String>,
    pub dynamic_description_html: Option<String>,
}

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(Debug, Default, World)]
#[world(init = Self::new)]
pub struct VerslagWorld {
    /// Feature documents under test: (source name, body)
    pub features: Vec<(String, String)>,
    /// Step texts bound to handlers that succeed
    pub passing_steps: Vec<String>,
    /// Step texts bound to handlers that fail: (text, message)
    pub failing_steps: Vec<(String, String)>,
    /// Explicit scenario bindings being assembled
    pub bindings: Vec<BindingDecl>,
    /// Feature files bound wholesale
    pub bind_all: Vec<String>,
    /// Module-level default descriptions
    pub default_description: Option<String>,
    pub default_description_html: Option<String>,
    /// Collected report after the run
    pub snapshot: Option<ReportSnapshot>,
    /// Run-level error, if the suite failed to execute at all
    pub error: Option<String>,
}

impl VerslagWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding declaration most recently added by a Given step.
    pub fn last_binding_mut(&mut self) -> &mut BindingDecl {
        match self.bindings.last_mut() {
            Some(binding) => binding,
            None => panic!("no binding declared yet; add a 'binding for scenario' step first"),
        }
    }

    /// Assemble the binding module and run the suite through the harness.
    pub fn run_suite(&mut self) {
        let mut builder = BindingModule::builder("bdd-steps");

        for text in &self.passing_steps {
            builder = builder.step(text.clone(), |_| Ok(()));
        }
        for (text, message) in &self.failing_steps {
            let message = message.clone();
            builder = builder.step(text.clone(), move |_| {
                Err(EngineError::StepFailed(message.clone()))
            });
        }

        for decl in &self.bindings {
            let mut binding = ScenarioBinding::new(decl.feature.clone(), decl.scenario.clone());
            if let Some(d) = &decl.description {
                binding = binding.with_description(d.clone());
            }
            if let Some(d) = &decl.description_html {
                binding = binding.with_description_html(d.clone());
            }
            if decl.dynamic_description.is_some() || decl.dynamic_description_html.is_some() {
                let dynamic = decl.dynamic_description.clone();
                let dynamic_html = decl.dynamic_description_html.clone();
                binding = binding.with_body(move |ctx| {
                    if let Some(d) = &dynamic {
                        ctx.set_description(d.clone());
                    }
                    if let Some(d) = &dynamic_html {
                        ctx.set_description_html(d.clone());
                    }
                    Ok(())
                });
            }
            builder = builder.scenario(binding);
        }

        for source in &self.bind_all {
            builder = builder.scenarios(source.clone());
        }
        if let Some(d) = &self.default_description {
            builder = builder.default_description(d.clone());
        }
        if let Some(d) = &self.default_description_html {
            builder = builder.default_description_html(d.clone());
        }

        let features: Vec<(&str, &str)> = self
            .features
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
            .collect();

        match HarnessRunner::new().run(&features, builder.build()) {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(e) => {
                self.snapshot = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// The collected snapshot, panicking if the suite has not run or failed.
    pub fn snapshot(&self) -> &ReportSnapshot {
        match &self.snapshot {
            Some(snapshot) => snapshot,
            None => panic!(
                "suite has not produced a report (error: {:?})",
                self.error
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VerslagWorld;

    #[test]
    fn test_world_starts_empty() {
        let world = VerslagWorld::new();
        assert!(world.features.is_empty());
        assert!(world.snapshot.is_none());
        assert!(world.error.is_none());
    }
}
