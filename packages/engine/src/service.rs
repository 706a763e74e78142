//! Suite-level orchestration
//!
//! [`SuiteRunner`] owns the loaded feature documents and the registered
//! binding modules, and runs the whole suite:
//!
//! - explicit scenario bindings are resolved against the loaded features
//!   (unknown feature files or scenarios are errors);
//! - wholesale bindings (`scenarios("sample.feature")`) expand to every
//!   scenario of their feature;
//! - each resolved case executes through [`ScenarioEngine`], synchronously
//!   and in registration order;
//! - results are keyed `"<feature-file>:<scenario>"` in the returned
//!   [`RunReport`].
//!
//! # Example
//!
//! ```
//! use verslag_engine::{BindingModule, ScenarioBinding, SuiteRunner};
//!
//! let mut runner = SuiteRunner::new();
//! runner
//!     .add_feature_str(
//!         "sample.feature",
//!         "Feature: Foo\n    Scenario: Bar\n        Given noop\n",
//!     )
//!     .unwrap();
//! runner.register_module(
//!     BindingModule::builder("steps")
//!         .step("noop", |_| Ok(()))
//!         .scenario(ScenarioBinding::new("sample.feature", "Bar").with_description("Lorem Ipsum"))
//!         .build(),
//! );
//!
//! let report = runner.run().unwrap();
//! let case = report.test_case("sample.feature:Bar").unwrap();
//! assert_eq!(case.description.as_deref(), Some("Lorem Ipsum"));
//! ```

use crate::binding::{BindingModule, ScenarioBinding};
use crate::engine::ScenarioEngine;
use crate::error::{EngineError, Result};
use crate::feature::{Feature, ParseOptions};
use crate::report::{ResultWriter, RunReport};
use std::collections::HashSet;
use std::path::Path;

/// Runs registered binding modules against loaded feature documents.
pub struct SuiteRunner {
    features: Vec<Feature>,
    modules: Vec<BindingModule>,
    options: ParseOptions,
}

impl Default for SuiteRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteRunner {
    /// Create a runner using the compiled dialect's parse options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a runner with explicit parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            features: Vec::new(),
            modules: Vec::new(),
            options,
        }
    }

    /// Parse and register a feature document from a string.
    ///
    /// # Errors
    ///
    /// Returns parse errors from [`Feature::parse`], or
    /// `EngineError::DuplicateBinding` if a document with the same source
    /// name is already registered.
    pub fn add_feature_str(&mut self, source: impl Into<String>, content: &str) -> Result<()> {
        let feature = Feature::parse(source, content, &self.options)?;
        self.add_feature(feature)
    }

    /// Parse and register a feature document from a file.
    pub fn add_feature_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let feature = Feature::from_file(path, &self.options)?;
        self.add_feature(feature)
    }

    fn add_feature(&mut self, feature: Feature) -> Result<()> {
        if self.feature(&feature.source).is_some() {
            return Err(EngineError::DuplicateBinding(format!(
                "feature file '{}' registered twice",
                feature.source
            )));
        }
        tracing::debug!(source = %feature.source, "Registered feature document");
        self.features.push(feature);
        Ok(())
    }

    /// Register a binding module.
    pub fn register_module(&mut self, module: BindingModule) {
        tracing::debug!(module = %module.name(), steps = module.step_count(), "Registered binding module");
        self.modules.push(module);
    }

    /// Look up a registered feature document by source name.
    pub fn feature(&self, source: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.source == source)
    }

    /// Number of registered feature documents.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Number of registered binding modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Execute every bound scenario and collect the report.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::FeatureNotFound` /
    /// `EngineError::ScenarioNotFound` when a binding targets a document or
    /// scenario that is not loaded, and `EngineError::DuplicateBinding` when
    /// two bindings produce the same case key. Execution failures inside
    /// scenarios do not error; they are recorded in the results.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::new();
        let mut seen: HashSet<String> = HashSet::new();

        for module in &self.modules {
            for binding in module.bindings() {
                let feature = self.require_feature(binding.feature())?;
                let scenario = feature.find_scenario(binding.scenario()).ok_or_else(|| {
                    EngineError::ScenarioNotFound {
                        feature: binding.feature().to_string(),
                        scenario: binding.scenario().to_string(),
                    }
                })?;

                let result =
                    ScenarioEngine::new(feature, scenario, module).execute(Some(binding));
                Self::claim_case(&mut seen, &result.full_name)?;
                report.push(result);
            }

            for source in module.bind_all() {
                let feature = self.require_feature(source)?;
                for scenario in &feature.scenarios {
                    let result = ScenarioEngine::new(feature, scenario, module).execute(None);
                    Self::claim_case(&mut seen, &result.full_name)?;
                    report.push(result);
                }
            }
        }

        tracing::debug!(cases = report.len(), "Suite run complete");
        Ok(report)
    }

    /// Execute the suite and persist every result through the writer.
    pub fn run_and_write(&self, writer: &ResultWriter) -> Result<RunReport> {
        let report = self.run()?;
        report.write_all(writer)?;
        Ok(report)
    }

    fn require_feature(&self, source: &str) -> Result<&Feature> {
        self.feature(source)
            .ok_or_else(|| EngineError::FeatureNotFound(source.to_string()))
    }

    fn claim_case(seen: &mut HashSet<String>, full_name: &str) -> Result<()> {
        if !seen.insert(full_name.to_string()) {
            return Err(EngineError::DuplicateBinding(full_name.to_string()));
        }
        Ok(())
    }
}
