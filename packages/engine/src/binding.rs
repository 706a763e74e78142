//! Scenario bindings and step definitions
//!
//! A [`BindingModule`] is the executable side of a feature file: the step
//! definitions that give step lines behavior, plus the scenario bindings
//! that attach report metadata and an optional scenario body. It is the
//! Rust-native rendition of a step-definition source module.
//!
//! Descriptions attach at two levels:
//!
//! - **Binding level**: [`ScenarioBinding::with_description`] /
//!   [`ScenarioBinding::with_description_html`] declare the static
//!   description of one scenario.
//! - **Module level**: [`BindingModuleBuilder::default_description`] /
//!   [`BindingModuleBuilder::default_description_html`] declare defaults for
//!   every scenario the module binds.
//!
//! A scenario body (see [`ScenarioBinding::with_body`]) runs after the steps
//! and may override either channel at runtime through the context.

use crate::context::ScenarioContext;
use crate::error::Result;
use std::fmt;

/// Handler invoked for a step or scenario body.
pub type StepHandler = Box<dyn Fn(&mut ScenarioContext) -> Result<()> + Send + Sync>;

/// A step definition: step text plus the handler bound to it.
pub struct StepDef {
    text: String,
    handler: StepHandler,
}

impl StepDef {
    /// Create a step definition matching the exact step text.
    pub fn new(
        text: impl Into<String>,
        handler: impl Fn(&mut ScenarioContext) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            text: text.into(),
            handler: Box::new(handler),
        }
    }

    /// Step text this definition matches.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The bound handler.
    pub fn handler(&self) -> &StepHandler {
        &self.handler
    }
}

impl fmt::Debug for StepDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDef").field("text", &self.text).finish()
    }
}

/// Binding of one scenario in one feature file.
pub struct ScenarioBinding {
    feature: String,
    scenario: String,
    description: Option<String>,
    description_html: Option<String>,
    body: Option<StepHandler>,
}

impl ScenarioBinding {
    /// Bind the named scenario of the named feature file.
    pub fn new(feature: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            scenario: scenario.into(),
            description: None,
            description_html: None,
            body: None,
        }
    }

    /// Declare the static plain-text description for this scenario.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare the static HTML description for this scenario.
    pub fn with_description_html(mut self, description_html: impl Into<String>) -> Self {
        self.description_html = Some(description_html.into());
        self
    }

    /// Attach a scenario body, run after the steps complete.
    ///
    /// The body receives the scenario context and may set dynamic
    /// descriptions, which override the static declarations.
    pub fn with_body(
        mut self,
        body: impl Fn(&mut ScenarioContext) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Feature file source name this binding targets.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Scenario name this binding targets.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Static plain-text description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Static HTML description, if declared.
    pub fn description_html(&self) -> Option<&str> {
        self.description_html.as_deref()
    }

    /// Scenario body, if attached.
    pub fn body(&self) -> Option<&StepHandler> {
        self.body.as_ref()
    }
}

impl fmt::Debug for ScenarioBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioBinding")
            .field("feature", &self.feature)
            .field("scenario", &self.scenario)
            .field("description", &self.description)
            .field("description_html", &self.description_html)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// One step-definition module: step defs, scenario bindings, and
/// module-level defaults.
pub struct BindingModule {
    name: String,
    steps: Vec<StepDef>,
    bindings: Vec<ScenarioBinding>,
    /// Feature files whose every scenario this module binds
    bind_all: Vec<String>,
    default_description: Option<String>,
    default_description_html: Option<String>,
}

impl BindingModule {
    /// Start building a module.
    pub fn builder(name: impl Into<String>) -> BindingModuleBuilder {
        BindingModuleBuilder {
            name: name.into(),
            steps: Vec::new(),
            bindings: Vec::new(),
            bind_all: Vec::new(),
            default_description: None,
            default_description_html: None,
        }
    }

    /// Module name (diagnostic only).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the handler for the given step text. First match wins.
    pub fn step(&self, text: &str) -> Option<&StepHandler> {
        self.steps
            .iter()
            .find(|def| def.text == text)
            .map(StepDef::handler)
    }

    /// Explicit scenario bindings.
    pub fn bindings(&self) -> &[ScenarioBinding] {
        &self.bindings
    }

    /// Feature files bound wholesale.
    pub fn bind_all(&self) -> &[String] {
        &self.bind_all
    }

    /// Module-level default plain-text description.
    pub fn default_description(&self) -> Option<&str> {
        self.default_description.as_deref()
    }

    /// Module-level default HTML description.
    pub fn default_description_html(&self) -> Option<&str> {
        self.default_description_html.as_deref()
    }

    /// Number of step definitions.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Debug for BindingModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingModule")
            .field("name", &self.name)
            .field("steps", &self.steps.len())
            .field("bindings", &self.bindings)
            .field("bind_all", &self.bind_all)
            .field("default_description", &self.default_description)
            .field("default_description_html", &self.default_description_html)
            .finish()
    }
}

/// Builder for [`BindingModule`].
pub struct BindingModuleBuilder {
    name: String,
    steps: Vec<StepDef>,
    bindings: Vec<ScenarioBinding>,
    bind_all: Vec<String>,
    default_description: Option<String>,
    default_description_html: Option<String>,
}

impl BindingModuleBuilder {
    /// Bind a step text to a handler.
    pub fn step(
        mut self,
        text: impl Into<String>,
        handler: impl Fn(&mut ScenarioContext) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.steps.push(StepDef::new(text, handler));
        self
    }

    /// Add an explicit scenario binding.
    pub fn scenario(mut self, binding: ScenarioBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Bind every scenario of the named feature file.
    ///
    /// Such scenarios run without a body and without binding-level
    /// descriptions; module defaults and document text still apply.
    pub fn scenarios(mut self, feature: impl Into<String>) -> Self {
        self.bind_all.push(feature.into());
        self
    }

    /// Declare the default plain-text description for every bound scenario.
    pub fn default_description(mut self, description: impl Into<String>) -> Self {
        self.default_description = Some(description.into());
        self
    }

    /// Declare the default HTML description for every bound scenario.
    pub fn default_description_html(mut self, description_html: impl Into<String>) -> Self {
        self.default_description_html = Some(description_html.into());
        self
    }

    /// Finish the module.
    pub fn build(self) -> BindingModule {
        BindingModule {
            name: self.name,
            steps: self.steps,
            bindings: self.bindings,
            bind_all: self.bind_all,
            default_description: self.default_description,
            default_description_html: self.default_description_html,
        }
    }
}
