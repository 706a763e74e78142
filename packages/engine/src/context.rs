//! Runtime context for scenario execution
//!
//! Step handlers and scenario bodies receive a [`ScenarioContext`] while the
//! scenario runs. The context identifies the executing case and collects the
//! dynamic report overrides set at runtime.
//!
//! # Description channels
//!
//! Dynamic descriptions set here sit at the top of the resolution order (see
//! [`crate::description`]): a value set through [`set_description`] or
//! [`set_description_html`] overrides whatever the binding or its module
//! declared statically. The plain and HTML channels are independent; setting
//! one never touches the other.
//!
//! [`set_description`]: ScenarioContext::set_description
//! [`set_description_html`]: ScenarioContext::set_description_html

use crate::ident::CaseId;
use std::collections::HashMap;

/// Mutable state handed to step handlers and scenario bodies.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// Identity of the executing case
    case: CaseId,
    /// Dynamic plain-text description, if set at runtime
    dynamic_description: Option<String>,
    /// Dynamic HTML description, if set at runtime
    dynamic_description_html: Option<String>,
    /// Scratchpad for steps to share state within a scenario
    values: HashMap<String, String>,
}

impl ScenarioContext {
    /// Create a context for the given case.
    pub fn new(case: CaseId) -> Self {
        Self {
            case,
            dynamic_description: None,
            dynamic_description_html: None,
            values: HashMap::new(),
        }
    }

    /// Identity of the executing case.
    pub fn case(&self) -> &CaseId {
        &self.case
    }

    /// Set the plain-text description for the current case at runtime.
    ///
    /// Overrides any statically declared description. Later calls replace
    /// earlier ones.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        tracing::debug!(case = %self.case, "Dynamic description set");
        self.dynamic_description = Some(description);
    }

    /// Set the HTML description for the current case at runtime.
    pub fn set_description_html(&mut self, description_html: impl Into<String>) {
        let description_html = description_html.into();
        tracing::debug!(case = %self.case, "Dynamic HTML description set");
        self.dynamic_description_html = Some(description_html);
    }

    /// Dynamic plain-text description, if one was set.
    pub fn dynamic_description(&self) -> Option<&str> {
        self.dynamic_description.as_deref()
    }

    /// Dynamic HTML description, if one was set.
    pub fn dynamic_description_html(&self) -> Option<&str> {
        self.dynamic_description_html.as_deref()
    }

    /// Store a scratchpad value shared between steps of this scenario.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Read a scratchpad value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }
}
