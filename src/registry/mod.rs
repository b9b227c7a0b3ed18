//! Process-wide capability registry
//!
//! Maps capability keys to their handlers and protocol metadata. Populated
//! once at startup and never mutated afterwards; the only registration-time
//! validation is key uniqueness within each capability kind.

pub mod uri_template;

use rust_mcp_sdk::schema::{Prompt, Resource, ResourceTemplate, Tool};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::errors::AppError;
use crate::AppState;

pub use uri_template::{TemplateValues, UriTemplate, UriTemplateError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("capability key {key:?} is already registered as a {kind}")]
    DuplicateKey { kind: &'static str, key: String },
    #[error("resource template registration failed: {0}")]
    InvalidTemplate(#[from] UriTemplateError),
}

/// Result of a tool invocation: human-readable text, optional structured
/// content, and whether the invocation failed during execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub structured: Option<Map<String, Value>>,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
            is_error: false,
        }
    }

    pub fn structured(text: impl Into<String>, structured: Map<String, Value>) -> Self {
        Self {
            text: text.into(),
            structured: Some(structured),
            is_error: false,
        }
    }

    pub fn execution_error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            structured: None,
            is_error: true,
        }
    }
}

/// Prompt arguments are string-valued on the wire, per the MCP schema.
pub type PromptArguments = std::collections::BTreeMap<String, String>;

pub type ToolHandler = fn(&AppState, Map<String, Value>) -> Result<ToolOutput, AppError>;
pub type ResourceHandler = fn(&AppState) -> Result<String, AppError>;
pub type TemplateHandler = fn(&AppState, &TemplateValues) -> Result<String, AppError>;
pub type PromptHandler = fn(&AppState, &PromptArguments) -> Result<String, AppError>;

#[derive(Debug)]
pub struct ToolEntry {
    pub tool: Tool,
    pub handler: ToolHandler,
}

#[derive(Debug)]
pub struct ResourceEntry {
    pub resource: Resource,
    pub handler: ResourceHandler,
}

#[derive(Debug)]
pub struct TemplateEntry {
    pub template: ResourceTemplate,
    pub pattern: UriTemplate,
    pub handler: TemplateHandler,
}

#[derive(Debug)]
pub struct PromptEntry {
    pub prompt: Prompt,
    pub handler: PromptHandler,
}

/// Per-kind capability totals, reported by the discovery endpoint.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CapabilityCounts {
    pub tools: usize,
    pub resources: usize,
    pub resource_templates: usize,
    pub prompts: usize,
}

#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    tools: Vec<ToolEntry>,
    resources: Vec<ResourceEntry>,
    templates: Vec<TemplateEntry>,
    prompts: Vec<PromptEntry>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tool(&mut self, tool: Tool, handler: ToolHandler) -> Result<(), RegistryError> {
        if self.lookup_tool(&tool.name).is_some() {
            return Err(RegistryError::DuplicateKey {
                kind: "tool",
                key: tool.name,
            });
        }

        self.tools.push(ToolEntry { tool, handler });
        Ok(())
    }

    pub fn register_resource(
        &mut self,
        resource: Resource,
        handler: ResourceHandler,
    ) -> Result<(), RegistryError> {
        if self.lookup_resource(&resource.uri).is_some() {
            return Err(RegistryError::DuplicateKey {
                kind: "resource",
                key: resource.uri,
            });
        }

        self.resources.push(ResourceEntry { resource, handler });
        Ok(())
    }

    pub fn register_resource_template(
        &mut self,
        template: ResourceTemplate,
        handler: TemplateHandler,
    ) -> Result<(), RegistryError> {
        if self
            .templates
            .iter()
            .any(|entry| entry.template.uri_template == template.uri_template)
        {
            return Err(RegistryError::DuplicateKey {
                kind: "resource template",
                key: template.uri_template,
            });
        }

        let pattern = UriTemplate::parse(&template.uri_template)?;
        self.templates.push(TemplateEntry {
            template,
            pattern,
            handler,
        });
        Ok(())
    }

    pub fn register_prompt(
        &mut self,
        prompt: Prompt,
        handler: PromptHandler,
    ) -> Result<(), RegistryError> {
        if self.lookup_prompt(&prompt.name).is_some() {
            return Err(RegistryError::DuplicateKey {
                kind: "prompt",
                key: prompt.name,
            });
        }

        self.prompts.push(PromptEntry { prompt, handler });
        Ok(())
    }

    pub fn lookup_tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|entry| entry.tool.name == name)
    }

    pub fn lookup_resource(&self, uri: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|entry| entry.resource.uri == uri)
    }

    /// First registered template whose pattern matches the URI, together
    /// with the captured placeholder values.
    pub fn match_resource_template(&self, uri: &str) -> Option<(&TemplateEntry, TemplateValues)> {
        self.templates
            .iter()
            .find_map(|entry| entry.pattern.matches(uri).map(|values| (entry, values)))
    }

    pub fn lookup_prompt(&self, name: &str) -> Option<&PromptEntry> {
        self.prompts.iter().find(|entry| entry.prompt.name == name)
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|entry| entry.tool.clone()).collect()
    }

    pub fn resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    pub fn resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates
            .iter()
            .map(|entry| entry.template.clone())
            .collect()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|entry| entry.prompt.clone())
            .collect()
    }

    pub fn counts(&self) -> CapabilityCounts {
        CapabilityCounts {
            tools: self.tools.len(),
            resources: self.resources.len(),
            resource_templates: self.templates.len(),
            prompts: self.prompts.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_mcp_sdk::schema::{Prompt, Resource, ResourceTemplate};

    use super::{CapabilityRegistry, RegistryError, ToolOutput};
    use crate::domain;

    fn resource(uri: &str) -> Resource {
        Resource {
            annotations: None,
            description: None,
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: uri.to_string(),
            size: None,
            title: None,
            uri: uri.to_string(),
        }
    }

    fn template(uri_template: &str) -> ResourceTemplate {
        ResourceTemplate {
            annotations: None,
            description: None,
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: uri_template.to_string(),
            title: None,
            uri_template: uri_template.to_string(),
        }
    }

    fn prompt(name: &str) -> Prompt {
        Prompt {
            arguments: vec![],
            description: None,
            icons: vec![],
            meta: None,
            name: name.to_string(),
            title: None,
        }
    }

    #[test]
    fn registered_capabilities_keep_registration_order() {
        let registry = domain::build_registry().expect("registry should build");
        let names: Vec<String> = registry
            .tools()
            .into_iter()
            .map(|tool| tool.name)
            .collect();
        assert_eq!(names, ["Greeting", "Add", "Subtract", "Multiply", "Divide"]);
    }

    #[test]
    fn duplicate_tool_name_is_rejected() {
        let mut registry = domain::build_registry().expect("registry should build");
        let duplicate = registry
            .lookup_tool("Add")
            .expect("Add is registered")
            .tool
            .clone();

        let error = registry
            .register_tool(duplicate, |_, _| Ok(ToolOutput::text("")))
            .expect_err("duplicate tool must fail");
        assert!(matches!(
            error,
            RegistryError::DuplicateKey { kind: "tool", .. }
        ));
    }

    #[test]
    fn duplicate_resource_uri_is_rejected() {
        let mut registry = CapabilityRegistry::new();
        registry
            .register_resource(resource("data://config"), |_| Ok(String::new()))
            .expect("first registration");

        let error = registry
            .register_resource(resource("data://config"), |_| Ok(String::new()))
            .expect_err("duplicate resource must fail");
        assert!(matches!(error, RegistryError::DuplicateKey { .. }));
    }

    #[test]
    fn duplicate_prompt_name_is_rejected() {
        let mut registry = CapabilityRegistry::new();
        registry
            .register_prompt(prompt("Calculator_Prompt"), |_, _| Ok(String::new()))
            .expect("first registration");

        let error = registry
            .register_prompt(prompt("Calculator_Prompt"), |_, _| Ok(String::new()))
            .expect_err("duplicate prompt must fail");
        assert!(matches!(error, RegistryError::DuplicateKey { .. }));
    }

    #[test]
    fn malformed_template_pattern_is_rejected() {
        let mut registry = CapabilityRegistry::new();
        let error = registry
            .register_resource_template(template("users://{user_id/profile"), |_, _| {
                Ok(String::new())
            })
            .expect_err("malformed pattern must fail");
        assert!(matches!(error, RegistryError::InvalidTemplate(_)));
    }

    #[test]
    fn template_match_extracts_values() {
        let registry = domain::build_registry().expect("registry should build");
        let (entry, values) = registry
            .match_resource_template("users://102/profile")
            .expect("uri should match the profile template");
        assert_eq!(entry.template.uri_template, "users://{user_id}/profile");
        assert_eq!(values.get("user_id").map(String::as_str), Some("102"));
    }

    #[test]
    fn unmatched_uri_yields_no_template() {
        let registry = domain::build_registry().expect("registry should build");
        assert!(registry.match_resource_template("users://102").is_none());
    }

    #[test]
    fn counts_cover_every_declared_capability() {
        let registry = domain::build_registry().expect("registry should build");
        let counts = registry.counts();
        assert_eq!(counts.tools, 5);
        assert_eq!(counts.resources, 1);
        assert_eq!(counts.resource_templates, 1);
        assert_eq!(counts.prompts, 1);
    }
}
