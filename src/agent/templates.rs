//! Built-in starting templates for new agents.

use crate::agent::domain::{AgentRole, CreateAgentRequest};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Metadata key recording which template an agent was created from.
pub const TEMPLATE_METADATA_KEY: &str = "created_from_template";

/// A published starting point for agent creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTemplate {
    pub name: &'static str,
    pub role: AgentRole,
    pub system_message: &'static str,
    pub capabilities: &'static [&'static str],
    pub description: &'static str,
}

const BUILTIN_TEMPLATES: &[AgentTemplate] = &[
    AgentTemplate {
        name: "generic_assistant",
        role: AgentRole::Assistant,
        system_message:
            "You are a helpful AI assistant. Provide clear, accurate, and friendly responses.",
        capabilities: &[],
        description: "General purpose AI assistant for various tasks",
    },
    AgentTemplate {
        name: "code_specialist",
        role: AgentRole::Coder,
        system_message: "You are a coding specialist. Write clean, efficient, well-documented code. Explain your implementations.",
        capabilities: &["python", "javascript", "debugging"],
        description: "Specialized agent for coding and software development tasks",
    },
    AgentTemplate {
        name: "research_analyst",
        role: AgentRole::Researcher,
        system_message: "You are a research analyst. Gather information, analyze data, and provide detailed insights with citations.",
        capabilities: &["web_search", "data_analysis", "report_generation"],
        description: "Research-focused agent for analysis and information gathering",
    },
];

/// All built-in templates.
pub fn builtin_templates() -> &'static [AgentTemplate] {
    BUILTIN_TEMPLATES
}

/// Look up a template by name.
pub fn find_template(name: &str) -> Result<&'static AgentTemplate, ApiError> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| ApiError::NotFound(format!("Template '{}'", name)))
}

/// Overrides applied on top of a template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateCustomizations {
    #[serde(default)]
    pub system_message: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Added to the template's capabilities, never replacing them
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl AgentTemplate {
    /// Build a creation request for `agent_name` from this template.
    pub fn to_request(
        &self,
        agent_name: &str,
        customizations: TemplateCustomizations,
    ) -> CreateAgentRequest {
        let mut capabilities: BTreeSet<String> =
            self.capabilities.iter().map(|c| c.to_string()).collect();
        capabilities.extend(customizations.capabilities);

        let mut metadata = customizations.metadata;
        metadata.insert(TEMPLATE_METADATA_KEY.to_string(), self.name.to_string());

        CreateAgentRequest {
            name: agent_name.to_string(),
            role: customizations
                .role
                .unwrap_or_else(|| self.role.as_str().to_string()),
            system_message: customizations
                .system_message
                .unwrap_or_else(|| self.system_message.to_string()),
            capabilities: capabilities.into_iter().collect(),
            metadata,
        }
    }
}
