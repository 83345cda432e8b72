//! Agent factory tools.

use super::{parse_args, to_json, BoxedTool, Tool};
use crate::agent::{AgentFactoryService, CreateAgentRequest, TemplateCustomizations};
use crate::error::ApiError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const CREATE_NEW_AGENT: &str = "create_new_agent";
pub const LIST_AGENTS: &str = "list_agents";
pub const GET_AGENT_CODE: &str = "get_agent_code";
pub const LIST_AGENT_TEMPLATES: &str = "list_agent_templates";
pub const CREATE_AGENT_FROM_TEMPLATE: &str = "create_agent_from_template";

/// Every factory tool, in published order.
pub fn all(service: Arc<AgentFactoryService>) -> Vec<BoxedTool> {
    vec![
        Arc::new(CreateNewAgentTool::new(service.clone())),
        Arc::new(ListAgentsTool::new(service.clone())),
        Arc::new(GetAgentCodeTool::new(service.clone())),
        Arc::new(ListAgentTemplatesTool::new(service.clone())),
        Arc::new(CreateAgentFromTemplateTool::new(service)),
    ]
}

fn string_array_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": {"type": "string"},
        "description": description
    })
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    name: String,
    role: String,
    system_message: String,
    #[serde(default)]
    capabilities: Option<Vec<String>>,
}

pub struct CreateNewAgentTool {
    service: Arc<AgentFactoryService>,
}

impl CreateNewAgentTool {
    pub fn new(service: Arc<AgentFactoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CreateNewAgentTool {
    fn name(&self) -> &'static str { CREATE_NEW_AGENT }
    fn description(&self) -> &'static str {
        "Create a new AI agent definition and return it, including the generated code that instantiates it."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Unique agent name (letters, digits, '_' and '-'), e.g. \"crm_specialist\""},
                "role": {"type": "string", "enum": ["assistant", "coder", "researcher"], "description": "Agent role type"},
                "system_message": {"type": "string", "description": "Instructions defining the agent's purpose and behavior"},
                "capabilities": string_array_schema("Optional list of special capabilities, e.g. [\"web_search\"]")
            },
            "required": ["name", "role", "system_message"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value, ApiError> {
        let args: CreateArgs = parse_args(CREATE_NEW_AGENT, input)?;
        let request = CreateAgentRequest::new(args.name, args.role, args.system_message)
            .with_capabilities(args.capabilities.unwrap_or_default());
        let definition = self.service.create_agent(request)?;
        to_json(&definition)
    }
}

pub struct ListAgentsTool {
    service: Arc<AgentFactoryService>,
}

impl ListAgentsTool {
    pub fn new(service: Arc<AgentFactoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ListAgentsTool {
    fn name(&self) -> &'static str { LIST_AGENTS }
    fn description(&self) -> &'static str { "List all agents that have been created, oldest first." }
    fn input_schema(&self) -> Value { json!({"type": "object", "properties": {}}) }

    async fn execute(&self, _input: Value) -> Result<Value, ApiError> {
        let agents = self.service.list_agents()?;
        Ok(json!({
            "total": agents.len(),
            "agents": to_json(&agents)?
        }))
    }
}

#[derive(Debug, Deserialize)]
struct NameArgs {
    name: String,
}

pub struct GetAgentCodeTool {
    service: Arc<AgentFactoryService>,
}

impl GetAgentCodeTool {
    pub fn new(service: Arc<AgentFactoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetAgentCodeTool {
    fn name(&self) -> &'static str { GET_AGENT_CODE }
    fn description(&self) -> &'static str { "Retrieve the generated code for a previously created agent." }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Name of the agent"}
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value, ApiError> {
        let args: NameArgs = parse_args(GET_AGENT_CODE, input)?;
        Ok(Value::String(self.service.agent_code(&args.name)?))
    }
}

pub struct ListAgentTemplatesTool {
    service: Arc<AgentFactoryService>,
}

impl ListAgentTemplatesTool {
    pub fn new(service: Arc<AgentFactoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ListAgentTemplatesTool {
    fn name(&self) -> &'static str { LIST_AGENT_TEMPLATES }
    fn description(&self) -> &'static str { "List the built-in templates new agents can start from." }
    fn input_schema(&self) -> Value { json!({"type": "object", "properties": {}}) }

    async fn execute(&self, _input: Value) -> Result<Value, ApiError> {
        Ok(json!({ "templates": to_json(&self.service.templates())? }))
    }
}

#[derive(Debug, Deserialize)]
struct FromTemplateArgs {
    template: String,
    name: String,
    #[serde(default)]
    system_message: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

pub struct CreateAgentFromTemplateTool {
    service: Arc<AgentFactoryService>,
}

impl CreateAgentFromTemplateTool {
    pub fn new(service: Arc<AgentFactoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CreateAgentFromTemplateTool {
    fn name(&self) -> &'static str { CREATE_AGENT_FROM_TEMPLATE }
    fn description(&self) -> &'static str {
        "Create a new agent from a built-in template, optionally overriding its instructions or role and adding capabilities."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "template": {"type": "string", "description": "Template name, see list_agent_templates"},
                "name": {"type": "string", "description": "Unique name for the new agent"},
                "system_message": {"type": "string", "description": "Replaces the template's instructions"},
                "role": {"type": "string", "enum": ["assistant", "coder", "researcher"], "description": "Replaces the template's role"},
                "capabilities": string_array_schema("Added to the template's capabilities"),
                "metadata": {"type": "object", "additionalProperties": {"type": "string"}}
            },
            "required": ["template", "name"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value, ApiError> {
        let args: FromTemplateArgs = parse_args(CREATE_AGENT_FROM_TEMPLATE, input)?;
        let definition = self.service.create_from_template(
            &args.template,
            &args.name,
            TemplateCustomizations {
                system_message: args.system_message,
                role: args.role,
                capabilities: args.capabilities,
                metadata: args.metadata,
            },
        )?;
        to_json(&definition)
    }
}
