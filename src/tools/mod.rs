//! Tool Interface
//!
//! Static table of named tools exposed to an external orchestrator. The table
//! is built once at startup from the factory service and never changes.

pub mod factory_tools;

use crate::agent::AgentFactoryService;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A named operation callable with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
    async fn execute(&self, input: Value) -> Result<Value, ApiError>;
}

pub type BoxedTool = Arc<dyn Tool>;

/// Published tool signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Fixed tool table in registration order.
pub struct ToolRegistry {
    tools: Vec<BoxedTool>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<BoxedTool>) -> Self {
        for tool in &tools {
            debug!("Registered tool: {}", tool.name());
        }
        Self { tools }
    }

    /// The agent factory tool table.
    pub fn for_factory(service: Arc<AgentFactoryService>) -> Self {
        Self::new(factory_tools::all(service))
    }

    pub fn get(&self, name: &str) -> Option<&BoxedTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Decode tool arguments into a typed struct.
pub(crate) fn parse_args<T: for<'de> Deserialize<'de>>(
    tool: &str,
    input: Value,
) -> Result<T, ApiError> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid arguments for {}: {}", tool, e)))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        ApiError::StorageError(crate::error::StorageError::Serialization(e.to_string()))
    })
}
