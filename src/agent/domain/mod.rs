//! Agent definition domain types.

pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

pub use validation::{validate_create_request, ValidatedRequest};

/// Behavioral template an agent is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Assistant,
    Coder,
    Researcher,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [AgentRole::Assistant, AgentRole::Coder, AgentRole::Researcher];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Assistant => "assistant",
            AgentRole::Coder => "coder",
            AgentRole::Researcher => "researcher",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assistant" => Ok(AgentRole::Assistant),
            "coder" => Ok(AgentRole::Coder),
            "researcher" => Ok(AgentRole::Researcher),
            _ => Err(ApiError::InvalidRole(format!(
                "'{}'. Must be one of: assistant, coder, researcher",
                s
            ))),
        }
    }
}

/// A persisted agent definition.
///
/// Never mutated after the store accepts it; `generated_code` in particular is
/// returned byte-for-byte as it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub role: AgentRole,
    pub system_message: String,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    pub model: String,
    pub provider: String,
    #[serde(default)]
    pub generated_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Kept last so TOML serialization emits it after plain values.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl AgentDefinition {
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            name: self.name.clone(),
            role: self.role,
            capabilities: self.capabilities.iter().cloned().collect(),
            model: self.model.clone(),
            created_at: self.created_at,
            has_code: self.generated_code.is_some(),
        }
    }
}

/// Listing view of an agent: no instructions, no code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
    pub role: AgentRole,
    pub capabilities: Vec<String>,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub has_code: bool,
}

/// Unvalidated creation request as it arrives from a tool call or the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub role: String,
    pub system_message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
}

// Tool callers send `null` for omitted optionals.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateAgentRequest {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        system_message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            system_message: system_message.into(),
            capabilities: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }
}
