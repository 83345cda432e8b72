//! Creation request validation owned by the agent domain.

use super::{AgentRole, CreateAgentRequest};
use crate::error::ApiError;
use std::collections::{BTreeMap, BTreeSet};

/// Longest accepted agent name.
pub const MAX_NAME_LEN: usize = 64;

/// A creation request that passed every check, with normalized fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub name: String,
    pub role: AgentRole,
    pub system_message: String,
    pub capabilities: BTreeSet<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Validate a creation request.
///
/// Checks run in order (name, role, system message, capabilities) and the first
/// failure is returned. Uniqueness is left to the record store.
pub fn validate_create_request(request: &CreateAgentRequest) -> Result<ValidatedRequest, ApiError> {
    let name = request.name.trim();
    validate_agent_name(name)?;

    let role: AgentRole = request.role.parse()?;

    if request.system_message.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "system_message cannot be empty".to_string(),
        ));
    }

    let mut capabilities = BTreeSet::new();
    for capability in &request.capabilities {
        let capability = capability.trim();
        if capability.is_empty() {
            return Err(ApiError::InvalidRequest(
                "capabilities cannot contain blank entries".to_string(),
            ));
        }
        capabilities.insert(capability.to_string());
    }

    Ok(ValidatedRequest {
        name: name.to_string(),
        role,
        system_message: request.system_message.clone(),
        capabilities,
        metadata: request.metadata.clone(),
    })
}

/// Names double as file stems and generated identifiers.
pub fn validate_agent_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::InvalidRequest("Agent name cannot be empty".to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ApiError::InvalidRequest(format!(
            "Agent name '{}' exceeds {} characters",
            name, MAX_NAME_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::InvalidRequest(format!(
            "Agent name '{}' must contain only letters, numbers, hyphens, and underscores",
            name
        )));
    }
    Ok(())
}
