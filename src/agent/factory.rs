//! Agent factory service: turns creation requests into persisted definitions.
//!
//! Validation and code generation both finish before the store is touched, so
//! a failed creation leaves the store exactly as it was. Nothing is retried.

use crate::agent::domain::{
    validate_create_request, AgentDefinition, AgentRole, AgentSummary, CreateAgentRequest,
};
use crate::agent::generation::{render_agent_code, CodeSpec};
use crate::agent::repository::AgentRecordStore;
use crate::agent::templates::{self, AgentTemplate, TemplateCustomizations};
use crate::config::ModelConfig;
use crate::error::ApiError;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Window used for the `recent` count in stats.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Aggregate counts over the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStats {
    pub total: usize,
    pub by_role: Vec<RoleCount>,
    pub recent: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleCount {
    pub role: AgentRole,
    pub count: usize,
}

pub struct AgentFactoryService {
    store: Arc<dyn AgentRecordStore>,
    model: ModelConfig,
}

impl AgentFactoryService {
    pub fn new(store: Arc<dyn AgentRecordStore>, model: ModelConfig) -> Self {
        Self { store, model }
    }

    pub fn store(&self) -> &Arc<dyn AgentRecordStore> {
        &self.store
    }

    /// Validate, generate and persist a new agent.
    pub fn create_agent(&self, request: CreateAgentRequest) -> Result<AgentDefinition, ApiError> {
        let validated = validate_create_request(&request).map_err(|e| {
            warn!(agent = %request.name, error = %e, "Rejected agent creation request");
            e
        })?;

        let generated_code = render_agent_code(&CodeSpec {
            name: &validated.name,
            role: validated.role,
            system_message: &validated.system_message,
            capabilities: &validated.capabilities,
            model: &self.model,
        });
        debug!(agent = %validated.name, bytes = generated_code.len(), "Generated agent code");

        let definition = AgentDefinition {
            name: validated.name,
            role: validated.role,
            system_message: validated.system_message,
            capabilities: validated.capabilities,
            model: self.model.model.clone(),
            provider: self.model.provider.clone(),
            generated_code: Some(generated_code),
            created_at: Utc::now(),
            metadata: validated.metadata,
        };

        self.store.put(&definition)?;
        info!(
            agent = %definition.name,
            role = %definition.role,
            backend = self.store.backend_name(),
            "Agent created"
        );
        Ok(definition)
    }

    pub fn get_agent(&self, name: &str) -> Result<AgentDefinition, ApiError> {
        Ok(self.store.get(name.trim())?)
    }

    /// Summaries of every agent in creation order.
    pub fn list_agents(&self) -> Result<Vec<AgentSummary>, ApiError> {
        let mut summaries = Vec::new();
        for definition in self.store.list()? {
            summaries.push(definition?.summary());
        }
        Ok(summaries)
    }

    /// Exactly the text generated at creation time.
    pub fn agent_code(&self, name: &str) -> Result<String, ApiError> {
        let name = name.trim();
        let definition = self.store.get(name)?;
        definition
            .generated_code
            .ok_or_else(|| ApiError::NotFound(format!("Generated code for agent '{}'", name)))
    }

    pub fn templates(&self) -> &'static [AgentTemplate] {
        templates::builtin_templates()
    }

    /// Create an agent starting from a built-in template.
    pub fn create_from_template(
        &self,
        template_name: &str,
        agent_name: &str,
        customizations: TemplateCustomizations,
    ) -> Result<AgentDefinition, ApiError> {
        let template = templates::find_template(template_name)?;
        self.create_agent(template.to_request(agent_name, customizations))
    }

    pub fn stats(&self) -> Result<AgentStats, ApiError> {
        let cutoff = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        let mut counts: BTreeMap<AgentRole, usize> = BTreeMap::new();
        let mut total = 0;
        let mut recent = 0;
        for definition in self.store.list()? {
            let definition = definition?;
            total += 1;
            *counts.entry(definition.role).or_insert(0) += 1;
            if definition.created_at >= cutoff {
                recent += 1;
            }
        }

        let mut by_role: Vec<RoleCount> = counts
            .into_iter()
            .map(|(role, count)| RoleCount { role, count })
            .collect();
        by_role.sort_by(|a, b| b.count.cmp(&a.count).then(a.role.cmp(&b.role)));

        Ok(AgentStats {
            total,
            by_role,
            recent,
        })
    }
}
