//! Agent Definitions
//!
//! Domain types, validation, code generation, built-in templates, the record
//! store port with its backends, and the factory service that ties them together.

pub mod domain;
pub mod factory;
pub mod generation;
pub mod repository;
pub mod templates;

pub use domain::{AgentDefinition, AgentRole, AgentSummary, CreateAgentRequest};
pub use factory::{AgentFactoryService, AgentStats, RoleCount};
pub use generation::{render_agent_code, CodeSpec};
pub use repository::{
    open_store, AgentRecordStore, DirectoryAgentStore, MemoryAgentStore, SledAgentStore,
};
pub use templates::{AgentTemplate, TemplateCustomizations};
