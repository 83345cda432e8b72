//! Agent Factory
//!
//! Creates AI agent definitions on request, generates the code that
//! instantiates each one, persists them in a shared record store and
//! exposes the operations as MCP tools.

pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod tooling;
pub mod tools;

pub use agent::{
    AgentDefinition, AgentFactoryService, AgentRecordStore, AgentRole, AgentSummary,
    CreateAgentRequest,
};
pub use error::{ApiError, StorageError};
