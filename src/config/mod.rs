//! Configuration Management
//!
//! Layered configuration: built-in defaults, the global config file, an optional
//! explicit file, then `AGENT_FACTORY__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::{StorageBackend, StorageConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactoryConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model target written into every generated agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hosted provider slug (e.g. `groq`)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier passed to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable the generated code reads its API key from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

pub(crate) fn default_provider() -> String {
    "groq".to_string()
}

pub(crate) fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

pub(crate) fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Tool server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name reported to clients on `initialize`
    #[serde(default = "default_server_name")]
    pub name: String,
}

pub(crate) fn default_server_name() -> String {
    "AgentFactory".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}
