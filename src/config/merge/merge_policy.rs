//! Defaults seeded into every builder before any source is added.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder carrying the built-in defaults (lowest precedence).
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.backend", "sled")?
        .set_default("model.provider", super::super::default_provider())?
        .set_default("model.model", super::super::default_model())?
        .set_default("model.api_key_env", super::super::default_api_key_env())?
        .set_default("server.name", super::super::default_server_name())
}
