//! XDG Base Directory utilities for agent factory data and config.

use crate::error::ApiError;
use std::path::PathBuf;

/// Directory name used under the XDG homes.
pub const APP_DIR: &str = "agent-factory";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/agent-factory/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/agent-factory/store` (sled database)
pub fn default_store_dir() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_DIR).join("store"))
}

/// `$XDG_DATA_HOME/agent-factory/agents` (one TOML file per agent)
pub fn default_agents_dir() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_DIR).join("agents"))
}
