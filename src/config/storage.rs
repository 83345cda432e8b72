//! StorageConfig: which record store backend to open and where.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Record store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded sled database
    #[default]
    Sled,
    /// Directory of `<name>.toml` files
    Directory,
    /// Process-local, nothing persisted
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageBackend::Sled => "sled",
            StorageBackend::Directory => "directory",
            StorageBackend::Memory => "memory",
        };
        f.write_str(s)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Overrides the backend's default XDG location
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the on-disk location for the configured backend.
    ///
    /// Returns `None` for the memory backend.
    pub fn resolve_path(&self) -> Result<Option<PathBuf>, ApiError> {
        if let Some(path) = &self.path {
            if !path.as_os_str().is_empty() {
                return Ok(Some(path.clone()));
            }
        }
        match self.backend {
            StorageBackend::Sled => xdg::default_store_dir().map(Some),
            StorageBackend::Directory => xdg::default_agents_dir().map(Some),
            StorageBackend::Memory => Ok(None),
        }
    }
}
