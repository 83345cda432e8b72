//! Agent record store port and adapters.

pub mod contract;
pub mod directory;
pub mod memory;
pub mod sled_store;

pub use contract::{AgentIter, AgentRecordStore};
pub use directory::DirectoryAgentStore;
pub use memory::MemoryAgentStore;
pub use sled_store::SledAgentStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::ApiError;
use std::sync::Arc;

/// Open the record store selected by configuration.
///
/// Called once per process; the returned handle is shared by every caller.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn AgentRecordStore>, ApiError> {
    let path = config.resolve_path()?;
    let store: Arc<dyn AgentRecordStore> = match (config.backend, path) {
        (StorageBackend::Memory, _) => Arc::new(MemoryAgentStore::new()),
        (StorageBackend::Sled, Some(path)) => Arc::new(SledAgentStore::open(&path)?),
        (StorageBackend::Directory, Some(path)) => Arc::new(DirectoryAgentStore::open(&path)?),
        (backend, None) => {
            return Err(ApiError::ConfigError(format!(
                "No storage path resolved for {} backend",
                backend
            )))
        }
    };
    tracing::info!(backend = %config.backend, "Opened agent record store");
    Ok(store)
}
