//! Sled-backed record store.
//!
//! Two trees: `agents` maps name to the JSON-encoded definition, `agents_by_seq`
//! maps a big-endian monotonic id to the name. Both are written in one
//! transaction, so the sequence tree never references a missing record.

use super::contract::{AgentIter, AgentRecordStore};
use crate::agent::domain::AgentDefinition;
use crate::error::StorageError;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, Transactional, Tree};
use std::path::Path;

const AGENTS_TREE: &str = "agents";
const SEQUENCE_TREE: &str = "agents_by_seq";

pub struct SledAgentStore {
    db: Db,
    agents: Tree,
    sequence: Tree,
}

impl SledAgentStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Wrap an already opened database.
    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let agents = db.open_tree(AGENTS_TREE)?;
        let sequence = db.open_tree(SEQUENCE_TREE)?;
        Ok(Self {
            db,
            agents,
            sequence,
        })
    }

    /// The record is committed once the transaction returns; a failed flush
    /// only delays durability.
    fn finish_put(name: &str, flushed: sled::Result<usize>) -> Result<(), StorageError> {
        match flushed {
            Ok(_) => tracing::debug!(agent = %name, backend = "sled", "Stored agent definition"),
            Err(e) => tracing::warn!(
                agent = %name,
                backend = "sled",
                error = %e,
                "Stored agent definition but flush failed"
            ),
        }
        Ok(())
    }

    fn decode(name: &str, bytes: &[u8]) -> Result<AgentDefinition, StorageError> {
        serde_json::from_slice(bytes).map_err(|e| {
            StorageError::Serialization(format!("Corrupt record for agent '{}': {}", name, e))
        })
    }
}

impl AgentRecordStore for SledAgentStore {
    fn put(&self, definition: &AgentDefinition) -> Result<(), StorageError> {
        let value = serde_json::to_vec(definition)?;
        let key = definition.name.as_bytes();
        let seq = self.db.generate_id()?.to_be_bytes();

        let result = (&self.agents, &self.sequence).transaction(|(agents, sequence)| {
            if agents.get(key)?.is_some() {
                return Err(ConflictableTransactionError::Abort(()));
            }
            agents.insert(key, value.as_slice())?;
            sequence.insert(&seq[..], key)?;
            Ok(())
        });

        match result {
            Ok(()) => {}
            Err(TransactionError::Abort(())) => {
                return Err(StorageError::DuplicateName(definition.name.clone()))
            }
            Err(TransactionError::Storage(e)) => return Err(e.into()),
        }

        Self::finish_put(&definition.name, self.db.flush())
    }

    fn get(&self, name: &str) -> Result<AgentDefinition, StorageError> {
        match self.agents.get(name.as_bytes())? {
            Some(bytes) => Self::decode(name, &bytes),
            None => Err(StorageError::NotFound(name.to_string())),
        }
    }

    fn list(&self) -> Result<AgentIter<'_>, StorageError> {
        let iter = self.sequence.iter().map(move |entry| {
            let (_, name) = entry?;
            let name = String::from_utf8_lossy(&name).into_owned();
            match self.agents.get(name.as_bytes())? {
                Some(bytes) => Self::decode(&name, &bytes),
                None => Err(StorageError::NotFound(name)),
            }
        });
        Ok(Box::new(iter))
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_failure_after_commit_is_success() {
        let flushed = Err(sled::Error::Unsupported("flush".to_string()));
        assert!(SledAgentStore::finish_put("crm", flushed).is_ok());
        assert!(SledAgentStore::finish_put("crm", Ok(0)).is_ok());
    }
}
