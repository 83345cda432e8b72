//! In-memory record store for tests and ephemeral runs.

use super::contract::{AgentIter, AgentRecordStore};
use crate::agent::domain::AgentDefinition;
use crate::error::StorageError;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    by_name: HashMap<String, usize>,
    records: Vec<AgentDefinition>,
}

/// Record store held entirely in process memory.
#[derive(Default)]
pub struct MemoryAgentStore {
    inner: RwLock<Inner>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AgentRecordStore for MemoryAgentStore {
    fn put(&self, definition: &AgentDefinition) -> Result<(), StorageError> {
        let mut inner = self.inner.write();
        if inner.by_name.contains_key(&definition.name) {
            return Err(StorageError::DuplicateName(definition.name.clone()));
        }
        let index = inner.records.len();
        inner.records.push(definition.clone());
        inner.by_name.insert(definition.name.clone(), index);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<AgentDefinition, StorageError> {
        let inner = self.inner.read();
        inner
            .by_name
            .get(name)
            .map(|&index| inner.records[index].clone())
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn list(&self) -> Result<AgentIter<'_>, StorageError> {
        // Records are append-only, so walking by index yields a stable prefix.
        Ok(Box::new((0..).map_while(move |index| {
            self.inner.read().records.get(index).cloned().map(Ok)
        })))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
