//! Shared fixtures.

use agent_factory::agent::{DirectoryAgentStore, MemoryAgentStore, SledAgentStore};
use agent_factory::config::ModelConfig;
use agent_factory::{AgentDefinition, AgentFactoryService, AgentRecordStore, AgentRole};
use chrono::{Duration, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tempfile::TempDir;

/// A store plus the temp directory backing it, if any.
pub struct StoreFixture {
    pub label: &'static str,
    pub store: Arc<dyn AgentRecordStore>,
    _dir: Option<TempDir>,
}

pub fn all_stores() -> Vec<StoreFixture> {
    let sled_dir = TempDir::new().unwrap();
    let sled = SledAgentStore::open(&sled_dir.path().join("store")).unwrap();
    let files_dir = TempDir::new().unwrap();
    let files = DirectoryAgentStore::open(&files_dir.path().join("agents")).unwrap();

    vec![
        StoreFixture {
            label: "memory",
            store: Arc::new(MemoryAgentStore::new()),
            _dir: None,
        },
        StoreFixture {
            label: "sled",
            store: Arc::new(sled),
            _dir: Some(sled_dir),
        },
        StoreFixture {
            label: "directory",
            store: Arc::new(files),
            _dir: Some(files_dir),
        },
    ]
}

pub fn service_over(store: Arc<dyn AgentRecordStore>) -> AgentFactoryService {
    AgentFactoryService::new(store, ModelConfig::default())
}

/// A definition whose creation time is `offset_secs` after a fixed instant.
pub fn definition(name: &str, role: AgentRole, offset_secs: i64) -> AgentDefinition {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    AgentDefinition {
        name: name.to_string(),
        role,
        system_message: format!("Instructions for {}", name),
        capabilities: BTreeSet::new(),
        model: "llama-3.3-70b-versatile".to_string(),
        provider: "groq".to_string(),
        generated_code: Some(format!("# code for {}\n", name)),
        created_at: base + Duration::seconds(offset_secs),
        metadata: BTreeMap::new(),
    }
}

pub fn names(store: &dyn AgentRecordStore) -> Vec<String> {
    store
        .list()
        .unwrap()
        .map(|d| d.unwrap().name)
        .collect()
}
