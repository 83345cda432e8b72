//! Directory-backed record store: one `<name>.toml` file per agent.

use super::contract::{AgentIter, AgentRecordStore};
use crate::agent::domain::AgentDefinition;
use crate::error::StorageError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct DirectoryAgentStore {
    agents_dir: PathBuf,
}

impl DirectoryAgentStore {
    /// Open the store rooted at `agents_dir`, creating the directory if needed.
    pub fn open(agents_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(agents_dir).map_err(|e| {
            StorageError::Backend(format!(
                "Failed to create agents directory {}: {}",
                agents_dir.display(),
                e
            ))
        })?;
        Ok(Self {
            agents_dir: agents_dir.to_path_buf(),
        })
    }

    pub fn agents_dir(&self) -> &Path {
        &self.agents_dir
    }

    /// File path for an agent name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_file_stem(name) {
            return Err(StorageError::InvalidKey(name.to_string()));
        }
        Ok(self.agents_dir.join(format!("{}.toml", name)))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.agents_dir
            .join(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
    }

    fn load(path: &Path) -> Result<AgentDefinition, StorageError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!(
                "Failed to parse agent file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl AgentRecordStore for DirectoryAgentStore {
    fn put(&self, definition: &AgentDefinition) -> Result<(), StorageError> {
        let final_path = self.path_for(&definition.name)?;
        let content = toml::to_string_pretty(definition).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize agent definition: {}", e))
        })?;

        // Write the full record aside, then link it into place. The link fails
        // if the name is taken, so readers never see a partial file.
        let tmp_path = self.temp_path(&definition.name);
        std::fs::write(&tmp_path, content)?;
        let linked = std::fs::hard_link(&tmp_path, &final_path);
        if let Err(e) = std::fs::remove_file(&tmp_path) {
            tracing::warn!("Failed to remove temp file {}: {}", tmp_path.display(), e);
        }

        match linked {
            Ok(()) => {
                tracing::debug!(
                    agent = %definition.name,
                    backend = "directory",
                    path = %final_path.display(),
                    "Stored agent definition"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::DuplicateName(definition.name.clone()))
            }
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn get(&self, name: &str) -> Result<AgentDefinition, StorageError> {
        let path = match self.path_for(name) {
            Ok(path) => path,
            Err(_) => return Err(StorageError::NotFound(name.to_string())),
        };
        match Self::load(&path) {
            Err(StorageError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            other => other,
        }
    }

    fn list(&self) -> Result<AgentIter<'_>, StorageError> {
        let entries = std::fs::read_dir(&self.agents_dir).map_err(|e| {
            StorageError::Backend(format!(
                "Failed to read agents directory {}: {}",
                self.agents_dir.display(),
                e
            ))
        })?;

        let mut loaded = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.agents_dir.display(),
                        e
                    );
                    continue;
                }
            };

            let path = entry.path();
            if path.extension() != Some(std::ffi::OsStr::new("toml")) {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if is_safe_file_stem(stem) => stem.to_string(),
                _ => continue,
            };

            match Self::load(&path) {
                Ok(definition) => {
                    if definition.name != stem {
                        tracing::warn!(
                            "Agent name mismatch in {}: filename={}, record={}",
                            path.display(),
                            stem,
                            definition.name
                        );
                        continue;
                    }
                    loaded.push(definition);
                }
                Err(e) => {
                    tracing::error!("Skipping unreadable agent file {}: {}", path.display(), e);
                }
            }
        }

        // File systems keep no insertion order; creation time stands in for it.
        loaded.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(Box::new(loaded.into_iter().map(Ok)))
    }

    fn backend_name(&self) -> &'static str {
        "directory"
    }
}

fn is_safe_file_stem(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
