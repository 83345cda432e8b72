use crate::agent::domain::AgentDefinition;
use crate::error::StorageError;

/// Lazy sequence of stored definitions in creation order.
pub type AgentIter<'a> = Box<dyn Iterator<Item = Result<AgentDefinition, StorageError>> + 'a>;

/// Persistence port for agent definitions.
///
/// No update or delete. Implementations must make `put`
/// atomic per name: of several concurrent puts for one name exactly one succeeds
/// and the rest see `DuplicateName`. A successful `put` is visible to every later
/// `get` and `list`.
pub trait AgentRecordStore: Send + Sync {
    /// Persist a new definition, failing with `DuplicateName` if the name is taken.
    fn put(&self, definition: &AgentDefinition) -> Result<(), StorageError>;

    /// Fetch one definition, failing with `NotFound` if absent.
    fn get(&self, name: &str) -> Result<AgentDefinition, StorageError>;

    /// Walk all definitions in creation order. Each call starts a fresh walk.
    fn list(&self) -> Result<AgentIter<'_>, StorageError>;

    /// Short backend label for logs and status output.
    fn backend_name(&self) -> &'static str;
}
