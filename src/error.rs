//! Error types for the record store and the factory API.

use thiserror::Error;

/// Errors raised by agent record store backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Agent already exists: {0}")]
    DuplicateName(String),

    #[error("Agent not found: {0}")]
    NotFound(String),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StorageError::IoError(io),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors surfaced by the factory service, the tool interface and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Agent already exists: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(String),
}

impl ApiError {
    /// Stable machine-readable code carried in tool-call failures.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::InvalidRole(_) => "invalid_role",
            ApiError::DuplicateName(_) => "duplicate_name",
            ApiError::NotFound(_) => "not_found",
            ApiError::StorageError(_) => "storage_error",
            ApiError::ConfigError(_) => "config_error",
            ApiError::TransportError(_) => "transport_error",
        }
    }
}

// Name collisions and misses keep their identity across the store boundary.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateName(name) => ApiError::DuplicateName(name),
            StorageError::NotFound(name) => ApiError::NotFound(format!("Agent '{}'", name)),
            other => ApiError::StorageError(other),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
