//! Typed error handling for record stores and backups
//!
//! The query engine itself never fails: missing fields degrade to "no match"
//! or "sorts last". Everything that can fail lives at the storage boundary and
//! is reported through [`StoreError`], which callers are expected to surface
//! rather than replace with an empty view.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.update(card).await {
//!     Ok(card) => println!("saved {}", card.id()),
//!     Err(StoreError::NotFound { id, .. }) => eprintln!("card {} is gone", id),
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

/// Errors produced by [`RecordStore`](crate::core::RecordStore) implementations
/// and by backup import/export.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record does not exist in the store
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// A lock guarding in-memory state was poisoned by a panicking writer
    #[error("Failed to acquire {0} lock")]
    LockPoisoned(&'static str),

    /// A record or backup could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backup file is structurally valid JSON but not a usable backup
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    /// The storage backend reported an error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::LockPoisoned(_) => "LOCK_POISONED",
            StoreError::Serialization(_) => "SERIALIZATION_ERROR",
            StoreError::InvalidBackup(_) => "INVALID_BACKUP",
            StoreError::Backend(_) => "STORAGE_ERROR",
            StoreError::Task(_) => "TASK_FAILED",
        }
    }

    /// Shorthand for a backend error built from any displayable cause
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Result alias used across the storage layer
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
