//! Record store implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "lmdb")]
pub mod lmdb;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryRecordStore;
#[cfg(feature = "lmdb")]
pub use lmdb::{LmdbRecordStore, open_env};

use crate::config::{StorageBackend, StorageConfig};
use crate::core::entity::Record;
use crate::core::error::{Result, StoreError};
use crate::core::service::RecordStore;
use crate::core::workspace::Workspace;
use std::sync::Arc;

/// Open the record store described by `config`
///
/// Fails with a backend error when the requested backend was not compiled in
/// or lacks its data directory.
pub fn open_store<T: Record>(config: &StorageConfig) -> Result<Arc<dyn RecordStore<T>>> {
    match config.backend {
        #[cfg(feature = "in-memory")]
        StorageBackend::InMemory => Ok(Arc::new(InMemoryRecordStore::<T>::new())),

        #[cfg(feature = "lmdb")]
        StorageBackend::Lmdb => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| StoreError::backend("lmdb backend requires a data path"))?;
            Ok(Arc::new(LmdbRecordStore::<T>::open(path, config.map_size_mb)?))
        }

        #[allow(unreachable_patterns)]
        other => Err(StoreError::backend(format!(
            "storage backend {other:?} is not enabled in this build"
        ))),
    }
}

/// Open cards of shape `T` together with the partner, document and settings
/// stores, all on the backend described by `config`
pub fn open_workspace<T: Record>(config: &StorageConfig) -> Result<Workspace<T>> {
    Ok(Workspace::new(
        open_store(config)?,
        open_store(config)?,
        open_store(config)?,
        open_store(config)?,
    ))
}
