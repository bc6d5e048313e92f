//! In-memory implementation of RecordStore for testing and development

use crate::core::entity::Record;
use crate::core::error::{Result, StoreError};
use crate::core::service::{RecordStore, stamp};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory record store
///
/// Keeps records in insertion order, so `get_all` returns them in the order
/// they were first written (replacing a record keeps its position). Uses
/// `RwLock` for thread-safe access; clones share the same data.
#[derive(Clone)]
pub struct InMemoryRecordStore<T: Record> {
    records: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T: Record> InMemoryRecordStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a store pre-filled with `records`, timestamps left untouched
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();

        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }
}

impl<T: Record> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryRecordStore<T> {
    async fn put(&self, mut record: T) -> Result<String> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let existing = records.get(record.id()).map(Record::created_at);
        stamp(&mut record, existing, Utc::now());

        let id = record.id().to_string();
        records.insert(id.clone(), record);

        tracing::debug!(resource = T::resource_name(), id = %id, "record saved");
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        Ok(records.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, mut record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let slot = records
            .get_mut(record.id())
            .ok_or_else(|| StoreError::NotFound {
                resource: T::resource_name(),
                id: record.id().to_string(),
            })?;

        stamp(&mut record, Some(slot.created_at()), Utc::now());
        *slot = record.clone();

        tracing::debug!(resource = T::resource_name(), id = %record.id(), "record updated");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        if records.shift_remove(id).is_some() {
            tracing::debug!(resource = T::resource_name(), id = %id, "record deleted");
        }

        Ok(())
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let before = records.len();
        records.retain(|id, _| !ids.contains(id));

        tracing::debug!(
            resource = T::resource_name(),
            requested = ids.len(),
            deleted = before - records.len(),
            "records bulk deleted"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        records.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        Ok(records.len())
    }
}
