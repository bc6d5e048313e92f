//! Record store contract consumed by the query engine and the state slice

use crate::core::entity::Record;
use crate::core::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistent store of records addressed by id
///
/// Implementations are free to choose the backend; the contract is:
/// - `put` upserts and owns the timestamps: `created_at` is kept from the
///   stored copy when one exists (otherwise from the incoming record) and
///   `updated_at` is set to the time of the write.
/// - `delete` and `bulk_delete` of unknown ids succeed.
/// - A write is visible to every read issued after the write's future resolved.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Insert or replace a record, returning its id
    async fn put(&self, record: T) -> Result<String>;

    /// Get a record by id
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// Get every record
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Replace an existing record
    ///
    /// Fails with [`StoreError::NotFound`](crate::core::StoreError::NotFound)
    /// when the id is unknown.
    async fn update(&self, record: T) -> Result<T>;

    /// Delete a record
    async fn delete(&self, id: &str) -> Result<()>;

    /// Delete several records at once
    async fn bulk_delete(&self, ids: &[String]) -> Result<()>;

    /// Delete every record
    async fn clear(&self) -> Result<()>;

    /// Number of stored records
    async fn count(&self) -> Result<usize> {
        Ok(self.get_all().await?.len())
    }
}

/// Apply the store's timestamp rule to `record` before it is written
///
/// `existing_created_at` is the creation time of the copy already in the store.
pub fn stamp<T: Record>(record: &mut T, existing_created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) {
    let created_at = existing_created_at.unwrap_or_else(|| record.created_at());
    record.set_timestamps(created_at, now);
}
