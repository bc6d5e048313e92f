//! LMDB record store using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store: no external server, data persists in
//! a directory. All operations are synchronous (memory-mapped I/O) and are
//! wrapped in `tokio::task::spawn_blocking` for async compatibility.
//!
//! # Layout
//!
//! One named sub-database per record shape (its `resource_name`), keyed by the
//! record id, values JSON-encoded via `serde_json`. Iteration follows key
//! order, so `get_all` returns records sorted by id.
//!
//! LMDB allows one environment per directory and process. Stores opened on
//! the same directory therefore share a single `Env`, which stays open while
//! any of them is alive.
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::entity::Record;
use crate::core::error::{Result, StoreError};
use crate::core::service::{RecordStore, stamp};
use async_trait::async_trait;
use chrono::Utc;
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, Weak};

/// Named sub-databases per environment (one per record shape)
const MAX_DBS: u32 = 16;

/// Environments currently open in this process, by canonical directory
static OPEN_ENVS: OnceLock<Mutex<HashMap<PathBuf, Weak<Env>>>> = OnceLock::new();

impl From<heed::Error> for StoreError {
    fn from(err: heed::Error) -> Self {
        StoreError::backend(err)
    }
}

fn lmdb_encode<T: serde::Serialize>(item: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(item)?)
}

fn lmdb_decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// LMDB-backed implementation of `RecordStore<T>`.
///
/// The `Env` is wrapped in an `Arc` for cheap cloning across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use collateral::storage::LmdbRecordStore;
///
/// let store = LmdbRecordStore::<ExtendedCollateralCard>::open("/var/lib/cms", 256)?;
/// store.put(card).await?;
/// ```
pub struct LmdbRecordStore<T: Record> {
    env: Arc<Env>,
    db: Database<Str, Bytes>,
    _marker: PhantomData<T>,
}

/// Open (or create) the LMDB environment at `path`, or return the one this
/// process already has open there.
///
/// `map_size_mb` only applies when the environment is opened for the first
/// time.
pub fn open_env(path: impl AsRef<Path>, map_size_mb: usize) -> Result<Arc<Env>> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(StoreError::backend)?;
    let key = path.canonicalize().map_err(StoreError::backend)?;

    let mut open = OPEN_ENVS
        .get_or_init(Default::default)
        .lock()
        .map_err(|_| StoreError::LockPoisoned("lmdb environments"))?;

    if let Some(env) = open.get(&key).and_then(Weak::upgrade) {
        return Ok(env);
    }

    let env = unsafe {
        EnvOpenOptions::new()
            .map_size(map_size_mb.saturating_mul(1024 * 1024))
            .max_dbs(MAX_DBS)
            .open(&key)?
    };
    let env = Arc::new(env);

    open.retain(|_, weak| weak.strong_count() > 0);
    open.insert(key, Arc::downgrade(&env));
    tracing::info!(path = %path.display(), map_size_mb, "lmdb environment opened");

    Ok(env)
}

impl<T: Record> LmdbRecordStore<T> {
    /// Open the sub-database named after `T::resource_name()` in the
    /// environment at `path`, creating both as needed.
    pub fn open(path: impl AsRef<Path>, map_size_mb: usize) -> Result<Self> {
        Self::with_env(open_env(path, map_size_mb)?)
    }

    /// Open the sub-database for `T` inside an already open environment
    pub fn with_env(env: Arc<Env>) -> Result<Self> {
        let mut wtxn = env.write_txn()?;
        let db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(T::resource_name()))?;
        wtxn.commit()?;

        tracing::debug!(resource = T::resource_name(), "lmdb record store opened");

        Ok(Self {
            env,
            db,
            _marker: PhantomData,
        })
    }
}

impl<T: Record> Clone for LmdbRecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            env: Arc::clone(&self.env),
            db: self.db,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for LmdbRecordStore<T> {
    async fn put(&self, mut record: T) -> Result<String> {
        let env = self.env.clone();
        let db = self.db;

        let id = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut wtxn = env.write_txn()?;
            let existing = match db.get(&wtxn, record.id())? {
                Some(bytes) => Some(lmdb_decode::<T>(bytes)?.created_at()),
                None => None,
            };
            stamp(&mut record, existing, Utc::now());

            let bytes = lmdb_encode(&record)?;
            db.put(&mut wtxn, record.id(), &bytes)?;
            wtxn.commit()?;
            Ok(record.id().to_string())
        })
        .await??;

        tracing::debug!(resource = T::resource_name(), id = %id, "record saved");
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let env = self.env.clone();
        let db = self.db;
        let key = id.to_owned();

        tokio::task::spawn_blocking(move || -> Result<Option<T>> {
            let rtxn = env.read_txn()?;
            match db.get(&rtxn, &key)? {
                Some(bytes) => Ok(Some(lmdb_decode(bytes)?)),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || -> Result<Vec<T>> {
            let rtxn = env.read_txn()?;
            let mut results = Vec::new();
            for item in db.iter(&rtxn)? {
                let (_key, bytes) = item?;
                results.push(lmdb_decode(bytes)?);
            }
            Ok(results)
        })
        .await?
    }

    async fn update(&self, mut record: T) -> Result<T> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || -> Result<T> {
            let mut wtxn = env.write_txn()?;
            let existing: T = match db.get(&wtxn, record.id())? {
                Some(bytes) => lmdb_decode(bytes)?,
                None => {
                    return Err(StoreError::NotFound {
                        resource: T::resource_name(),
                        id: record.id().to_string(),
                    });
                }
            };
            stamp(&mut record, Some(existing.created_at()), Utc::now());

            let bytes = lmdb_encode(&record)?;
            db.put(&mut wtxn, record.id(), &bytes)?;
            wtxn.commit()?;
            Ok(record)
        })
        .await?
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let env = self.env.clone();
        let db = self.db;
        let key = id.to_owned();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut wtxn = env.write_txn()?;
            db.delete(&mut wtxn, &key)?;
            wtxn.commit()?;
            Ok(())
        })
        .await??;

        tracing::debug!(resource = T::resource_name(), id = %id, "record deleted");
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        let env = self.env.clone();
        let db = self.db;
        let keys = ids.to_vec();

        let deleted = tokio::task::spawn_blocking(move || -> Result<usize> {
            let mut wtxn = env.write_txn()?;
            let mut deleted = 0;
            for key in &keys {
                if db.delete(&mut wtxn, key)? {
                    deleted += 1;
                }
            }
            wtxn.commit()?;
            Ok(deleted)
        })
        .await??;

        tracing::debug!(
            resource = T::resource_name(),
            requested = ids.len(),
            deleted,
            "records bulk deleted"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut wtxn = env.write_txn()?;
            db.clear(&mut wtxn)?;
            wtxn.commit()?;
            Ok(())
        })
        .await?
    }

    async fn count(&self) -> Result<usize> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || -> Result<usize> {
            let rtxn = env.read_txn()?;
            Ok(db.len(&rtxn)? as usize)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CollateralCard, MainCategory};
    use tempfile::TempDir;

    fn card(id: &str) -> CollateralCard {
        let mut card = CollateralCard::new(id, "Склад", MainCategory::RealEstate);
        card.id = id.to_string();
        card
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = LmdbRecordStore::<CollateralCard>::open(dir.path(), 16).unwrap();
            store.put(card("1")).await.unwrap();
            store.put(card("2")).await.unwrap();
        }

        let store = LmdbRecordStore::<CollateralCard>::open(dir.path(), 16).unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.get("2").await.unwrap().unwrap().name, "Склад");
    }

    #[test]
    fn test_open_env_is_shared_per_directory() {
        let dir = TempDir::new().unwrap();
        let first = open_env(dir.path(), 16).unwrap();
        let second = open_env(dir.path().join("."), 64).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = TempDir::new().unwrap();
        let third = open_env(other.path(), 16).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }
}
