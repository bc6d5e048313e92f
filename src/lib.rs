//! # Collateral Registry
//!
//! Record model, query engine and storage for a registry of collateral
//! (pledged assets) records.
//!
//! ## Features
//!
//! - **Three record shapes**: base cards, extended cards and registry entries,
//!   all filtered and sorted by the same engine
//! - **Pure query engine**: `(records, filter, sort) -> view`, AND-combined
//!   filters and a stable, null-last sort
//! - **Typed sort keys**: every shape declares the fields it can be sorted by
//! - **Pluggable storage**: in-memory (default) and LMDB backends behind one
//!   async `RecordStore` trait
//! - **State slice**: a single owner of the listed collection whose view is
//!   rebuilt on every change
//! - **Workspace**: cards together with partner and document directories and
//!   persisted application settings
//! - **Backups**: versioned JSON export and import of the whole workspace
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use collateral::prelude::*;
//!
//! let store = InMemoryRecordStore::<ExtendedCollateralCard>::new();
//! store.put(ExtendedCollateralCard::new("З-001", "Квартира", MainCategory::RealEstate)).await?;
//!
//! let filter = FilterSpec {
//!     search_query: Some("кварт".into()),
//!     ..Default::default()
//! };
//! let sort = SortSpec::desc(ExtendedCardField::CreatedAt);
//! let view = fetch(&store, &filter, Some(&sort)).await?;
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Collateral, Record},
        error::StoreError,
        field::FieldValue,
        service::RecordStore,
    };

    // === Model ===
    pub use crate::core::model::{
        Address, CardField, CardStatus, Classification, CollateralCard, Document,
        ExtendedCardField, ExtendedCollateralCard, MainCategory, Partner, PartnerRole,
        PartnerType, RegistryEntry, RegistryField,
    };

    // === Query ===
    pub use crate::core::query::{
        FilterSpec, Page, PageMeta, SortOrder, SortSpec, fetch, paginate, query, search_partners,
    };

    // === State, Statistics, Backup ===
    pub use crate::core::backup::{Backup, export_backup, import_backup};
    pub use crate::core::registry::RegistryState;
    pub use crate::core::stats::Statistics;
    pub use crate::core::workspace::{StoredSettings, Workspace};

    // === Storage ===
    pub use crate::storage::{open_store, open_workspace};
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRecordStore;
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbRecordStore;

    // === Config ===
    pub use crate::config::{AppSettings, CmsConfig, SettingsPatch, StorageBackend, StorageConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
