//! Core module containing the record model, the query engine and the store contract

pub mod backup;
pub mod entity;
pub mod error;
pub mod field;
pub mod model;
pub mod query;
pub mod registry;
pub mod service;
pub mod stats;
pub mod workspace;

pub use backup::{BACKUP_VERSION, Backup, BackupData, export_backup, import_backup};
pub use entity::{Collateral, Record};
pub use error::{Result, StoreError};
pub use field::{FieldValue, collate};
pub use model::{
    Address, CardField, CardStatus, Classification, CollateralCard, Document, ExtendedCardField,
    ExtendedCollateralCard, MainCategory, Partner, PartnerRole, PartnerType, RegistryEntry,
    RegistryField,
};
pub use query::{
    Comparator, FilterSpec, MAX_PAGE_SIZE, Page, PageMeta, Predicate, SortOrder, SortSpec, fetch,
    paginate, query, search_partners,
};
pub use registry::RegistryState;
pub use service::RecordStore;
pub use stats::Statistics;
pub use workspace::{SETTINGS_KEY, StoredSettings, Workspace};
