//! Record traits defining the core abstraction for all collateral shapes

use crate::core::field::FieldValue;
use crate::core::model::{CardStatus, MainCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Base trait for everything kept in a [`RecordStore`](crate::core::RecordStore).
///
/// All records have:
/// - id: Unique, immutable primary key
/// - created_at: Fixed at the first write
/// - updated_at: Refreshed on every write
///
/// Timestamps are owned by the store: `put` calls
/// [`set_timestamps`](Record::set_timestamps) before persisting.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The resource name used in logs and errors (e.g., "collateral_card")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Overwrite both timestamps (store use only)
    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);
}

/// Trait for records the query engine can filter and sort.
///
/// Every accessor is total: shapes that do not carry a piece of data (no
/// address, no documents) return the empty value, and filters that inspect it
/// then simply do not match.
pub trait Collateral: Record {
    /// Sortable keys declared by this record shape
    type Field: Copy + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Human-readable number, not necessarily unique
    fn number(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    fn main_category(&self) -> MainCategory;

    fn status(&self) -> CardStatus;

    /// Full address strings attached to the record
    fn full_addresses(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Region of the primary address
    fn region(&self) -> Option<&str> {
        None
    }

    /// Display names of associated partners (owners, pledgors, ...)
    fn partner_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Number of attached documents; an absent list counts as zero
    fn document_count(&self) -> usize {
        0
    }

    /// Number of associated partners
    fn partner_count(&self) -> usize {
        0
    }

    /// Get the value of a sortable field, `None` when the record lacks it
    fn field_value(&self, field: Self::Field) -> Option<FieldValue>;
}
