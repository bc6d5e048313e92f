//! Owned state slice for one list screen
//!
//! [`RegistryState`] is the single owner of the in-memory collection shown by a
//! screen. The collection changes only through the mutation methods below, and
//! each of them rebuilds the derived view from scratch with
//! [`query`](crate::core::query::query). The view is a read-side projection:
//! nothing writes to it directly.
//!
//! ```text
//! set_all / add / update / remove / remove_many ─┐
//! set_filter / clear_filter / set_sort ──────────┼──▶ query(items, filter, sort) ──▶ view
//! refresh(store) ────────────────────────────────┘
//! ```

use crate::core::entity::Collateral;
use crate::core::error::Result;
use crate::core::query::{FilterSpec, SortSpec, query};
use crate::core::service::RecordStore;

/// Items, filter, sort and the view derived from them
#[derive(Debug, Clone)]
pub struct RegistryState<T: Collateral> {
    items: Vec<T>,
    view: Vec<T>,
    filter: FilterSpec,
    sort: Option<SortSpec<T::Field>>,
    selected: Option<String>,
    loading: bool,
    error: Option<String>,
    version: u64,
}

impl<T: Collateral> Default for RegistryState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Collateral> RegistryState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            view: Vec::new(),
            filter: FilterSpec::default(),
            sort: None,
            selected: None,
            loading: false,
            error: None,
            version: 0,
        }
    }

    // === Read side ===

    /// Every record, in collection order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Filtered and sorted records
    pub fn view(&self) -> &[T] {
        &self.view
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortSpec<T::Field>> {
        self.sort.as_ref()
    }

    /// The selected record, if it still exists
    pub fn selected(&self) -> Option<&T> {
        let id = self.selected.as_deref()?;
        self.items.iter().find(|record| record.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Incremented by every mutation that rebuilds the view
    pub fn version(&self) -> u64 {
        self.version
    }

    // === Mutations ===

    /// Replace the whole collection
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.recompute();
    }

    /// Append a record
    pub fn add(&mut self, record: T) {
        self.items.push(record);
        self.recompute();
    }

    /// Replace the record with the same id in place. Unknown ids are ignored.
    pub fn update(&mut self, record: T) -> bool {
        let Some(slot) = self.items.iter_mut().find(|r| r.id() == record.id()) else {
            return false;
        };
        *slot = record;
        self.recompute();
        true
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|record| record.id() != id);
        self.recompute();
    }

    pub fn remove_many(&mut self, ids: &[String]) {
        self.items.retain(|record| !ids.iter().any(|id| id == record.id()));
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec<T::Field>>) {
        self.sort = sort;
        self.recompute();
    }

    /// Select a record by id, or clear the selection
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Reload the collection from `store`
    ///
    /// On failure the previous items and view are kept, the message is kept
    /// in [`error`](Self::error), and the error is returned to the caller.
    pub async fn refresh<S>(&mut self, store: &S) -> Result<()>
    where
        S: RecordStore<T> + ?Sized,
    {
        self.loading = true;
        let loaded = store.get_all().await;
        self.loading = false;

        match loaded {
            Ok(items) => {
                self.error = None;
                self.set_all(items);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(resource = T::resource_name(), error = %err, "failed to load records");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn recompute(&mut self) {
        self.view = query(&self.items, &self.filter, self.sort.as_ref());
        self.version += 1;
    }
}
