//! Filter, sort and pagination over collateral records
//!
//! Every screen that lists records derives its view the same way:
//!
//! ```text
//! all records ──▶ Predicate (AND of filter conditions) ──▶ Comparator (stable) ──▶ view
//! ```
//!
//! The derivation is a pure function of `(records, filter, sort)`. It never
//! mutates its input and keeps no state between calls, so callers simply call
//! [`query`] again whenever any of the three inputs changes.
//!
//! # Example
//!
//! ```rust,ignore
//! let filter = FilterSpec {
//!     main_category: Some(MainCategory::RealEstate),
//!     search_query: Some("квартира".into()),
//!     ..Default::default()
//! };
//! let sort = SortSpec::<CardField>::parse("createdAt:desc");
//! let view = query(&cards, &filter, sort.as_ref());
//! ```

use crate::core::entity::{Collateral, Record};
use crate::core::error::Result;
use crate::core::model::{CardStatus, MainCategory, Partner};
use crate::core::service::RecordStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Constraints a record must satisfy to appear in a view
///
/// Every option is independent and absent by default; an absent option places
/// no constraint. Populated options are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Exact category match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<MainCategory>,

    /// Exact status match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,

    /// Case-insensitive substring of name, number, full address or partner name.
    /// Blank strings place no constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    /// Inclusive lower bound on `created_at`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `created_at`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,

    /// Case-insensitive substring of the address region.
    /// Blank strings place no constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// `true`: at least one document. `false`: none (an absent list counts as none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_documents: Option<bool>,
}

impl FilterSpec {
    /// True when no option constrains the view
    pub fn is_empty(&self) -> bool {
        self.compile().conditions() == 0
    }

    /// Build the composite predicate for this filter
    pub fn compile(&self) -> Predicate {
        Predicate {
            main_category: self.main_category,
            status: self.status,
            needle: non_blank(&self.search_query).map(str::to_lowercase),
            date_from: self.date_from,
            date_to: self.date_to,
            region: non_blank(&self.region).map(str::to_lowercase),
            has_documents: self.has_documents,
        }
    }

    /// Shorthand for `compile().test(record)`
    pub fn matches<T: Collateral>(&self, record: &T) -> bool {
        self.compile().test(record)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// A compiled [`FilterSpec`]: the AND of its populated conditions
///
/// Needles are case-folded once at compile time.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    main_category: Option<MainCategory>,
    status: Option<CardStatus>,
    needle: Option<String>,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    region: Option<String>,
    has_documents: Option<bool>,
}

impl Predicate {
    /// Number of populated conditions
    pub fn conditions(&self) -> usize {
        [
            self.main_category.is_some(),
            self.status.is_some(),
            self.needle.is_some(),
            self.date_from.is_some(),
            self.date_to.is_some(),
            self.region.is_some(),
            self.has_documents.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// True iff the record satisfies every populated condition
    pub fn test<T: Collateral>(&self, record: &T) -> bool {
        self.main_category
            .is_none_or(|category| record.main_category() == category)
            && self.status.is_none_or(|status| record.status() == status)
            && self
                .date_from
                .is_none_or(|from| record.created_at() >= from)
            && self.date_to.is_none_or(|to| record.created_at() <= to)
            && self
                .has_documents
                .is_none_or(|wanted| (record.document_count() > 0) == wanted)
            && self
                .region
                .as_deref()
                .is_none_or(|region| record.region().is_some_and(|r| contains_folded(r, region)))
            && self
                .needle
                .as_deref()
                .is_none_or(|needle| matches_search(record, needle))
    }
}

/// `needle` must already be lowercase
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_search<T: Collateral>(record: &T, needle: &str) -> bool {
    contains_folded(record.name(), needle)
        || contains_folded(record.number(), needle)
        || record
            .full_addresses()
            .into_iter()
            .any(|address| contains_folded(address, needle))
        || record
            .partner_names()
            .iter()
            .any(|name| contains_folded(name, needle))
}

/// Partners whose names match `query` case-insensitively, or whose INN
/// contains it verbatim
pub fn search_partners<'a>(partners: &'a [Partner], query: &str) -> Vec<&'a Partner> {
    let needle = query.to_lowercase();
    let field_matches = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| contains_folded(value, &needle))
    };

    partners
        .iter()
        .filter(|p| {
            field_matches(&p.last_name)
                || field_matches(&p.first_name)
                || field_matches(&p.organization_name)
                || p.inn.as_deref().is_some_and(|inn| inn.contains(query))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Single-key ordering of a view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortSpec<F> {
    pub field: F,
    #[serde(default)]
    pub order: SortOrder,
}

impl<F> SortSpec<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }
}

impl<F: DeserializeOwned> SortSpec<F> {
    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    ///
    /// Field names use the record's camelCase keys (`createdAt`, `name`).
    /// Unknown fields or directions yield `None`, which leaves the view in
    /// its filtered order.
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, order) = match expr.trim().split_once(':') {
            Some((field, "asc")) => (field, SortOrder::Asc),
            Some((field, "desc")) => (field, SortOrder::Desc),
            Some(_) => return None,
            None => (expr.trim(), SortOrder::Asc),
        };

        let field = serde_json::from_value(serde_json::Value::String(field.to_string())).ok()?;
        Some(Self { field, order })
    }
}

/// Comparator built from a [`SortSpec`]
///
/// Records lacking the sort field are ordered after every record that has it,
/// in both directions. `Desc` only inverts the comparison between two present
/// values.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<F> {
    spec: SortSpec<F>,
}

impl<F: Copy> Comparator<F> {
    pub fn new(spec: SortSpec<F>) -> Self {
        Self { spec }
    }

    pub fn compare<T>(&self, a: &T, b: &T) -> Ordering
    where
        T: Collateral<Field = F>,
    {
        match (a.field_value(self.spec.field), b.field_value(self.spec.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = a.compare(&b);
                match self.spec.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Derive the filtered, sorted view of `records`
///
/// Returns a new vector; `records` is never modified. Without a sort the
/// filtered records keep their input order, and with one, records that compare
/// equal keep it too.
pub fn query<T: Collateral>(
    records: &[T],
    filter: &FilterSpec,
    sort: Option<&SortSpec<T::Field>>,
) -> Vec<T> {
    let predicate = filter.compile();
    let mut view: Vec<T> = records
        .iter()
        .filter(|record| predicate.test(*record))
        .cloned()
        .collect();

    if let Some(spec) = sort {
        let comparator = Comparator::new(*spec);
        view.sort_by(|a, b| comparator.compare(a, b));
    }

    tracing::trace!(
        resource = T::resource_name(),
        total = records.len(),
        matched = view.len(),
        conditions = predicate.conditions(),
        sorted = sort.is_some(),
        "derived view"
    );

    view
}

/// Load every record from `store` and derive the view
///
/// Store errors are returned as-is; a failed load never turns into an empty view.
pub async fn fetch<T, S>(
    store: &S,
    filter: &FilterSpec,
    sort: Option<&SortSpec<T::Field>>,
) -> Result<Vec<T>>
where
    T: Collateral,
    S: RecordStore<T> + ?Sized,
{
    let records = store.get_all().await?;
    Ok(query(&records, filter, sort))
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of a derived view
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// The records on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of records per page
    pub limit: usize,

    /// Total number of records in the view
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PageMeta {
    /// Page numbers below 1 are raised to 1; `limit` is clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let total_pages = total.div_ceil(limit);
        let end = (page - 1).saturating_mul(limit).saturating_add(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: end < total,
            has_prev: page > 1,
        }
    }

    fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.limit).min(self.total);
        start..start.saturating_add(self.limit).min(self.total)
    }
}

/// Cut page `page` out of an already derived view
pub fn paginate<T: Record>(view: &[T], page: usize, limit: usize) -> Page<T> {
    let pagination = PageMeta::new(page, limit, view.len());
    let data = view[pagination.range()].to_vec();

    Page { data, pagination }
}
