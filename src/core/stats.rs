//! Registry statistics

use crate::core::entity::Collateral;
use crate::core::model::{CardStatus, MainCategory};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts over a collection of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    /// Keyed by the snake_case category name; every category is present
    pub by_category: BTreeMap<&'static str, usize>,
    /// Keyed by the snake_case status name; every status is present
    pub by_status: BTreeMap<&'static str, usize>,
    pub with_documents: usize,
    pub with_partners: usize,
}

impl Statistics {
    pub fn collect<T: Collateral>(records: &[T]) -> Self {
        let mut stats = Self {
            total: records.len(),
            by_category: MainCategory::ALL.iter().map(|c| (c.as_str(), 0)).collect(),
            by_status: CardStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect(),
            ..Default::default()
        };

        for record in records {
            *stats.by_category.entry(record.main_category().as_str()).or_default() += 1;
            *stats.by_status.entry(record.status().as_str()).or_default() += 1;
            stats.with_documents += usize::from(record.document_count() > 0);
            stats.with_partners += usize::from(record.partner_count() > 0);
        }

        stats
    }

    pub fn category(&self, category: MainCategory) -> usize {
        self.by_category.get(category.as_str()).copied().unwrap_or(0)
    }

    pub fn status(&self, status: CardStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}
