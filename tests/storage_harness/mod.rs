//! Shared test harness for record store testing
//!
//! Provides card builders with deterministic ids and the
//! `record_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod record_store_tests;

use chrono::{DateTime, Duration, TimeZone, Utc};

use collateral::core::model::{
    Address, CardStatus, Document, ExtendedCollateralCard, MainCategory, Partner, PartnerRole,
};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A fixed point in time so tests can reason about ordering
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// An extended card with a chosen id, created `days` after [`base_time`]
pub fn card(id: &str, name: &str, category: MainCategory, days: i64) -> ExtendedCollateralCard {
    let mut card = ExtendedCollateralCard::new(&format!("З-{id}"), name, category);
    card.card.id = id.to_string();
    card.card.created_at = base_time() + Duration::days(days);
    card.card.updated_at = card.card.created_at;
    card
}

pub fn with_status(mut card: ExtendedCollateralCard, status: CardStatus) -> ExtendedCollateralCard {
    card.card.status = status;
    card
}

pub fn with_region(mut card: ExtendedCollateralCard, region: &str, full: &str) -> ExtendedCollateralCard {
    card.address = Some(Address {
        region: Some(region.to_string()),
        full_address: Some(full.to_string()),
        ..Default::default()
    });
    card
}

pub fn with_documents(mut card: ExtendedCollateralCard, n: usize) -> ExtendedCollateralCard {
    card.documents = Some(
        (0..n)
            .map(|i| Document::new(&format!("doc_{i}.pdf"), "scan", "application/pdf", 2048))
            .collect(),
    );
    card
}

pub fn with_owner(mut card: ExtendedCollateralCard, organization: &str) -> ExtendedCollateralCard {
    card.partners = Some(vec![Partner::legal(PartnerRole::Owner, organization)]);
    card
}

/// A small registry covering every category, status and optional section
pub fn sample_registry() -> Vec<ExtendedCollateralCard> {
    vec![
        with_documents(
            with_region(
                card("1", "Квартира на Тверской", MainCategory::RealEstate, 0),
                "Москва",
                "г. Москва, ул. Тверская, д. 1",
            ),
            2,
        ),
        with_owner(
            with_status(card("2", "Грузовик КАМАЗ", MainCategory::Movable, 1), CardStatus::Approved),
            "ООО Логистик",
        ),
        with_region(
            card("3", "Склад", MainCategory::RealEstate, 2),
            "Московская область",
            "Московская обл., г. Химки",
        ),
        with_status(
            card("4", "Право аренды", MainCategory::PropertyRights, 3),
            CardStatus::Archived,
        ),
        with_documents(card("5", "Экскаватор", MainCategory::Movable, 4), 0),
    ]
}

/// Generate `n` distinct cards in one category
pub fn sample_batch(n: usize) -> Vec<ExtendedCollateralCard> {
    (0..n)
        .map(|i| card(&format!("batch-{i:03}"), &format!("Объект {i}"), MainCategory::Movable, i as i64))
        .collect()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Ids of `records` in order
pub fn ids(records: &[ExtendedCollateralCard]) -> Vec<&str> {
    records.iter().map(|r| r.card.id.as_str()).collect()
}

/// Assert that a list contains exactly `n` records.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
