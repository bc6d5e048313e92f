//! Integration tests for InMemoryRecordStore using the storage test harness.
//!
//! This file invokes `record_store_tests!` to validate that InMemoryRecordStore
//! fully conforms to the RecordStore<T> contract, then checks the ordering
//! guarantee only the in-memory backend makes.

#![cfg(feature = "in-memory")]

#[macro_use]
mod storage_harness;

use collateral::core::model::ExtendedCollateralCard;
use collateral::core::service::RecordStore;
use collateral::storage::InMemoryRecordStore;
use storage_harness::*;

record_store_tests!(InMemoryRecordStore::<ExtendedCollateralCard>::new());

#[tokio::test]
async fn test_get_all_keeps_insertion_order() {
    let store = InMemoryRecordStore::<ExtendedCollateralCard>::new();
    for record in sample_registry().into_iter().rev() {
        store.put(record).await.unwrap();
    }

    let all = store.get_all().await.unwrap();
    assert_eq!(ids(&all), vec!["5", "4", "3", "2", "1"]);
}

#[tokio::test]
async fn test_replacing_keeps_position() {
    let store = InMemoryRecordStore::with_records(sample_registry());
    let mut second = store.get("2").await.unwrap().unwrap();
    second.card.name = "Тягач".to_string();
    store.update(second).await.unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(all[1].card.name, "Тягач");
}

#[tokio::test]
async fn test_bulk_delete_keeps_order_of_survivors() {
    let store = InMemoryRecordStore::with_records(sample_registry());
    store
        .bulk_delete(&["2".to_string(), "4".to_string()])
        .await
        .unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(ids(&all), vec!["1", "3", "5"]);
}
