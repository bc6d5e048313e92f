//! Macro-generated test suite for `RecordStore<ExtendedCollateralCard>` contract validation.
//!
//! The `record_store_tests!` macro generates a test module that validates any
//! `RecordStore<ExtendedCollateralCard>` implementation against the full
//! contract: upsert with store-owned timestamps, update of unknown ids,
//! idempotent deletes, bulk delete, clear, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use collateral::storage::InMemoryRecordStore;
//!
//! record_store_tests!(InMemoryRecordStore::<ExtendedCollateralCard>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_put_and_get`: put then retrieve, verify nested sections survive
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_get_all_empty`: empty store lists nothing
//! - `test_get_all_multiple`: every put record is listed
//! - `test_update_existing` / `test_update_nonexistent`
//!
//! ## Timestamps
//! - `test_put_keeps_first_created_at`: re-put keeps created_at, bumps updated_at
//!
//! ## Deletes
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_bulk_delete`: removes exactly the listed ids, unknown ids ignored
//! - `test_clear`
//!
//! ## Edge Cases
//! - `test_put_same_id_overwrites`: upsert, never duplicates
//! - `test_concurrent_access`: parallel puts from spawned tasks

/// Generate a full `RecordStore<ExtendedCollateralCard>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `RecordStore<ExtendedCollateralCard>`. It is re-evaluated for each test to
/// ensure isolation. For the concurrent access test, the returned store must
/// also implement `Clone + 'static` (shared state via Arc pattern).
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use collateral::core::entity::{Collateral, Record};
            use collateral::core::model::{CardStatus, ExtendedCollateralCard, MainCategory};
            use collateral::core::service::RecordStore;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_put_and_get() {
                let store = $factory;
                let original = with_owner(
                    with_region(
                        card("a", "Квартира", MainCategory::RealEstate, 0),
                        "Москва",
                        "г. Москва, ул. Арбат, д. 5",
                    ),
                    "ООО Ромашка",
                );

                let id = store.put(original.clone()).await.unwrap();
                assert_eq!(id, "a");

                let retrieved = store.get("a").await.unwrap();
                assert!(retrieved.is_some(), "Record should exist after put");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.name(), "Квартира");
                assert_eq!(retrieved.main_category(), MainCategory::RealEstate);
                assert_eq!(retrieved.region(), Some("Москва"));
                assert_eq!(retrieved.partner_names(), vec!["ООО Ромашка".to_string()]);
                assert_eq!(retrieved.created_at(), original.created_at());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;

                let result = store.get("missing").await.unwrap();
                assert!(result.is_none(), "Getting an unknown id should return None");
            }

            #[tokio::test]
            async fn test_get_all_empty() {
                let store = $factory;

                let all = store.get_all().await.unwrap();
                assert!(all.is_empty(), "Empty store should list nothing");
                assert_eq!(store.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_get_all_multiple() {
                let store = $factory;
                let batch = sample_batch(5);
                let expected: Vec<String> = batch.iter().map(|c| c.id().to_string()).collect();

                for record in batch {
                    store.put(record).await.unwrap();
                }

                let all = store.get_all().await.unwrap();
                assert_count(&all, 5);
                for id in &expected {
                    assert!(
                        all.iter().any(|r| r.id() == id),
                        "Listed records should contain id {}",
                        id
                    );
                }
                assert_eq!(store.count().await.unwrap(), 5);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let mut record = card("u", "Автомобиль", MainCategory::Movable, 0);
                store.put(record.clone()).await.unwrap();

                record.card.status = CardStatus::Approved;
                record.market_value = Some(1_250_000.0);

                let updated = store.update(record).await.unwrap();
                assert_eq!(updated.status(), CardStatus::Approved);

                let retrieved = store.get("u").await.unwrap().unwrap();
                assert_eq!(retrieved.status(), CardStatus::Approved);
                assert_eq!(retrieved.market_value, Some(1_250_000.0));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;

                let err = store
                    .update(card("ghost", "Нет", MainCategory::Movable, 0))
                    .await
                    .unwrap_err();
                assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
                assert!(store.get("ghost").await.unwrap().is_none());
            }

            // ==================================================================
            // Timestamps
            // ==================================================================

            #[tokio::test]
            async fn test_put_keeps_first_created_at() {
                let store = $factory;
                let first = card("t", "Дом", MainCategory::RealEstate, 0);
                let created = first.created_at();
                store.put(first).await.unwrap();

                let stored = store.get("t").await.unwrap().unwrap();
                assert_eq!(stored.created_at(), created);
                assert!(stored.updated_at() > created);

                let mut again = card("t", "Дом с участком", MainCategory::RealEstate, 10);
                again.card.created_at = chrono::Utc::now();
                store.put(again).await.unwrap();

                let stored_again = store.get("t").await.unwrap().unwrap();
                assert_eq!(stored_again.name(), "Дом с участком");
                assert_eq!(stored_again.created_at(), created);
                assert!(stored_again.updated_at() >= stored.updated_at());
            }

            // ==================================================================
            // Deletes
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                store.put(card("d", "Гараж", MainCategory::RealEstate, 0)).await.unwrap();

                store.delete("d").await.unwrap();
                assert!(store.get("d").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;

                store.delete("never-existed").await.unwrap();
            }

            #[tokio::test]
            async fn test_bulk_delete() {
                let store = $factory;
                for record in sample_batch(4) {
                    store.put(record).await.unwrap();
                }

                store
                    .bulk_delete(&[
                        "batch-000".to_string(),
                        "batch-002".to_string(),
                        "unknown".to_string(),
                    ])
                    .await
                    .unwrap();

                let mut remaining: Vec<String> = store
                    .get_all()
                    .await
                    .unwrap()
                    .iter()
                    .map(|r| r.id().to_string())
                    .collect();
                remaining.sort();
                assert_eq!(remaining, vec!["batch-001", "batch-003"]);
            }

            #[tokio::test]
            async fn test_clear() {
                let store = $factory;
                for record in sample_batch(3) {
                    store.put(record).await.unwrap();
                }

                store.clear().await.unwrap();
                assert_eq!(store.count().await.unwrap(), 0);

                store.put(card("after", "Новый", MainCategory::Movable, 0)).await.unwrap();
                assert_eq!(store.count().await.unwrap(), 1);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_put_same_id_overwrites() {
                let store = $factory;
                store.put(card("dup", "Первый", MainCategory::Movable, 0)).await.unwrap();
                store.put(card("dup", "Второй", MainCategory::Movable, 0)).await.unwrap();

                let all: Vec<ExtendedCollateralCard> = store.get_all().await.unwrap();
                assert_count(&all, 1);
                assert_eq!(all[0].name(), "Второй");
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let store = $factory;
                let mut handles = Vec::new();

                for record in sample_batch(10) {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move { store.put(record).await }));
                }

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(store.count().await.unwrap(), 10);
            }
        }
    };
}
