//! Store reconciliation tests against a live PostgreSQL instance
//!
//! These run only when TARIFF_SYNC_TEST_DATABASE_URL points at a database
//! the suite may write to; without it every test returns early. Each test
//! works on its own calendar date so the tests are independent.

use chrono::NaiveDate;
use std::sync::Arc;
use tariff_sync::adapters::postgresql::{PostgresClient, TariffStore};
use tariff_sync::config::PostgresConfig;
use tariff_sync::domain::{TariffSnapshot, WarehouseTariff};

const DATABASE_URL_VAR: &str = "TARIFF_SYNC_TEST_DATABASE_URL";

/// Build a store against the test database, or None to skip the test
async fn test_store() -> Option<TariffStore> {
    let connection_string = std::env::var(DATABASE_URL_VAR).ok()?;

    let config = PostgresConfig {
        connection_string,
        max_connections: 4,
        connection_timeout_seconds: 10,
        statement_timeout_seconds: 30,
    };

    let client = Arc::new(PostgresClient::new(config).expect("pool should build"));
    client.ensure_schema().await.expect("schema should apply");

    Some(TariffStore::new(client))
}

/// Remove any request row for the date so reruns start clean
async fn reset_date(store: &TariffStore, date: NaiveDate) {
    store
        .client()
        .execute(
            "DELETE FROM tariff_requests WHERE request_date = $1",
            &[&date],
        )
        .await
        .expect("cleanup should succeed");
}

fn warehouse(name: &str, coefficient: Option<f64>) -> WarehouseTariff {
    WarehouseTariff {
        coefficient,
        delivery_base: Some(48.0),
        ..WarehouseTariff::named(name)
    }
}

fn snapshot(date: NaiveDate, warehouses: Vec<WarehouseTariff>) -> TariffSnapshot {
    TariffSnapshot {
        request_date: date,
        next_boundary_date: NaiveDate::from_ymd_opt(2025, 8, 1),
        max_boundary_date: NaiveDate::from_ymd_opt(2025, 8, 31),
        warehouses,
    }
}

#[tokio::test]
async fn test_second_save_replaces_warehouse_set() {
    let Some(store) = test_store().await else {
        return;
    };
    let date = NaiveDate::from_ymd_opt(2025, 7, 21).unwrap();
    reset_date(&store, date).await;

    store
        .save(&snapshot(
            date,
            vec![
                warehouse("Коледино", Some(160.0)),
                warehouse("Тула", Some(150.0)),
            ],
        ))
        .await
        .unwrap();

    let first = store.for_date(date).await.unwrap().unwrap();
    assert_eq!(first.warehouses.len(), 2);

    // Second save for the same date: different set, one shared warehouse
    // with changed numbers.
    store
        .save(&snapshot(
            date,
            vec![
                warehouse("Коледино", Some(170.0)),
                warehouse("Электросталь", None),
            ],
        ))
        .await
        .unwrap();

    let second = store.for_date(date).await.unwrap().unwrap();

    // Same request row, updated in place.
    assert_eq!(second.request.id, first.request.id);

    // The warehouse set was replaced wholesale: Тула is gone, the new
    // entry appears, and the shared name carries the new coefficient.
    let names: Vec<&str> = second
        .warehouses
        .iter()
        .map(|w| w.warehouse_name.as_str())
        .collect();
    assert_eq!(names, vec!["Коледино", "Электросталь"]);
    assert_eq!(second.warehouses[0].coefficient, Some(170.0));
    assert_eq!(second.warehouses[1].coefficient, None);

    reset_date(&store, date).await;
}

#[tokio::test]
async fn test_failed_save_leaves_prior_state_intact() {
    let Some(store) = test_store().await else {
        return;
    };
    let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
    reset_date(&store, date).await;

    store
        .save(&snapshot(date, vec![warehouse("Коледино", Some(160.0))]))
        .await
        .unwrap();

    // A duplicated warehouse name violates the per-request uniqueness
    // constraint mid-insert, aborting the whole transaction.
    let result = store
        .save(&snapshot(
            date,
            vec![
                warehouse("Тула", Some(150.0)),
                warehouse("Тула", Some(151.0)),
            ],
        ))
        .await;
    assert!(result.is_err());

    // The previous set survives untouched.
    let stored = store.for_date(date).await.unwrap().unwrap();
    assert_eq!(stored.warehouses.len(), 1);
    assert_eq!(stored.warehouses[0].warehouse_name, "Коледино");
    assert_eq!(stored.warehouses[0].coefficient, Some(160.0));

    reset_date(&store, date).await;
}

#[tokio::test]
async fn test_save_with_empty_set_clears_children() {
    let Some(store) = test_store().await else {
        return;
    };
    let date = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
    reset_date(&store, date).await;

    store
        .save(&snapshot(date, vec![warehouse("Коледино", Some(160.0))]))
        .await
        .unwrap();

    store.save(&snapshot(date, vec![])).await.unwrap();

    let stored = store.for_date(date).await.unwrap().unwrap();
    assert!(stored.warehouses.is_empty());
    assert!(store.has_data_for_date(date).await.unwrap());

    reset_date(&store, date).await;
}
