#![cfg(feature = "pg-tests")]

use serde_json::{json, Map};
use umroh_core::{Collection, DocumentStore, Filter, StoreError};
use umroh_store::app_config::{DatabaseConfig, StoreBackend};
use umroh_store::{DbClient, PgDocumentStore};

async fn pg_store() -> Option<PgDocumentStore> {
    let url = match std::env::var("UMROH_TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping pg-tests: set UMROH_TEST_DATABASE_URL or DATABASE_URL");
            return None;
        }
    };
    let config = DatabaseConfig {
        backend: StoreBackend::Postgres,
        url,
        max_connections: 2,
        acquire_timeout_secs: 2,
    };
    let db = match DbClient::new(&config).await {
        Ok(db) => db,
        Err(err) => {
            eprintln!("skipping pg-tests: cannot connect to postgres: {err}");
            return None;
        }
    };
    db.migrate().await.expect("migrate");
    sqlx::query("TRUNCATE documents RESTART IDENTITY")
        .execute(&db.pool)
        .await
        .expect("truncate");
    Some(PgDocumentStore::new(db.pool))
}

// One test body so the shared table is never truncated underneath a running case.
#[tokio::test]
async fn pg_document_store_roundtrip() {
    let Some(store) = pg_store().await else {
        return;
    };

    store
        .insert_many(
            Collection::Packages,
            vec![
                json!({"id": "p1", "package_type": "umrah", "price": 27500000, "departure_city": "Jakarta"}),
                json!({"id": "p2", "package_type": "umrah", "price": 35000000, "departure_city": "Jakarta"}),
                json!({"id": "p3", "package_type": "tour", "price": 1500000, "departure_city": "Semarang"}),
            ],
        )
        .await
        .expect("seed");

    let umrah = Filter::new().eq("package_type", "umrah");
    assert_eq!(store.count(Collection::Packages, &umrah).await.expect("count"), 2);

    let premium = umrah.clone().gte("price", 30_000_000);
    let found = store.find_many(Collection::Packages, &premium, 100).await.expect("find");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], "p2");

    let capped = store.find_many(Collection::Packages, &Filter::new(), 2).await.expect("find");
    assert_eq!(capped.iter().map(|d| d["id"].clone()).collect::<Vec<_>>(), vec![json!("p1"), json!("p2")]);

    let mut changes = Map::new();
    changes.insert("price".to_string(), json!(1));
    let matched = store
        .update_one(Collection::Packages, &Filter::new().eq("id", "p3"), changes)
        .await
        .expect("update");
    assert_eq!(matched, 1);
    let cheap = store
        .find_one(Collection::Packages, &Filter::new().lte("price", 1))
        .await
        .expect("find")
        .expect("p3");
    assert_eq!(cheap["departure_city"], "Semarang");

    let entry = json!({"id": "w1", "user_id": "a@example.com", "package_id": "p1"});
    store.insert(Collection::Wishlist, entry).await.expect("wishlist");
    let clash = json!({"id": "w2", "user_id": "a@example.com", "package_id": "p1"});
    let err = store.insert(Collection::Wishlist, clash).await.expect_err("duplicate");
    assert!(matches!(err, StoreError::Duplicate { .. }));

    let gone = store
        .delete_one(Collection::Wishlist, &Filter::new().eq("id", "w1"))
        .await
        .expect("delete");
    assert_eq!(gone, 1);
    assert_eq!(store.count(Collection::Wishlist, &Filter::new()).await.expect("count"), 0);

    store.close().await;
}
