//! PostgreSQL adapter tests.
//!
//! These tests require a reachable database in the DB_URL environment
//! variable. Run with: cargo test --test postgres -- --ignored

use std::collections::HashSet;

use futures::future::join_all;
use uuid::Uuid;

use rssagg::config::Config;
use rssagg::error::PersistenceError;
use rssagg::store::{PgUserStore, UserStore};

/// Connect and migrate using DB_URL, or None when it is not configured.
async fn test_store() -> Option<PgUserStore> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DB_URL").ok()?;
    let config = Config::from_vars([
        ("PORT".to_string(), "8080".to_string()),
        ("DB_URL".to_string(), db_url),
    ])
    .ok()?;

    let store = PgUserStore::connect(&config).await.ok()?;
    store.migrate().await.ok()?;
    Some(store)
}

/// Random name so reruns against the same database do not collide.
fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

async fn rows_named(store: &PgUserStore, name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name = $1")
        .bind(name)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn test_create_user() {
    let Some(store) = test_store().await else {
        println!("Skipping: DB_URL not set or unreachable");
        return;
    };

    let name = unique_name("alice");
    let user = store.create_user(&name).await.unwrap();

    assert_eq!(user.name, name);
    assert_eq!(user.created_at, user.updated_at);
    assert_eq!(rows_named(&store, &name).await, 1);
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn test_duplicate_name_is_constraint_violation() {
    let Some(store) = test_store().await else {
        println!("Skipping: DB_URL not set or unreachable");
        return;
    };

    let name = unique_name("dup");
    store.create_user(&name).await.unwrap();
    let err = store.create_user(&name).await.unwrap_err();

    assert!(matches!(err, PersistenceError::ConstraintViolation { .. }));
    assert_eq!(rows_named(&store, &name).await, 1);
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn test_concurrent_creates() {
    let Some(store) = test_store().await else {
        println!("Skipping: DB_URL not set or unreachable");
        return;
    };

    let prefix = unique_name("batch");
    let creates = (0..50).map(|i| {
        let store = store.clone();
        let name = format!("{prefix}-{i}");
        async move { store.create_user(&name).await.unwrap() }
    });

    let users = join_all(creates).await;
    let ids: HashSet<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 50);
}
