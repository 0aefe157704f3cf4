// tests/postgres_store_tests.rs
//
// These hit a live Postgres and are ignored by default. Run with
// TEST_DATABASE_URL set and `cargo test -- --ignored`. The schema is
// dropped and recreated per test.

use conybot_common::Error;
use conybot_common::models::CouponSource;
use conybot_core::Database;
use conybot_core::repositories::postgres::{UserRepo, UserRepository};
use conybot_core::repositories::{CouponStore, PostgresCouponStore};

async fn setup_test_db() -> Result<Database, Error> {
    let url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://cony@localhost/conybot_test".to_string());
    let db = Database::new(&url).await?;
    sqlx::query("DROP SCHEMA public CASCADE; CREATE SCHEMA public;")
        .execute(db.pool())
        .await?;
    db.migrate().await?;
    Ok(db)
}

#[tokio::test]
#[ignore = "requires a live Postgres (set TEST_DATABASE_URL)"]
async fn postgres_store_add_list_consume() -> Result<(), Error> {
    let db = setup_test_db().await?;
    let store = PostgresCouponStore::new(db.pool().clone(), "line-user-1");

    assert!(store.list().await?.is_empty());

    let first = store.add("Cony粉紅9折券", "贏得遊戲即可享受全品項9折優惠。").await?;
    let second = store.add("Cony粉紅9折券", "贏得遊戲即可享受全品項9折優惠。").await?;
    assert_eq!(first.code, "cony-101");
    assert_eq!(second.code, "cony-102");
    assert_eq!(first.source, CouponSource::Game);

    let coupons = store.list().await?;
    assert_eq!(coupons.len(), 2);
    assert_eq!(coupons[0].code, first.code);

    assert!(store.consume(&first.code).await?);
    assert!(!store.consume(&first.code).await?);
    assert_eq!(store.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live Postgres (set TEST_DATABASE_URL)"]
async fn postgres_store_scopes_by_user() -> Result<(), Error> {
    let db = setup_test_db().await?;
    let store_a = PostgresCouponStore::new(db.pool().clone(), "user-a");
    let store_b = PostgresCouponStore::new(db.pool().clone(), "user-b");

    store_a.add("Coupon A", "for user a").await?;
    assert!(store_b.list().await?.is_empty());
    assert!(!store_b.consume("cony-101").await?);
    assert_eq!(store_a.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live Postgres (set TEST_DATABASE_URL)"]
async fn each_user_mints_from_their_own_counter() -> Result<(), Error> {
    let db = setup_test_db().await?;
    let store_a = PostgresCouponStore::new(db.pool().clone(), "user-a");
    let store_b = PostgresCouponStore::new(db.pool().clone(), "user-b");

    let a_first = store_a.add("Coupon", "desc").await?;
    assert_eq!(a_first.code, "cony-101");

    // user-b's first win starts from the same floor; the code is unique
    // within each user's scope, not across users.
    let b_first = store_b.add("Coupon", "desc").await?;
    assert_eq!(b_first.code, "cony-101");

    let a_second = store_a.add("Coupon", "desc").await?;
    assert_eq!(a_second.code, "cony-102");

    assert_eq!(store_a.list().await?.len(), 2);
    assert_eq!(store_b.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live Postgres (set TEST_DATABASE_URL)"]
async fn deleting_user_cascades_to_coupons() -> Result<(), Error> {
    let db = setup_test_db().await?;
    let store = PostgresCouponStore::new(db.pool().clone(), "doomed-user");
    store.add("Coupon", "desc").await?;

    let users = UserRepository::new(db.pool().clone());
    assert!(users.get("doomed-user").await?.is_some());
    users.delete("doomed-user").await?;

    assert!(store.list().await?.is_empty());
    Ok(())
}
