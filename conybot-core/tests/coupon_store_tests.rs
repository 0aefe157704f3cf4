// tests/coupon_store_tests.rs

use std::fs;

use conybot_common::Error;
use conybot_common::models::CouponSource;
use conybot_core::repositories::{CouponStore, FileCouponStore, MemoryCouponStore};

#[tokio::test]
async fn memory_store_seeds_catalog() -> Result<(), Error> {
    let store = MemoryCouponStore::new();
    let coupons = store.list().await?;

    assert_eq!(coupons.len(), 3);
    assert_eq!(coupons[0].code, "brunch-001");
    assert_eq!(coupons[1].code, "dessert-007");
    assert_eq!(coupons[2].code, "fashion-042");
    assert!(coupons.iter().all(|c| c.source == CouponSource::Catalog));
    Ok(())
}

#[tokio::test]
async fn add_mints_unique_increasing_codes() -> Result<(), Error> {
    let store = MemoryCouponStore::new();

    let first = store.add("Coupon A", "desc").await?;
    let second = store.add("Coupon B", "desc").await?;
    let third = store.add("Coupon C", "desc").await?;

    assert_eq!(first.code, "cony-101");
    assert_eq!(second.code, "cony-102");
    assert_eq!(third.code, "cony-103");
    assert_eq!(first.source, CouponSource::Game);

    let coupons = store.list().await?;
    let mut codes: Vec<_> = coupons.iter().map(|c| c.code.clone()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), coupons.len(), "codes must stay unique");
    Ok(())
}

#[tokio::test]
async fn consume_removes_exactly_one_coupon() -> Result<(), Error> {
    let store = MemoryCouponStore::new();

    assert!(store.consume("dessert-007").await?);
    let coupons = store.list().await?;
    assert_eq!(coupons.len(), 2);
    assert!(coupons.iter().all(|c| c.code != "dessert-007"));

    // Consuming the same code again is a no-op, not an error.
    assert!(!store.consume("dessert-007").await?);
    assert_eq!(store.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn consume_missing_code_returns_false() -> Result<(), Error> {
    let store = MemoryCouponStore::new();
    assert!(!store.consume("no-such-code").await?);
    assert_eq!(store.list().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn file_store_seeds_and_persists_catalog() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("coupons.json");

    let store = FileCouponStore::open(&path)?;
    assert_eq!(store.list().await?.len(), 3);

    let raw = fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[0]["id"], "brunch-001");
    Ok(())
}

#[tokio::test]
async fn file_store_round_trips_after_reload() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("coupons.json");

    let store = FileCouponStore::open(&path)?;
    store.add("Cony粉紅9折券", "贏得遊戲即可享受全品項9折優惠。").await?;
    store.consume("fashion-042").await?;
    let before = store.list().await?;
    drop(store);

    let reopened = FileCouponStore::open(&path)?;
    let after = reopened.list().await?;
    assert_eq!(before, after, "order and fields must survive a reload");
    Ok(())
}

#[tokio::test]
async fn file_store_counter_survives_reload() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("coupons.json");

    let store = FileCouponStore::open(&path)?;
    let minted = store.add("Coupon A", "desc").await?;
    assert_eq!(minted.code, "cony-101");
    drop(store);

    let reopened = FileCouponStore::open(&path)?;
    let next = reopened.add("Coupon B", "desc").await?;
    assert_eq!(next.code, "cony-102");
    Ok(())
}

#[tokio::test]
async fn file_store_rejects_non_array_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coupons.json");
    fs::write(&path, r#"{"not": "a list"}"#).unwrap();

    let err = FileCouponStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn file_store_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coupons.json");
    fs::write(&path, "not json at all").unwrap();

    assert!(FileCouponStore::open(&path).is_err());
}
