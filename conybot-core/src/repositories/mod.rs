// src/repositories/mod.rs

use async_trait::async_trait;

use conybot_common::models::{Coupon, CouponSource};

use crate::Error;

pub mod file;
pub mod memory;
pub mod postgres;

pub use file::FileCouponStore;
pub use memory::MemoryCouponStore;
pub use postgres::PostgresCouponStore;

/// Capability interface over one user's coupon collection. Three backings
/// implement it (in-memory, JSON file, Postgres); callers pick one at
/// construction and share it behind an `Arc`.
///
/// Every mutating call persists durably before returning, so callers may
/// treat success as durable.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// All coupons in deterministic order for the backing (insertion order
    /// for memory/file, creation time for Postgres).
    async fn list(&self) -> Result<Vec<Coupon>, Error>;

    /// Mint a new game coupon with a fresh `cony-{n}` code.
    async fn add(&self, title: &str, description: &str) -> Result<Coupon, Error>;

    /// Remove the coupon with the given code. Returns `false` (not an
    /// error) if no such coupon exists.
    async fn consume(&self, code: &str) -> Result<bool, Error>;
}

/// Codes are `cony-{n}` with a monotonically increasing numeric suffix.
pub(crate) const CODE_PREFIX: &str = "cony-";

/// Counter floor; the first minted coupon is `cony-101`.
pub(crate) const CODE_COUNTER_START: u64 = 100;

pub(crate) fn format_code(counter: u64) -> String {
    format!("{CODE_PREFIX}{counter}")
}

/// Largest numeric suffix among existing `cony-` codes, floored at the
/// counter start. Used to recover the counter after a reload.
pub(crate) fn recover_counter<'a>(codes: impl Iterator<Item = &'a str>) -> u64 {
    codes
        .filter_map(|code| code.strip_prefix(CODE_PREFIX))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .fold(CODE_COUNTER_START, u64::max)
}

/// Demo catalog seeded into fresh memory/file stores.
pub(crate) fn catalog_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            code: "brunch-001".to_string(),
            title: "Brunch with Brown".to_string(),
            description: "Buy one get one carrot croissant at Brown's Cafe.".to_string(),
            source: CouponSource::Catalog,
        },
        Coupon {
            code: "dessert-007".to_string(),
            title: "Bubble Tea Upgrade".to_string(),
            description: "Free topping upgrade when you order milk tea.".to_string(),
            source: CouponSource::Catalog,
        },
        Coupon {
            code: "fashion-042".to_string(),
            title: "Cony Style Boost".to_string(),
            description: "10% off any pink outfit in LINE FRIENDS store.".to_string(),
            source: CouponSource::Catalog,
        },
    ]
}
