// src/repositories/memory.rs

use async_trait::async_trait;
use tokio::sync::Mutex;

use conybot_common::models::{Coupon, CouponSource};

use crate::Error;
use crate::repositories::{CODE_COUNTER_START, CouponStore, catalog_coupons, format_code};

struct StoreState {
    coupons: Vec<Coupon>,
    counter: u64,
}

/// In-memory coupon store seeded with the demo catalog. Process-lifetime
/// only; the mutex serializes in-process mutation but there is no
/// cross-process guarantee (accepted demo-grade limitation).
pub struct MemoryCouponStore {
    state: Mutex<StoreState>,
}

impl MemoryCouponStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                coupons: catalog_coupons(),
                counter: CODE_COUNTER_START,
            }),
        }
    }
}

impl Default for MemoryCouponStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn list(&self) -> Result<Vec<Coupon>, Error> {
        let state = self.state.lock().await;
        Ok(state.coupons.clone())
    }

    async fn add(&self, title: &str, description: &str) -> Result<Coupon, Error> {
        let mut state = self.state.lock().await;
        state.counter += 1;
        let coupon = Coupon {
            code: format_code(state.counter),
            title: title.to_string(),
            description: description.to_string(),
            source: CouponSource::Game,
        };
        state.coupons.push(coupon.clone());
        Ok(coupon)
    }

    async fn consume(&self, code: &str) -> Result<bool, Error> {
        let mut state = self.state.lock().await;
        let before = state.coupons.len();
        state.coupons.retain(|c| c.code != code);
        Ok(state.coupons.len() != before)
    }
}
