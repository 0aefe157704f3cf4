// src/repositories/file.rs

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use conybot_common::models::{Coupon, CouponSource};

use crate::Error;
use crate::repositories::{CouponStore, catalog_coupons, format_code, recover_counter};

#[derive(Debug)]
struct StoreState {
    coupons: Vec<Coupon>,
    counter: u64,
}

/// Coupon store backed by a JSON file: an array of
/// `{id, title, description, source}` objects, UTF-8, pretty-printed,
/// rewritten wholesale on every mutation.
///
/// Like the in-memory store this holds one user's coupons and offers no
/// cross-process concurrency control.
#[derive(Debug)]
pub struct FileCouponStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl FileCouponStore {
    /// Open the store at `path`, seeding the demo catalog if the file does
    /// not exist yet. A present-but-malformed file (anything other than a
    /// JSON array of coupons) is a fatal initialization error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let coupons = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            if !value.is_array() {
                return Err(Error::Parse(format!(
                    "coupon file {} must contain a JSON array",
                    path.display()
                )));
            }
            serde_json::from_value::<Vec<Coupon>>(value)?
        } else {
            let seeded = catalog_coupons();
            write_coupons(&path, &seeded)?;
            seeded
        };

        debug!("Loaded {} coupons from {}", coupons.len(), path.display());
        let counter = recover_counter(coupons.iter().map(|c| c.code.as_str()));
        Ok(Self {
            path,
            state: Mutex::new(StoreState { coupons, counter }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_coupons(path: &Path, coupons: &[Coupon]) -> Result<(), Error> {
    let payload = serde_json::to_string_pretty(coupons)?;
    fs::write(path, payload)?;
    Ok(())
}

#[async_trait]
impl CouponStore for FileCouponStore {
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
        write_coupons(&self.path, &state.coupons)?;
        Ok(coupon)
    }

    async fn consume(&self, code: &str) -> Result<bool, Error> {
        let mut state = self.state.lock().await;
        let before = state.coupons.len();
        state.coupons.retain(|c| c.code != code);
        if state.coupons.len() == before {
            return Ok(false);
        }
        write_coupons(&self.path, &state.coupons)?;
        Ok(true)
    }
}
