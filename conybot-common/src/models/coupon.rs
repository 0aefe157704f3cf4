use serde::{Deserialize, Serialize};

use crate::Error;

/// A redeemable reward record scoped to one user identity.
///
/// `code` is the synthetic unique key; it serializes as `id` to stay
/// compatible with the persisted coupon-file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "id")]
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub source: CouponSource,
}

/// Where a coupon came from: seeded catalog entry or a winning game round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponSource {
    Catalog,
    Game,
}

impl Default for CouponSource {
    fn default() -> Self {
        CouponSource::Game
    }
}

impl CouponSource {
    /// Value stored in the SQL `coupon_type` enum. The relational schema
    /// predates the wire naming and keeps `permanent` for catalog coupons.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CouponSource::Catalog => "permanent",
            CouponSource::Game => "game",
        }
    }

    pub fn from_sql(value: &str) -> Result<Self, Error> {
        match value {
            "permanent" => Ok(CouponSource::Catalog),
            "game" => Ok(CouponSource::Game),
            other => Err(Error::Parse(format!("unknown coupon type '{other}'"))),
        }
    }
}
