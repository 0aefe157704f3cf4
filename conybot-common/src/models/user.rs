use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user identity row. Only a partition key for coupons; the id itself is
/// resolved externally (cookie or platform-assigned).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AppUser {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
