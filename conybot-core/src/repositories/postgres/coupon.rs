// src/repositories/postgres/coupon.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use conybot_common::models::{Coupon, CouponSource};

use crate::Error;
use crate::repositories::{CODE_COUNTER_START, CouponStore, format_code};

/// Coupon store backed by the `coupon` table, scoped to one `user_id`.
/// Codes are unique per user, enforced by the `uq_coupon_code` constraint
/// on `(user_id, code)`; every mutation is a single committed statement.
///
/// Two concurrent wins for the same user can read the same `MAX` suffix;
/// the constraint then rejects the second insert, which surfaces as a
/// database error rather than a retry.
pub struct PostgresCouponStore {
    pool: Pool<Postgres>,
    user_id: String,
}

impl PostgresCouponStore {
    pub fn new(pool: Pool<Postgres>, user_id: impl Into<String>) -> Self {
        Self {
            pool,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn ensure_user(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO app_user (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&self.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn next_counter(&self) -> Result<u64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(
                MAX(CAST(SUBSTRING(code FROM 'cony-([0-9]+)') AS BIGINT)),
                $2
            ) AS counter
            FROM coupon
            WHERE user_id = $1 AND code LIKE 'cony-%'
            "#,
        )
        .bind(&self.user_id)
        .bind(CODE_COUNTER_START as i64)
        .fetch_one(&self.pool)
        .await?;

        let current: i64 = row.try_get("counter")?;
        Ok(current as u64 + 1)
    }
}

#[async_trait]
impl CouponStore for PostgresCouponStore {
    async fn list(&self) -> Result<Vec<Coupon>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT code, title, description, type::text AS coupon_type
            FROM coupon
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&self.user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut coupons = Vec::with_capacity(rows.len());
        for r in rows {
            let source: String = r.try_get("coupon_type")?;
            coupons.push(Coupon {
                code: r.try_get("code")?,
                title: r.try_get("title")?,
                description: r
                    .try_get::<Option<String>, _>("description")?
                    .unwrap_or_default(),
                source: CouponSource::from_sql(&source)?,
            });
        }
        Ok(coupons)
    }

    async fn add(&self, title: &str, description: &str) -> Result<Coupon, Error> {
        self.ensure_user().await?;
        let code = format_code(self.next_counter().await?);

        sqlx::query(
            r#"
            INSERT INTO coupon (user_id, type, code, title, description)
            VALUES ($1, $2::coupon_type, $3, $4, $5)
            "#,
        )
        .bind(&self.user_id)
        .bind(CouponSource::Game.as_sql())
        .bind(&code)
        .bind(title)
        .bind(description)
        .execute(&self.pool)
        .await?;

        Ok(Coupon {
            code,
            title: title.to_string(),
            description: description.to_string(),
            source: CouponSource::Game,
        })
    }

    async fn consume(&self, code: &str) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM coupon
            WHERE user_id = $1 AND code = $2
            "#,
        )
        .bind(&self.user_id)
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
