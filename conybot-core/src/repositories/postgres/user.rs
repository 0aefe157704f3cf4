// src/repositories/postgres/user.rs

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use conybot_common::models::AppUser;

use crate::Error;

#[async_trait::async_trait]
pub trait UserRepo {
    /// Insert the user row if it does not exist yet and return it.
    async fn ensure(&self, user_id: &str) -> Result<AppUser, Error>;
    async fn get(&self, user_id: &str) -> Result<Option<AppUser>, Error>;
    /// Deleting a user cascades to their coupons.
    async fn delete(&self, user_id: &str) -> Result<(), Error>;
}

pub struct UserRepository {
    pub pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepo for UserRepository {
    async fn ensure(&self, user_id: &str) -> Result<AppUser, Error> {
        sqlx::query(
            r#"
            INSERT INTO app_user (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("app_user '{user_id}'")))
    }

    async fn get(&self, user_id: &str) -> Result<Option<AppUser>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, created_at
            FROM app_user
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(r) = row {
            Ok(Some(AppUser {
                user_id: r.try_get("user_id")?,
                created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, user_id: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM app_user WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
