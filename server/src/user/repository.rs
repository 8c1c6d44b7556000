//! Handle database requests for user records.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::Result;
use crate::user::User;

const COLUMNS: &str = "id, name, email, password, is_verified, verify_otp, \
     verify_otp_expires_at, reset_otp, reset_otp_expires_at, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    /// Create a new [`UserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert [`User`] into database.
    pub async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO users (id, name, email, password, created_at)
                VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find a user using the `id` field.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user using the `email` field.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Store a pending verification code.
    pub async fn set_verify_otp(
        &self,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET verify_otp = $1, verify_otp_expires_at = $2
                WHERE id = $3"#,
        )
        .bind(code)
        .bind(expires_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark the account verified and clear the verification code.
    pub async fn mark_verified(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET is_verified = TRUE,
                verify_otp = NULL, verify_otp_expires_at = NULL
                WHERE id = $1"#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a pending password-reset code.
    pub async fn set_reset_otp(
        &self,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET reset_otp = $1, reset_otp_expires_at = $2
                WHERE id = $3"#,
        )
        .bind(code)
        .bind(expires_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace the password hash and clear the reset code.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        password: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE users SET password = $1,
                reset_otp = NULL, reset_otp_expires_at = NULL
                WHERE id = $2"#,
        )
        .bind(password)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
