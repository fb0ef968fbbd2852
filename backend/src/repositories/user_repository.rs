//! Database repository for user records and their refresh-token set.
//!
//! This is the credential store behind the authentication core: user lookup
//! by id/email/username and the per-user set of currently valid refresh
//! tokens. Token removal is a single conditional DELETE so that concurrent
//! presentations of the same token resolve to exactly one winner.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, phone_number, address, \
                            profile_image, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO users (id, username, email, password_hash, role, phone_number, address, \
             profile_image, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(&user.phone_number)
            .bind(&user.address)
            .bind(&user.profile_image)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Checks whether a user exists with the given username or email.
    pub async fn identity_exists(&self, username: &str, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = ? OR email = ?",
        )
        .bind(username)
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Checks whether a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Appends a refresh token to the user's set of valid tokens.
    pub async fn store_refresh_token(&self, user_id: &str, token: &str) -> Result<()> {
        sqlx::query("INSERT INTO refresh_tokens (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(Utc::now())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Removes a refresh token from the user's set, reporting whether this
    /// call actually consumed it.
    ///
    /// The single DELETE is the concurrency-critical contract of the auth
    /// core: when two callers replay the same token, the row count tells
    /// exactly one of them that it won.
    pub async fn remove_refresh_token(&self, user_id: &str, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ? AND token = ?")
            .bind(user_id)
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revokes every outstanding refresh token for the user.
    pub async fn clear_refresh_tokens(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Number of currently valid refresh tokens for the user.
    pub async fn refresh_token_count(&self, user_id: &str) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count as u64)
    }
}
