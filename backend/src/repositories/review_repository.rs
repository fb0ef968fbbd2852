//! Database repository for product reviews and their likes.

use crate::database::models::{Review, ReviewRow};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const REVIEW_COLUMNS: &str = "id, user_id, title, content, rating, images, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub title: String,
    pub content: String,
    pub rating: i64,
    pub images: Vec<String>,
}

pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    async fn likes_for(&self, review_id: &str) -> Result<Vec<String>> {
        let likes: Vec<String> =
            sqlx::query_scalar("SELECT user_id FROM review_likes WHERE review_id = ?")
                .bind(review_id)
                .fetch_all(self.pool)
                .await?;

        Ok(likes)
    }

    async fn with_likes(&self, rows: Vec<ReviewRow>) -> Result<Vec<Review>> {
        let mut reviews = Vec::with_capacity(rows.len());
        for row in rows {
            let likes = self.likes_for(&row.id).await?;
            reviews.push(row.into_review(likes));
        }
        Ok(reviews)
    }

    /// Newest-first page of reviews plus the total count.
    pub async fn list_paged(&self, page: u32, limit: u32) -> Result<(Vec<Review>, u64)> {
        let offset = (page.saturating_sub(1)) as i64 * limit as i64;
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(limit as i64)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(self.pool)
            .await?;

        Ok((self.with_likes(rows).await?, total as u64))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?");
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => {
                let likes = self.likes_for(&row.id).await?;
                Ok(Some(row.into_review(likes)))
            }
            None => Ok(None),
        }
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Vec<Review>> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ? ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        self.with_likes(rows).await
    }

    pub async fn create(&self, user_id: &str, input: ReviewInput) -> Result<Review> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO reviews (id, user_id, title, content, rating, images, created_at, \
             updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {REVIEW_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(Uuid::now_v7().to_string())
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.rating)
            .bind(serde_json::to_string(&input.images).unwrap_or_else(|_| "[]".to_string()))
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(row.into_review(Vec::new()))
    }

    pub async fn update(&self, id: &str, input: ReviewInput) -> Result<Option<Review>> {
        let sql = format!(
            "UPDATE reviews SET title = ?, content = ?, rating = ?, images = ?, updated_at = ? \
             WHERE id = ? RETURNING {REVIEW_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.rating)
            .bind(serde_json::to_string(&input.images).unwrap_or_else(|_| "[]".to_string()))
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => {
                let likes = self.likes_for(&row.id).await?;
                Ok(Some(row.into_review(likes)))
            }
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Adds the user's like if absent, removes it if present. Returns the
    /// updated review, or `None` if the review does not exist.
    pub async fn toggle_like(&self, review_id: &str, user_id: &str) -> Result<Option<Review>> {
        if self.get(review_id).await?.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM review_likes WHERE review_id = ? AND user_id = ?")
            .bind(review_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if removed.rows_affected() == 0 {
            sqlx::query("INSERT INTO review_likes (review_id, user_id) VALUES (?, ?)")
                .bind(review_id)
                .bind(user_id)
                .execute(self.pool)
                .await?;
        }

        self.get(review_id).await
    }
}
