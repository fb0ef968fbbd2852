//! Database repository for comments on reviews.

use crate::database::models::Comment;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, user_id, review_id, content, created_at, updated_at";

pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists comments, optionally restricted to one review.
    pub async fn list(&self, review_id: Option<&str>) -> Result<Vec<Comment>> {
        let comments = match review_id {
            Some(review_id) => {
                let sql = format!(
                    "SELECT {COMMENT_COLUMNS} FROM comments WHERE review_id = ? \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Comment>(&sql)
                    .bind(review_id)
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at DESC");
                sqlx::query_as::<_, Comment>(&sql).fetch_all(self.pool).await?
            }
        };

        Ok(comments)
    }

    pub async fn create(&self, user_id: &str, review_id: &str, content: &str) -> Result<Comment> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO comments (id, user_id, review_id, content, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {COMMENT_COLUMNS}"
        );

        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(Uuid::now_v7().to_string())
            .bind(user_id)
            .bind(review_id)
            .bind(content)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(comment)
    }

    pub async fn update(&self, id: &str, content: &str) -> Result<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET content = ?, updated_at = ? WHERE id = ? \
             RETURNING {COMMENT_COLUMNS}"
        );

        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(content)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(comment)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
