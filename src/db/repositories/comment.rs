//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::{Comment, CommentRecipient, CreateCommentInput};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment
    async fn create(&self, input: CreateCommentInput) -> Result<Comment>;

    /// Comments for an article, oldest first
    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>>;

    /// Whether the article already has a comment with exactly this text
    async fn duplicate_exists(&self, article_id: i64, content: &str) -> Result<bool>;

    /// Distinct (email, most-recent name) pairs across an article's comments
    async fn distinct_recipients(&self, article_id: i64) -> Result<Vec<CommentRecipient>>;

    /// Number of comments on an article
    async fn count_for_article(&self, article_id: i64) -> Result<i64>;
}

/// SQLite-backed comment repository
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: CreateCommentInput) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (article_id, name, email, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.article_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.content)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            article_id: input.article_id,
            name: input.name,
            email: input.email,
            content: input.content,
            created_at: now,
        })
    }

    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"SELECT id, article_id, name, email, content, created_at
               FROM comments WHERE article_id = ?
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        Ok(rows
            .iter()
            .map(|row| Comment {
                id: row.get("id"),
                article_id: row.get("article_id"),
                name: row.get("name"),
                email: row.get("email"),
                content: row.get("content"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn duplicate_exists(&self, article_id: i64, content: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE article_id = ? AND content = ?",
        )
        .bind(article_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .context("Failed to probe for duplicate comment")?;
        Ok(count > 0)
    }

    async fn distinct_recipients(&self, article_id: i64) -> Result<Vec<CommentRecipient>> {
        // One row per email, carrying the name from that email's newest comment
        let rows = sqlx::query(
            r#"SELECT c.email, c.name FROM comments c
               WHERE c.article_id = ?
                 AND c.id = (SELECT MAX(c2.id) FROM comments c2
                             WHERE c2.article_id = c.article_id AND c2.email = c.email)
               ORDER BY c.email ASC"#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to collect notification recipients")?;

        Ok(rows
            .iter()
            .map(|row| CommentRecipient {
                email: row.get("email"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn count_for_article(&self, article_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE article_id = ?")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments")?;
        Ok(count)
    }
}
