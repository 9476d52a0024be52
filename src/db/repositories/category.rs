//! Article category repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::models::ArticleCategory;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in title order
    async fn list(&self) -> Result<Vec<ArticleCategory>>;

    /// Get a category by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<ArticleCategory>>;
}

/// SQLite-backed category repository
pub struct SqlxCategoryRepository {
    pool: SqlitePool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> Result<Vec<ArticleCategory>> {
        let rows = sqlx::query("SELECT id, title FROM article_categories ORDER BY title ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        Ok(rows
            .iter()
            .map(|row| ArticleCategory {
                id: row.get("id"),
                title: row.get("title"),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ArticleCategory>> {
        let row = sqlx::query("SELECT id, title FROM article_categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category")?;

        Ok(row.map(|row| ArticleCategory {
            id: row.get("id"),
            title: row.get("title"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_list_orders_by_title() {
        let pool = create_test_pool().await.unwrap();
        for title in ["Hiking", "Beaches", "City breaks"] {
            sqlx::query("INSERT INTO article_categories (title) VALUES (?)")
                .bind(title)
                .execute(&pool)
                .await
                .unwrap();
        }
        let repo = SqlxCategoryRepository::new(pool);

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Beaches", "City breaks", "Hiking"]);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxCategoryRepository::new(pool);
        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }
}
