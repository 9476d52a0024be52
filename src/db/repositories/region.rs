//! Region repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::models::Region;

/// Region repository trait
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// All regions in listing order
    async fn list(&self) -> Result<Vec<Region>>;

    /// Get a region by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Region>>;
}

/// SQLite-backed region repository
pub struct SqlxRegionRepository {
    pool: SqlitePool,
}

impl SqlxRegionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_region(row: &sqlx::sqlite::SqliteRow) -> Region {
    Region {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        photo: row.get("photo"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl RegionRepository for SqlxRegionRepository {
    async fn list(&self) -> Result<Vec<Region>> {
        let rows = sqlx::query(
            "SELECT id, title, description, photo, created_at FROM regions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list regions")?;

        Ok(rows.iter().map(row_to_region).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Region>> {
        let row = sqlx::query(
            "SELECT id, title, description, photo, created_at FROM regions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch region")?;

        Ok(row.as_ref().map(row_to_region))
    }
}
