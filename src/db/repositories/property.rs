//! Property repository
//!
//! The search query is built by conditionally extending a `QueryBuilder`
//! with one predicate per present filter field; the count query and the
//! page query share the same predicate builder so totals always agree
//! with the returned rows.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{ListParams, PagedResult, Property, PropertyFilter};

/// Property repository trait
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Search properties with the given filter, paginated.
    async fn search(&self, filter: &PropertyFilter, params: &ListParams) -> Result<PagedResult<Property>>;

    /// Get a property by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Property>>;

    /// Properties flagged for the homepage, capped at `limit`.
    async fn featured(&self, limit: i64) -> Result<Vec<Property>>;
}

/// SQLite-backed property repository
pub struct SqlxPropertyRepository {
    pool: SqlitePool,
}

impl SqlxPropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, title, description, price_per_night, bedrooms, bathrooms, \
                       featured, available_start, available_end, region_id, photo, created_at";

/// Append one predicate per present filter field. Absent fields add
/// nothing; filters compose as AND.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &PropertyFilter) {
    if let Some(keywords) = &filter.keywords {
        // LIKE is case-insensitive in SQLite for ASCII
        builder
            .push(" AND title LIKE ")
            .push_bind(format!("%{}%", keywords));
    }

    if let Some(stay) = filter.stay {
        builder
            .push(" AND available_start IS NOT NULL AND available_start <= ")
            .push_bind(stay.start)
            .push(" AND available_end IS NOT NULL AND available_end >= ")
            .push_bind(stay.end);
    }

    if let Some(bedrooms) = filter.min_bedrooms {
        builder.push(" AND bedrooms >= ").push_bind(bedrooms);
    }

    if let Some(bathrooms) = filter.min_bathrooms {
        builder.push(" AND bathrooms >= ").push_bind(bathrooms);
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND price_per_night >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND price_per_night <= ").push_bind(max_price);
    }
}

fn row_to_property(row: &sqlx::sqlite::SqliteRow) -> Property {
    Property {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        price_per_night: row.get("price_per_night"),
        bedrooms: row.get("bedrooms"),
        bathrooms: row.get("bathrooms"),
        featured: row.get("featured"),
        available_start: row.get("available_start"),
        available_end: row.get("available_end"),
        region_id: row.get("region_id"),
        photo: row.get("photo"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl PropertyRepository for SqlxPropertyRepository {
    async fn search(&self, filter: &PropertyFilter, params: &ListParams) -> Result<PagedResult<Property>> {
        let mut count_builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM properties WHERE 1=1");
        push_filter(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count matching properties")?;

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM properties WHERE 1=1", COLUMNS));
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search properties")?;

        let items = rows.iter().map(row_to_property).collect();
        Ok(PagedResult::new(items, total, params))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Property>> {
        let query = format!("SELECT {} FROM properties WHERE id = ?", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch property")?;

        Ok(row.as_ref().map(row_to_property))
    }

    async fn featured(&self, limit: i64) -> Result<Vec<Property>> {
        let query = format!(
            "SELECT {} FROM properties WHERE featured = 1 ORDER BY id ASC LIMIT ?",
            COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list featured properties")?;

        Ok(rows.iter().map(row_to_property).collect())
    }
}
