//! Article model
//!
//! This module provides:
//! - `Article` entity representing a travel article
//! - `ArticleFilter` for the browse views (category/region/date range)
//! - `ArchiveMonth` display record produced by the archive bucketizer
//! - Pagination types shared by list queries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Travel article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// URL-friendly slug
    pub slug: String,
    /// Article title
    pub title: String,
    /// Publication date shown to readers (distinct from `created_at`)
    pub date: NaiveDate,
    /// Short teaser shown in list views
    pub teaser: String,
    /// Author display name
    pub author: String,
    /// Article body (stored HTML)
    pub content: String,
    /// Header photo path
    pub photo: Option<String>,
    /// Optional travel brochure path
    pub brochure: Option<String>,
    /// Region the article belongs to, if any
    pub region_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Optional predicates for the article browse views.
///
/// Absent fields are skipped; present fields compose as logical AND. The
/// date range is half-open: `date_from <= date < date_until`.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Restrict to articles linked to this category
    pub category_id: Option<i64>,
    /// Restrict to articles in this region
    pub region_id: Option<i64>,
    /// Inclusive lower bound on the article date
    pub date_from: Option<NaiveDate>,
    /// Exclusive upper bound on the article date
    pub date_until: Option<NaiveDate>,
}

/// One bucket of the article archive: a (year, month) pair with its count.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveMonth {
    /// Four-digit year
    pub year: i32,
    /// English month name ("January" .. "December")
    pub month_name: String,
    /// Month number, 1-12
    pub month_number: u32,
    /// Link to the date-scoped article listing
    pub link: String,
    /// Number of articles dated in this bucket
    pub article_count: i64,
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1)) as i64 * self.per_page as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total as u32) + self.per_page - 1) / self.per_page
    }

    /// Check if there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Check if the result is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items in the current page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
