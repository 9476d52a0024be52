//! Shared API response types
//!
//! Common response structures used across the property, article, region
//! and comment endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{
    Article, ArticleCategory, Comment, PagedResult, Property, Region,
};

// ============================================================================
// Pagination
// ============================================================================

/// Page metadata attached to every paginated listing
#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&PagedResult<T>> for Pagination {
    fn from(result: &PagedResult<T>) -> Self {
        Self {
            total: result.total,
            page: result.page,
            per_page: result.per_page,
            total_pages: result.total_pages(),
            has_next: result.has_next(),
            has_prev: result.has_prev(),
        }
    }
}

// ============================================================================
// Property Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_per_night: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub featured: bool,
    pub available_start: Option<String>,
    pub available_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price_per_night: property.price_per_night,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            featured: property.featured,
            available_start: property.available_start.map(|d| d.to_string()),
            available_end: property.available_end.map(|d| d.to_string()),
            region_id: property.region_id,
            photo: property.photo,
        }
    }
}

// ============================================================================
// Article Response Types
// ============================================================================

/// Simplified article response for list views
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub teaser: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub link: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            link: format!("/articles/{}", article.slug),
            slug: article.slug,
            title: article.title,
            date: article.date.to_string(),
            teaser: article.teaser,
            author: article.author,
            photo: article.photo,
        }
    }
}

/// Full article response with all fields, used by the detail endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub teaser: String,
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brochure: Option<String>,
    pub created_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            slug: article.slug,
            title: article.title,
            date: article.date.to_string(),
            teaser: article.teaser,
            author: article.author,
            content: article.content,
            photo: article.photo,
            brochure: article.brochure,
            created_at: article.created_at.to_rfc3339(),
        }
    }
}

/// Category info embedded in article responses
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: i64,
    pub title: String,
    pub link: String,
}

impl From<ArticleCategory> for CategoryInfo {
    fn from(category: ArticleCategory) -> Self {
        Self {
            link: category.link(),
            id: category.id,
            title: category.title,
        }
    }
}

// ============================================================================
// Region Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RegionResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub link: String,
    pub articles_link: String,
}

impl From<Region> for RegionResponse {
    fn from(region: Region) -> Self {
        Self {
            link: region.link(),
            articles_link: region.articles_link(),
            id: region.id,
            title: region.title,
            description: region.description,
            photo: region.photo,
        }
    }
}

// ============================================================================
// Comment Response Types
// ============================================================================

/// Public view of a comment. The commenter's email stays server-side,
/// it is only used for the reply notification.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub article_id: i64,
    pub name: String,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            article_id: comment.article_id,
            name: comment.name,
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}
