//! Article API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{
    ArticleResponse, ArticleSummary, CategoryInfo, CommentResponse, Pagination, RegionResponse,
};
use crate::models::ListParams;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<u32>,
}

impl ListQuery {
    fn params(&self) -> ListParams {
        ListParams::new(self.page.unwrap_or(1), 10)
    }
}

fn summaries(articles: Vec<crate::models::Article>) -> Vec<ArticleSummary> {
    articles.into_iter().map(ArticleSummary::from).collect()
}

/// List all articles, newest first
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let articles = state.article_service.list(&query.params()).await?;

    let pagination = Pagination::from(&articles);
    Ok(Json(json!({
        "articles": summaries(articles.items),
        "pagination": pagination,
    })))
}

/// Articles in one category
pub async fn articles_by_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some((category, articles)) = state
        .article_service
        .browse_category(id, &query.params())
        .await?
    else {
        return Err(ApiError::not_found("Category not found"));
    };

    let pagination = Pagination::from(&articles);
    Ok(Json(json!({
        "category": CategoryInfo::from(category),
        "articles": summaries(articles.items),
        "pagination": pagination,
    })))
}

/// Articles in one region
pub async fn articles_by_region(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some((region, articles)) = state
        .article_service
        .browse_region(id, &query.params())
        .await?
    else {
        return Err(ApiError::not_found("Region not found"));
    };

    let pagination = Pagination::from(&articles);
    Ok(Json(json!({
        "region": RegionResponse::from(region),
        "articles": summaries(articles.items),
        "pagination": pagination,
    })))
}

/// Articles within one year
pub async fn articles_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    browse_date(&state, &year, None, &query.params()).await
}

/// Articles within one calendar month
pub async fn articles_by_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    browse_date(&state, &year, Some(&month), &query.params()).await
}

async fn browse_date(
    state: &AppState,
    year: &str,
    month: Option<&str>,
    params: &ListParams,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(browse) = state.article_service.browse_date(year, month, params).await? else {
        return Err(ApiError::not_found("No such date"));
    };

    let pagination = Pagination::from(&browse.articles);
    Ok(Json(json!({
        "start": browse.start.to_string(),
        "end": browse.end.to_string(),
        "articles": summaries(browse.articles.items),
        "pagination": pagination,
    })))
}

/// The article archive, one bucket per distinct month
pub async fn get_archive(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let months = state.article_service.archive().await?;
    Ok(Json(json!({ "months": months })))
}

/// Article detail by slug, with categories, region and comments
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(detail) = state.article_service.detail(&slug).await? else {
        return Err(ApiError::not_found("Article not found"));
    };

    let comments = state
        .comment_service
        .list_for_article(detail.article.id)
        .await?
        .unwrap_or_default();

    let categories: Vec<CategoryInfo> =
        detail.categories.into_iter().map(CategoryInfo::from).collect();

    Ok(Json(json!({
        "article": ArticleResponse::from(detail.article),
        "categories": categories,
        "region": detail.region.map(RegionResponse::from),
        "comments": comments.into_iter().map(CommentResponse::from).collect::<Vec<_>>(),
    })))
}
