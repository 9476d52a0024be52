//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints:
//! - Property search endpoints (full and partial variants)
//! - Article browse endpoints (list, category, region, date, archive, detail)
//! - Comment endpoints (submit, list, cached form)
//! - Region endpoints
//! - Home page endpoint

pub mod articles;
pub mod comments;
pub mod middleware;
pub mod properties;
pub mod regions;
pub mod responses;
pub mod site;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        // Property routes
        .route("/properties/search", get(properties::search_properties))
        .route("/properties/featured", get(properties::featured_properties))
        // Article routes
        .route("/articles", get(articles::list_articles))
        .route("/articles/archive", get(articles::get_archive))
        .route("/articles/category/{id}", get(articles::articles_by_category))
        .route("/articles/region/{id}", get(articles::articles_by_region))
        .route("/articles/date/{year}", get(articles::articles_by_year))
        .route("/articles/date/{year}/{month}", get(articles::articles_by_month))
        .route("/articles/{slug}", get(articles::get_article))
        // Region routes
        .route("/regions", get(regions::list_regions))
        .route("/regions/{id}", get(regions::get_region))
        // Comment routes
        .route("/comments", post(comments::create_comment))
        .route("/comments/form", get(comments::get_comment_form))
        .route("/comments/{article_id}", get(comments::get_comments))
        // Home page
        .route("/home", get(site::home))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    Ok(build_api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
