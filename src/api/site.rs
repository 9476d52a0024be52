//! Home page API endpoint

use axum::{extract::State, Json};
use serde_json::json;

use crate::api::middleware::{ApiError, AppState};
use crate::api::properties::NUM_FEATURED_PROPERTIES;
use crate::api::responses::{ArticleSummary, PropertyResponse};

/// Number of latest articles shown on the home page
pub const NUM_LATEST_ARTICLES: i64 = 3;

/// The home page payload: featured properties and the latest articles
pub async fn home(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let featured = state.property_repo.featured(NUM_FEATURED_PROPERTIES).await?;
    let latest = state.article_service.latest(NUM_LATEST_ARTICLES).await?;

    Ok(Json(json!({
        "site": { "name": state.site.name },
        "featured_properties": featured.into_iter().map(PropertyResponse::from).collect::<Vec<_>>(),
        "latest_articles": latest.into_iter().map(ArticleSummary::from).collect::<Vec<_>>(),
    })))
}
