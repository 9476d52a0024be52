//! Property search API endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{Pagination, PropertyResponse};
use crate::services::PropertySearchRequest;

/// Maximum number of properties surfaced as featured
pub const NUM_FEATURED_PROPERTIES: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct SearchOptions {
    /// When present, return only the result fragment (the AJAX variant)
    #[serde(default)]
    pub partial: Option<String>,
}

/// Search properties with the optional filter parameters.
///
/// Both the full rendering and the `partial` fragment run the identical
/// filter path; the partial variant just drops the form echo.
pub async fn search_properties(
    State(state): State<AppState>,
    Query(request): Query<PropertySearchRequest>,
    Query(options): Query<SearchOptions>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let results = state.property_search.search(&request).await?;

    let pagination = Pagination::from(&results);
    let properties: Vec<PropertyResponse> =
        results.items.into_iter().map(PropertyResponse::from).collect();

    if options.partial.is_some() {
        return Ok(Json(json!({
            "results": properties,
            "pagination": pagination,
        })));
    }

    Ok(Json(json!({
        "form": {
            "Keywords": request.keywords,
            "ArrivalDate": request.arrival_date,
            "Nights": request.nights,
            "Bedrooms": request.bedrooms,
            "Bathrooms": request.bathrooms,
            "MinPrice": request.min_price,
            "MaxPrice": request.max_price,
        },
        "results": properties,
        "pagination": pagination,
    })))
}

/// Featured properties, capped
pub async fn featured_properties(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let properties = state.property_repo.featured(NUM_FEATURED_PROPERTIES).await?;
    let properties: Vec<PropertyResponse> =
        properties.into_iter().map(PropertyResponse::from).collect();

    Ok(Json(json!({ "properties": properties })))
}
