//! Region API endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::RegionResponse;

/// All regions, with links into their scoped article listings
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let regions = state.region_repo.list().await?;
    let regions: Vec<RegionResponse> = regions.into_iter().map(RegionResponse::from).collect();

    Ok(Json(json!({ "regions": regions })))
}

/// One region by id
pub async fn get_region(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(region) = state.region_repo.get_by_id(id).await? else {
        return Err(ApiError::not_found("Region not found"));
    };

    Ok(Json(json!({ "region": RegionResponse::from(region) })))
}
