//! HTTP handler for terrain elevation lookups

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::Elevation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ElevationQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Get terrain elevation for one point
pub async fn get_elevation(
    State(state): State<AppState>,
    query: Result<Query<ElevationQuery>, QueryRejection>,
) -> AppResult<Json<Elevation>> {
    let Query(query) = query?;
    let coordinates = shared::validate_coordinates(query.lat, query.lon)?;

    let elevation = state
        .topography
        .elevation(coordinates)
        .await
        .map_err(AppError::TopographyService)?
        .ok_or_else(|| AppError::NotFound("Elevation for this location".to_string()))?;

    Ok(Json(elevation))
}
