//! HTTP handlers for temperature lookups

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::services::temperature::{PointTemperature, RegionTemperatures, TemperatureService};
use crate::AppState;

/// Query parameters for a single-point lookup
#[derive(Debug, Deserialize, Validate)]
pub struct PointQuery {
    #[serde(default = "default_lat")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[serde(default = "default_lon")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 16))]
    pub days: i64,
}

fn default_lat() -> f64 {
    -45.5
}

fn default_lon() -> f64 {
    -72.0
}

fn default_days() -> i64 {
    1
}

/// Get current conditions and hourly temperatures for one point
pub async fn get_point_temperature(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> AppResult<Json<PointTemperature>> {
    let Query(query) = query?;
    query.validate()?;

    let service = TemperatureService::new(state.weather, state.registry, state.region);
    // range-checked above
    let days = query.days as u8;
    let result = service.point(query.lat, query.lon, days).await?;
    Ok(Json(result))
}

/// Get current conditions for the region's settlements
pub async fn get_region_temperatures(State(state): State<AppState>) -> Json<RegionTemperatures> {
    let service = TemperatureService::new(state.weather, state.registry, state.region);
    Json(service.region().await)
}
