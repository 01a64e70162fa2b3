//! HTTP handlers for the alert endpoints

use axum::{extract::State, Json};
use shared::alerts::{AlertProfile, AlertResponse};

use crate::error::AppResult;
use crate::services::AlertService;
use crate::AppState;

async fn run_profile(state: AppState, profile: AlertProfile) -> AppResult<Json<AlertResponse>> {
    let service = AlertService::new(state.weather, state.registry, state.region);
    let response = service.run(profile).await?;
    Ok(Json(response))
}

/// Every rule over every glacier and basin
pub async fn get_all_alerts(State(state): State<AppState>) -> AppResult<Json<AlertResponse>> {
    run_profile(state, AlertProfile::Combined).await
}

pub async fn get_meteorological_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<AlertResponse>> {
    run_profile(state, AlertProfile::Meteorological).await
}

pub async fn get_basin_alerts(State(state): State<AppState>) -> AppResult<Json<AlertResponse>> {
    run_profile(state, AlertProfile::Basins).await
}

pub async fn get_advanced_alerts(State(state): State<AppState>) -> AppResult<Json<AlertResponse>> {
    run_profile(state, AlertProfile::Advanced).await
}
