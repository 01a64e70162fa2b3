//! Route definitions for the glacier alert API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/alertas", alert_routes())
        .nest("/temperatura", temperature_routes())
        .route("/topografia/elevacion", get(handlers::get_elevation))
}

/// Alert routes, one per profile
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_all_alerts))
        .route("/meteorologicas", get(handlers::get_meteorological_alerts))
        .route("/cuencas", get(handlers::get_basin_alerts))
        .route("/avanzadas", get(handlers::get_advanced_alerts))
}

fn temperature_routes() -> Router<AppState> {
    Router::new()
        .route("/openmeteo", get(handlers::get_point_temperature))
        .route("/region_aysen", get(handlers::get_region_temperatures))
}
