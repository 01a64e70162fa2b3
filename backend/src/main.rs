//! Aysén Glacier Alerts - Backend Server
//!
//! Serves hazard alerts derived from weather data for the glaciers, ice
//! fields and river basins of the Aysén region, plus temperature and terrain
//! lookups for the map client.

use axum::{routing::get, Router};
use shared::registry::LocationRegistry;
use shared::RegionProfile;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use config::WeatherProviderKind;
use external::{OpenMeteoClient, SyntheticWeather, TopographyClient, WeatherProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<LocationRegistry>,
    pub region: Arc<RegionProfile>,
    pub weather: Arc<dyn WeatherProvider>,
    pub topography: TopographyClient,
}

impl AppState {
    /// Build providers and region constants from configuration
    pub fn from_config(config: Arc<Config>) -> Result<Self, error::AppError> {
        let weather: Arc<dyn WeatherProvider> = match config.weather.provider {
            WeatherProviderKind::OpenMeteo => Arc::new(
                OpenMeteoClient::new(
                    config.weather.api_endpoint.clone(),
                    config.weather.timezone.clone(),
                    Duration::from_secs(config.weather.timeout_secs),
                )
                .map_err(|e| error::AppError::Configuration(e.to_string()))?,
            ),
            WeatherProviderKind::Synthetic => {
                Arc::new(SyntheticWeather::new(config.weather.synthetic_seed))
            }
        };

        let topography = TopographyClient::new(
            config.topography.api_endpoint.clone(),
            config.topography.dataset.clone(),
            Duration::from_secs(config.topography.timeout_secs),
        )
        .map_err(|e| error::AppError::Configuration(e.to_string()))?;

        Ok(Self {
            registry: Arc::new(LocationRegistry::aysen()),
            region: Arc::new(config.region.to_profile()),
            weather,
            topography,
            config,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glacier_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Aysén Glacier Alerts Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Weather provider: {}", config.weather.provider.as_str());

    let port = config.server.port;
    let host: std::net::IpAddr = config.server.host.parse()?;

    // Create application state
    let state = AppState::from_config(Arc::new(config))?;

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from((host, port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Aysén Glacier Alerts API v1.0"
}
