//! Configuration management for the glacier alert server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with GLACIER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Coordinates, RegionProfile};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Terrain elevation API configuration
    pub topography: TopographyConfig,

    /// Region metadata attached to every alert response
    pub region: RegionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Which weather backend feeds the alert pipeline
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherProviderKind {
    OpenMeteo,
    /// Seeded demo data, for offline development
    Synthetic,
}

impl WeatherProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherProviderKind::OpenMeteo => "open_meteo",
            WeatherProviderKind::Synthetic => "synthetic",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast endpoint, e.g. https://api.open-meteo.com/v1/forecast
    pub api_endpoint: String,

    /// IANA timezone for hourly/daily series
    pub timezone: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub provider: WeatherProviderKind,

    /// Seed for the synthetic provider
    pub synthetic_seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TopographyConfig {
    /// Base URL, e.g. https://api.opentopodata.org/v1
    pub api_endpoint: String,

    /// Elevation dataset name
    pub dataset: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    pub short_name: String,
    pub centroid_lat: f64,
    pub centroid_lng: f64,
}

impl RegionConfig {
    pub fn to_profile(&self) -> RegionProfile {
        RegionProfile {
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            centroid: Coordinates::new(self.centroid_lat, self.centroid_lng),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("GLACIER_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let region = RegionProfile::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.open-meteo.com/v1/forecast")?
            .set_default("weather.timezone", "America/Santiago")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("weather.provider", "open_meteo")?
            .set_default("weather.synthetic_seed", 42)?
            .set_default("topography.api_endpoint", "https://api.opentopodata.org/v1")?
            .set_default("topography.dataset", "aster30m")?
            .set_default("topography.timeout_secs", 10)?
            .set_default("region.name", region.name)?
            .set_default("region.short_name", region.short_name)?
            .set_default("region.centroid_lat", region.centroid.lat)?
            .set_default("region.centroid_lng", region.centroid.lng)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GLACIER_ prefix)
            .add_source(
                Environment::with_prefix("GLACIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with the synthetic provider, for router tests
    pub fn for_tests() -> Self {
        let region = RegionProfile::default();
        Self {
            environment: "test".to_string(),
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
            },
            weather: WeatherConfig {
                api_endpoint: "http://127.0.0.1:9/v1/forecast".to_string(),
                timezone: "America/Santiago".to_string(),
                timeout_secs: 1,
                provider: WeatherProviderKind::Synthetic,
                synthetic_seed: 7,
            },
            topography: TopographyConfig {
                api_endpoint: "http://127.0.0.1:9/v1".to_string(),
                dataset: "aster30m".to_string(),
                timeout_secs: 1,
            },
            region: RegionConfig {
                name: region.name,
                short_name: region.short_name,
                centroid_lat: region.centroid.lat,
                centroid_lng: region.centroid.lng,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        let kind: WeatherProviderKind = serde_json::from_str("\"synthetic\"").unwrap();
        assert_eq!(kind, WeatherProviderKind::Synthetic);
        assert_eq!(WeatherProviderKind::OpenMeteo.as_str(), "open_meteo");
    }

    #[test]
    fn test_region_config_to_profile() {
        let profile = Config::for_tests().region.to_profile();
        assert_eq!(profile, RegionProfile::default());
    }
}
