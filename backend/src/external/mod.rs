//! External API integrations

pub mod synthetic;
pub mod topography;
pub mod weather;

use thiserror::Error;

pub use synthetic::SyntheticWeather;
pub use topography::{Elevation, TopographyClient};
pub use weather::{OpenMeteoClient, WeatherProvider};

/// Failure talking to an upstream data provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),
}
