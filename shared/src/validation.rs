//! Validation of user-supplied query parameters

use thiserror::Error;

use crate::types::Coordinates;

/// Longest forecast horizon the weather provider serves
pub const MAX_FORECAST_DAYS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("Latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    Longitude(f64),

    #[error("Forecast days must be between 1 and 16, got {0}")]
    ForecastDays(u8),
}

// ============================================================================
// Coordinates
// ============================================================================

pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(ValidationError::Latitude(lat))
    }
}

pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if lon.is_finite() && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(ValidationError::Longitude(lon))
    }
}

/// Validate a point and return it as [`Coordinates`]
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<Coordinates, ValidationError> {
    validate_latitude(lat)?;
    validate_longitude(lon)?;
    Ok(Coordinates::new(lat, lon))
}

// ============================================================================
// Forecast range
// ============================================================================

pub fn validate_forecast_days(days: u8) -> Result<(), ValidationError> {
    if (1..=MAX_FORECAST_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(ValidationError::ForecastDays(days))
    }
}
