//! Error handling for the glacier alert server
//!
//! Every error is logged and rendered as `{"detail": ..., "code": ...}`.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::external::ProviderError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service error: {0}")]
    WeatherService(ProviderError),

    #[error("Topography service error: {0}")]
    TopographyService(ProviderError),

    // Pipeline errors
    #[error("No locations configured for {0}")]
    EmptyRegistry(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::WeatherService(_) => (StatusCode::BAD_GATEWAY, "WEATHER_SERVICE_ERROR"),
            AppError::TopographyService(_) => {
                (StatusCode::BAD_GATEWAY, "TOPOGRAPHY_SERVICE_ERROR")
            }
            AppError::EmptyRegistry(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EMPTY_REGISTRY"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let body = ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<shared::ValidationError> for AppError {
    fn from(err: shared::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errs
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        AppError::Validation(format!("invalid value for {}", fields.join(", ")))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("lat".into()).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("elevation".into()).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::WeatherService(ProviderError::Status(503)).status_and_code().0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Configuration("bad endpoint".into()).status_and_code().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_coordinate_validation() {
        let err: AppError = shared::validate_latitude(95.0).unwrap_err().into();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Latitude"));
    }
}
