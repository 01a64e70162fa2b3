//! Alert pipeline: fetch weather per location, evaluate, then finalize

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use shared::alerts::{finalize, AlertProfile, AlertResponse, LocationOutcome};
use shared::registry::LocationRegistry;
use shared::{Location, RegionProfile, WeatherRequest};

use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;

/// Runs one alert profile against the configured weather provider
#[derive(Clone)]
pub struct AlertService {
    provider: Arc<dyn WeatherProvider>,
    registry: Arc<LocationRegistry>,
    region: Arc<RegionProfile>,
}

impl AlertService {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        registry: Arc<LocationRegistry>,
        region: Arc<RegionProfile>,
    ) -> Self {
        Self {
            provider,
            registry,
            region,
        }
    }

    /// Fetch and evaluate every location of `profile` concurrently. A failed
    /// fetch only drops that location.
    pub async fn run(&self, profile: AlertProfile) -> AppResult<AlertResponse> {
        let locations = profile.locations(&self.registry);
        if locations.is_empty() {
            return Err(AppError::EmptyRegistry(format!("{:?}", profile)));
        }

        let request = profile.weather_request();
        let outcomes = join_all(
            locations
                .iter()
                .map(|location| self.evaluate(profile, location, &request)),
        )
        .await;

        let response = finalize(profile, outcomes, &self.region, Utc::now());
        tracing::info!(
            "{:?} alerts: {} generated over {} locations ({} without data)",
            profile,
            response.total,
            locations.len(),
            response.unavailable_locations.len()
        );
        if response.is_degraded() {
            tracing::warn!(
                "{:?} alerts degraded, no data for: {}",
                profile,
                response.unavailable_locations.join(", ")
            );
        }
        Ok(response)
    }

    async fn evaluate(
        &self,
        profile: AlertProfile,
        location: &Location,
        request: &WeatherRequest,
    ) -> LocationOutcome {
        match self.provider.fetch(location.coordinates, request).await {
            Ok(snapshot) => LocationOutcome::evaluate(profile, location, &snapshot),
            Err(e) => LocationOutcome::Unavailable {
                location: location.name.clone(),
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ProviderError;
    use async_trait::async_trait;
    use shared::alerts::REGIONAL_ALERT_ID;
    use shared::{AlertType, Coordinates, CurrentConditions, WeatherSnapshot};

    /// Same warm, wet reading everywhere, except for failing points
    struct StubProvider {
        failing: Vec<Coordinates>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn fetch(
            &self,
            coordinates: Coordinates,
            _request: &WeatherRequest,
        ) -> Result<WeatherSnapshot, ProviderError> {
            if self.failing.contains(&coordinates) {
                return Err(ProviderError::Status(503));
            }
            Ok(WeatherSnapshot::from_current(CurrentConditions {
                observed_at: Some("2024-01-15T14:00".to_string()),
                temperature_celsius: Some(13.0),
                precipitation_mm: Some(4.0),
                wind_speed_kmh: Some(10.0),
                humidity_percent: Some(80.0),
                ..Default::default()
            }))
        }
    }

    fn service(failing: Vec<Coordinates>) -> AlertService {
        AlertService::new(
            Arc::new(StubProvider { failing }),
            Arc::new(LocationRegistry::aysen()),
            Arc::new(RegionProfile::default()),
        )
    }

    #[tokio::test]
    async fn test_meteorological_run_keeps_registry_order() {
        let response = service(Vec::new())
            .run(AlertProfile::Meteorological)
            .await
            .unwrap();

        assert_eq!(response.total, 6);
        assert!(!response.is_degraded());
        assert!(response
            .alerts
            .iter()
            .all(|a| a.alert_type == AlertType::AcceleratedThaw));
        assert_eq!(response.alerts[0].location, "Glaciar San Rafael");
        assert_eq!(response.alerts[5].location, "Campo de Hielo Sur");
    }

    #[tokio::test]
    async fn test_failed_location_is_skipped_and_reported() {
        let tyndall = Coordinates::new(-50.9833, -73.5167);
        let response = service(vec![tyndall])
            .run(AlertProfile::Meteorological)
            .await
            .unwrap();

        assert_eq!(response.total, 5);
        assert!(response.is_degraded());
        assert_eq!(response.unavailable_locations, vec!["Glaciar Tyndall".to_string()]);
        assert!(response.alerts.iter().all(|a| a.location != "Glaciar Tyndall"));
    }

    #[tokio::test]
    async fn test_advanced_run_appends_regional() {
        let response = service(Vec::new()).run(AlertProfile::Advanced).await.unwrap();

        // O'Higgins and Tyndall sit below 1000 m; all four get rain on ice
        assert_eq!(response.total, 7);
        assert_eq!(response.alerts.last().map(|a| a.id.as_str()), Some(REGIONAL_ALERT_ID));
    }

    #[tokio::test]
    async fn test_empty_registry_is_an_error() {
        let service = AlertService::new(
            Arc::new(StubProvider { failing: Vec::new() }),
            Arc::new(LocationRegistry::new(Vec::new(), Vec::new(), Vec::new())),
            Arc::new(RegionProfile::default()),
        );
        let result = service.run(AlertProfile::Basins).await;
        assert!(matches!(result, Err(AppError::EmptyRegistry(_))));
    }
}
