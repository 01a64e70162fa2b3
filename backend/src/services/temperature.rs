//! Current-temperature lookups for single points and the regional settlements

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use shared::registry::LocationRegistry;
use shared::{validate_coordinates, validate_forecast_days, Location, RegionProfile, WeatherRequest};

use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointCoordinates {
    #[serde(rename = "latitud")]
    pub lat: f64,
    #[serde(rename = "longitud")]
    pub lon: f64,
}

/// Current readings; absent values are reported as 0
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentReading {
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    #[serde(rename = "humedad")]
    pub humidity: f64,
    #[serde(rename = "viento_velocidad")]
    pub wind_speed: f64,
    #[serde(rename = "viento_direccion")]
    pub wind_direction: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyTemperatures {
    pub time: Vec<Option<String>>,
    pub temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointTemperature {
    #[serde(rename = "ubicacion")]
    pub location: PointCoordinates,
    #[serde(rename = "actual")]
    pub current: CurrentReading,
    #[serde(rename = "horario")]
    pub hourly: HourlyTemperatures,
    #[serde(rename = "fuente")]
    pub source: &'static str,
}

/// One settlement of the regional sweep. Failed lookups carry `error` and a
/// null temperature.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettlementTemperature {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: PointCoordinates,
    #[serde(rename = "temperatura")]
    pub temperature: Option<f64>,
    #[serde(rename = "humedad", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(rename = "viento_velocidad", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "viento_direccion", skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionTemperatures {
    pub region: String,
    #[serde(rename = "puntos")]
    pub points: Vec<SettlementTemperature>,
    #[serde(rename = "fuente")]
    pub source: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TemperatureService {
    provider: Arc<dyn WeatherProvider>,
    registry: Arc<LocationRegistry>,
    region: Arc<RegionProfile>,
}

impl TemperatureService {
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

    /// Current conditions and hourly temperatures for one point
    pub async fn point(&self, lat: f64, lon: f64, days: u8) -> AppResult<PointTemperature> {
        let coordinates = validate_coordinates(lat, lon)?;
        validate_forecast_days(days)?;

        let request = WeatherRequest {
            hourly: &["temperature_2m"],
            forecast_days: days,
            ..WeatherRequest::CURRENT_ONLY
        };
        let snapshot = self
            .provider
            .fetch(coordinates, &request)
            .await
            .map_err(AppError::WeatherService)?;

        let current = &snapshot.current;
        Ok(PointTemperature {
            location: PointCoordinates { lat, lon },
            current: CurrentReading {
                temperature: current.temperature(),
                humidity: current.humidity(),
                wind_speed: current.wind_speed(),
                wind_direction: current.wind_direction_deg.unwrap_or(0.0),
            },
            hourly: HourlyTemperatures {
                time: snapshot.hourly.iter().map(|h| h.time.clone()).collect(),
                temperature_2m: snapshot
                    .hourly
                    .iter()
                    .map(|h| h.temperature_celsius)
                    .collect(),
            },
            source: "OpenMeteo",
        })
    }

    /// Current conditions for every registered settlement, in registry order
    pub async fn region(&self) -> RegionTemperatures {
        let points = join_all(
            self.registry
                .settlements()
                .iter()
                .map(|settlement| self.settlement(settlement)),
        )
        .await;

        RegionTemperatures {
            region: self.region.name.clone(),
            points,
            source: "OpenMeteo",
            timestamp: Utc::now(),
        }
    }

    async fn settlement(&self, settlement: &Location) -> SettlementTemperature {
        let coordinates = PointCoordinates {
            lat: settlement.coordinates.lat,
            lon: settlement.coordinates.lng,
        };

        match self
            .provider
            .fetch(settlement.coordinates, &WeatherRequest::CURRENT_ONLY)
            .await
        {
            Ok(snapshot) => {
                let current = &snapshot.current;
                SettlementTemperature {
                    name: settlement.name.clone(),
                    coordinates,
                    temperature: Some(current.temperature()),
                    humidity: Some(current.humidity()),
                    wind_speed: Some(current.wind_speed()),
                    wind_direction: Some(current.wind_direction_deg.unwrap_or(0.0)),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("No temperature for {}: {}", settlement.name, e);
                SettlementTemperature {
                    name: settlement.name.clone(),
                    coordinates,
                    temperature: None,
                    humidity: None,
                    wind_speed: None,
                    wind_direction: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{ProviderError, SyntheticWeather};
    use async_trait::async_trait;
    use shared::{Coordinates, WeatherSnapshot};

    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(
            &self,
            _coordinates: Coordinates,
            _request: &WeatherRequest,
        ) -> Result<WeatherSnapshot, ProviderError> {
            Err(ProviderError::Transport("connection refused".to_string()))
        }
    }

    fn service(provider: Arc<dyn WeatherProvider>) -> TemperatureService {
        TemperatureService::new(
            provider,
            Arc::new(LocationRegistry::aysen()),
            Arc::new(RegionProfile::default()),
        )
    }

    #[tokio::test]
    async fn test_point_returns_hourly_series() {
        let result = service(Arc::new(SyntheticWeather::new(3)))
            .point(-45.5, -72.0, 2)
            .await
            .unwrap();

        assert_eq!(result.hourly.temperature_2m.len(), 48);
        assert_eq!(result.location, PointCoordinates { lat: -45.5, lon: -72.0 });
    }

    #[tokio::test]
    async fn test_point_rejects_bad_input() {
        let service = service(Arc::new(SyntheticWeather::new(3)));
        assert!(matches!(
            service.point(-95.0, -72.0, 1).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.point(-45.5, -72.0, 0).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_point_upstream_failure() {
        let result = service(Arc::new(FailingProvider)).point(-45.5, -72.0, 1).await;
        assert!(matches!(result, Err(AppError::WeatherService(_))));
    }

    #[tokio::test]
    async fn test_region_reports_failures_per_point() {
        let result = service(Arc::new(FailingProvider)).region().await;

        assert_eq!(result.points.len(), 5);
        assert_eq!(result.points[0].name, "Coyhaique");
        assert!(result.points.iter().all(|p| p.temperature.is_none()));
        assert!(result.points.iter().all(|p| p.error.is_some()));

        let json = serde_json::to_value(&result.points[0]).unwrap();
        assert!(json["temperatura"].is_null());
        assert_eq!(json["error"], "request failed: connection refused");
    }
}
