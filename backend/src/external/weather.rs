//! Weather providers feeding the alert pipeline
//!
//! `OpenMeteoClient` talks to the Open-Meteo forecast API; any variable the API
//! leaves out (or returns as null) is carried through as "no data".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    Coordinates, CurrentConditions, DailySample, HourlySample, WeatherRequest, WeatherSnapshot,
};

use super::ProviderError;

/// Source of weather snapshots for one point
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short name reported by the health endpoint
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        coordinates: Coordinates,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, ProviderError>;
}

/// Open-Meteo forecast API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    timezone: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: String, timezone: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            timezone,
        })
    }

    fn query(&self, coordinates: Coordinates, request: &WeatherRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("latitude", coordinates.lat.to_string()),
            ("longitude", coordinates.lng.to_string()),
            ("timezone", self.timezone.clone()),
            ("past_days", request.past_days.to_string()),
            ("forecast_days", request.forecast_days.to_string()),
        ];
        for (key, vars) in [
            ("current", request.current),
            ("hourly", request.hourly),
            ("daily", request.daily),
        ] {
            if !vars.is_empty() {
                params.push((key, vars.join(",")));
            }
        }
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    fn name(&self) -> &'static str {
        "open_meteo"
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query(coordinates, request))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let data: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(data.into_snapshot())
    }
}

// ============================================================================
// Open-Meteo response structures
// ============================================================================

/// Series are parallel arrays; whole arrays and single entries may be null
type Series<T> = Option<Vec<Option<T>>>;

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
    hourly: Option<HourlyData>,
    daily: Option<DailyData>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentData {
    time: Option<String>,
    temperature_2m: Option<f64>,
    precipitation: Option<f64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyData {
    time: Series<String>,
    temperature_2m: Series<f64>,
    precipitation: Series<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyData {
    time: Series<String>,
    temperature_2m_max: Series<f64>,
    temperature_2m_min: Series<f64>,
    precipitation_sum: Series<f64>,
}

fn at<T: Clone>(series: &Series<T>, i: usize) -> Option<T> {
    series.as_ref().and_then(|s| s.get(i).cloned().flatten())
}

fn len<T>(series: &Series<T>) -> usize {
    series.as_ref().map_or(0, Vec::len)
}

impl ForecastResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let current = self
            .current
            .map(|c| CurrentConditions {
                observed_at: c.time,
                temperature_celsius: c.temperature_2m,
                precipitation_mm: c.precipitation,
                wind_speed_kmh: c.wind_speed_10m,
                wind_direction_deg: c.wind_direction_10m,
                humidity_percent: c.relative_humidity_2m,
            })
            .unwrap_or_default();

        let hourly = self
            .hourly
            .map(|h| {
                let n = len(&h.time).max(len(&h.temperature_2m)).max(len(&h.precipitation));
                (0..n)
                    .map(|i| HourlySample {
                        time: at(&h.time, i),
                        temperature_celsius: at(&h.temperature_2m, i),
                        precipitation_mm: at(&h.precipitation, i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let daily = self
            .daily
            .map(|d| {
                let n = len(&d.time)
                    .max(len(&d.temperature_2m_max))
                    .max(len(&d.temperature_2m_min))
                    .max(len(&d.precipitation_sum));
                (0..n)
                    .map(|i| DailySample {
                        date: at(&d.time, i),
                        temp_max_celsius: at(&d.temperature_2m_max, i),
                        temp_min_celsius: at(&d.temperature_2m_min, i),
                        precipitation_sum_mm: at(&d.precipitation_sum, i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        WeatherSnapshot {
            current,
            hourly,
            daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> WeatherSnapshot {
        serde_json::from_str::<ForecastResponse>(json)
            .unwrap()
            .into_snapshot()
    }

    #[test]
    fn test_decode_full_response() {
        let snapshot = decode(
            r#"{
                "latitude": -46.68, "longitude": -73.83, "timezone": "America/Santiago",
                "current": {"time": "2024-01-15T14:00", "interval": 900,
                    "temperature_2m": 13.2, "precipitation": 0.4,
                    "wind_speed_10m": 22.1, "wind_direction_10m": 270,
                    "relative_humidity_2m": 81},
                "hourly": {"time": ["2024-01-15T00:00", "2024-01-15T01:00"],
                    "temperature_2m": [8.1, 7.9], "precipitation": [0.0, 1.2]},
                "daily": {"time": ["2024-01-15"], "temperature_2m_max": [14.0],
                    "temperature_2m_min": [6.5], "precipitation_sum": [3.1]}
            }"#,
        );

        assert_eq!(snapshot.current.observed_at.as_deref(), Some("2024-01-15T14:00"));
        assert_eq!(snapshot.current.temperature_celsius, Some(13.2));
        assert_eq!(snapshot.current.humidity_percent, Some(81.0));
        assert_eq!(snapshot.hourly.len(), 2);
        assert_eq!(snapshot.hourly[1].precipitation_mm, Some(1.2));
        assert_eq!(snapshot.daily[0].temp_max_celsius, Some(14.0));
    }

    #[test]
    fn test_decode_tolerates_nulls_and_missing_blocks() {
        let snapshot = decode(
            r#"{
                "current": {"time": "2024-01-15T14:00", "temperature_2m": null},
                "hourly": {"time": ["a", "b", "c"], "temperature_2m": [1.0, null],
                    "precipitation": null}
            }"#,
        );

        assert_eq!(snapshot.current.temperature_celsius, None);
        assert_eq!(snapshot.current.temperature(), 0.0);
        assert_eq!(snapshot.hourly.len(), 3);
        assert_eq!(snapshot.hourly[0].temperature_celsius, Some(1.0));
        assert_eq!(snapshot.hourly[1].temperature_celsius, None);
        assert_eq!(snapshot.hourly[2].temperature_celsius, None);
        assert!(snapshot.hourly.iter().all(|h| h.precipitation_mm.is_none()));
        assert!(snapshot.daily.is_empty());
    }

    #[test]
    fn test_decode_empty_object() {
        assert_eq!(decode("{}"), WeatherSnapshot::default());
    }

    #[test]
    fn test_query_skips_empty_variable_lists() {
        let client = OpenMeteoClient::new(
            "http://localhost/v1/forecast".to_string(),
            "America/Santiago".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let params = client.query(Coordinates::new(-45.5, -72.0), &WeatherRequest::CURRENT_ONLY);
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"current"));
        assert!(!keys.contains(&"hourly"));
        assert!(!keys.contains(&"daily"));
        assert!(params.contains(&("timezone", "America/Santiago".to_string())));
    }
}
