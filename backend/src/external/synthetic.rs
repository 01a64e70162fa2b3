//! Seeded synthetic weather for offline development and demos
//!
//! Only used when `weather.provider = "synthetic"`; never a fallback for a
//! failing real provider.

use async_trait::async_trait;
use chrono::{Duration, Timelike, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{
    Coordinates, CurrentConditions, DailySample, HourlySample, WeatherRequest, WeatherSnapshot,
};

use super::{ProviderError, WeatherProvider};

/// Deterministic per point: the same seed and coordinates always give the
/// same readings
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    seed: u64,
}

impl SyntheticWeather {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, coordinates: Coordinates) -> StdRng {
        let point = coordinates.lat.to_bits().rotate_left(17) ^ coordinates.lng.to_bits();
        StdRng::seed_from_u64(self.seed ^ point)
    }

    pub fn generate(&self, coordinates: Coordinates, request: &WeatherRequest) -> WeatherSnapshot {
        let mut rng = self.rng_for(coordinates);

        // Colder towards the southern ice fields
        let base_temp = 12.0 - (coordinates.lat.abs() - 43.0) * 1.2;
        let now = Utc::now();
        let hour_start = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .unwrap_or(now);

        let current = CurrentConditions {
            observed_at: Some(hour_start.format("%Y-%m-%dT%H:%M").to_string()),
            temperature_celsius: Some(base_temp + rng.gen_range(-4.0..6.0)),
            precipitation_mm: Some(rng.gen_range(0.0..6.0)),
            wind_speed_kmh: Some(rng.gen_range(5.0..75.0)),
            wind_direction_deg: Some(rng.gen_range(0.0..360.0)),
            humidity_percent: Some(rng.gen_range(55.0..98.0)),
        };

        let days = i64::from(request.past_days) + i64::from(request.forecast_days);
        let start = hour_start - Duration::days(i64::from(request.past_days));

        let hourly = if request.hourly.is_empty() {
            Vec::new()
        } else {
            (0..days * 24)
                .map(|h| {
                    let diurnal = ((h % 24) as f64 - 14.0).abs() * -0.3;
                    HourlySample {
                        time: Some((start + Duration::hours(h)).format("%Y-%m-%dT%H:%M").to_string()),
                        temperature_celsius: Some(base_temp + diurnal + rng.gen_range(-2.0..2.0)),
                        precipitation_mm: Some(if rng.gen_bool(0.35) {
                            rng.gen_range(0.1..3.0)
                        } else {
                            0.0
                        }),
                    }
                })
                .collect()
        };

        let daily = if request.daily.is_empty() {
            Vec::new()
        } else {
            (0..days)
                .map(|d| {
                    let max = base_temp + rng.gen_range(0.0..7.0);
                    DailySample {
                        date: Some((start + Duration::days(d)).format("%Y-%m-%d").to_string()),
                        temp_max_celsius: Some(max),
                        temp_min_celsius: Some(max - rng.gen_range(4.0..10.0)),
                        precipitation_sum_mm: Some(rng.gen_range(0.0..25.0)),
                    }
                })
                .collect()
        };

        WeatherSnapshot {
            current,
            hourly,
            daily,
        }
    }
}

#[async_trait]
impl WeatherProvider for SyntheticWeather {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, ProviderError> {
        Ok(self.generate(coordinates, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::alerts::AlertProfile;

    #[test]
    fn test_same_seed_same_readings() {
        let provider = SyntheticWeather::new(42);
        let point = Coordinates::new(-46.6833, -73.8333);
        let request = AlertProfile::Advanced.weather_request();

        let a = provider.generate(point, &request);
        let b = provider.generate(point, &request);
        assert_eq!(a.current.temperature_celsius, b.current.temperature_celsius);
        let precip_a: Vec<_> = a.hourly.iter().map(|h| h.precipitation_mm).collect();
        let precip_b: Vec<_> = b.hourly.iter().map(|h| h.precipitation_mm).collect();
        assert_eq!(precip_a, precip_b);
    }

    #[test]
    fn test_series_lengths_follow_request() {
        let provider = SyntheticWeather::new(1);
        let request = AlertProfile::Basins.weather_request();
        let snapshot = provider.generate(Coordinates::new(-47.7, -72.8), &request);

        assert_eq!(snapshot.hourly.len(), 4 * 24);
        assert_eq!(snapshot.daily.len(), 4);
    }

    #[test]
    fn test_current_only_has_no_series() {
        let provider = SyntheticWeather::new(1);
        let snapshot = provider.generate(Coordinates::new(-45.5, -72.0), &WeatherRequest::CURRENT_ONLY);
        assert!(snapshot.hourly.is_empty());
        assert!(snapshot.daily.is_empty());
        assert!(snapshot.current.temperature_celsius.is_some());
    }
}
