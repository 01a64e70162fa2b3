//! Weather data models

use serde::{Deserialize, Serialize};

/// Current/hourly/daily observations for one location at evaluation time.
///
/// Every measurement is optional: providers may omit variables, and absent
/// values are treated as "no data" by the rules rather than as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    #[serde(default)]
    pub hourly: Vec<HourlySample>,
    #[serde(default)]
    pub daily: Vec<DailySample>,
}

/// Conditions at observation time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// Provider-local ISO-8601 time of the observation
    pub observed_at: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub humidity_percent: Option<f64>,
}

/// One hour of the hourly series
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlySample {
    pub time: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

/// One day of the daily series
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailySample {
    pub date: Option<String>,
    pub temp_max_celsius: Option<f64>,
    pub temp_min_celsius: Option<f64>,
    pub precipitation_sum_mm: Option<f64>,
}

impl CurrentConditions {
    pub fn temperature(&self) -> f64 {
        self.temperature_celsius.unwrap_or(0.0)
    }

    pub fn precipitation(&self) -> f64 {
        self.precipitation_mm.unwrap_or(0.0)
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed_kmh.unwrap_or(0.0)
    }

    pub fn humidity(&self) -> f64 {
        self.humidity_percent.unwrap_or(0.0)
    }
}

impl WeatherSnapshot {
    /// Snapshot with only current conditions set; handy for callers that
    /// evaluate instantaneous readings
    pub fn from_current(current: CurrentConditions) -> Self {
        Self {
            current,
            ..Default::default()
        }
    }
}

/// Variables and time range requested from a weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherRequest {
    pub current: &'static [&'static str],
    pub hourly: &'static [&'static str],
    pub daily: &'static [&'static str],
    pub past_days: u8,
    pub forecast_days: u8,
}

impl WeatherRequest {
    /// Current conditions only, as used by point temperature lookups
    pub const CURRENT_ONLY: WeatherRequest = WeatherRequest {
        current: &[
            "temperature_2m",
            "relative_humidity_2m",
            "wind_speed_10m",
            "wind_direction_10m",
        ],
        hourly: &[],
        daily: &[],
        past_days: 0,
        forecast_days: 1,
    };
}
