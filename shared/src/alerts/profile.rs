//! Alert profiles: which locations, rules and metadata one endpoint serves

use serde::{Deserialize, Serialize};

use super::rules::RuleGroup;
use crate::models::{Location, WeatherRequest};
use crate::registry::LocationRegistry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertProfile {
    /// Threshold alerts over the glaciers and ice fields
    Meteorological,
    /// Flood alerts over the drainage basins
    Basins,
    /// Elevation, rain-on-ice and trend algorithms over surveyed glaciers
    Advanced,
    /// Every rule over every glacier and basin
    Combined,
}

impl AlertProfile {
    pub fn rule_groups(&self) -> &'static [RuleGroup] {
        match self {
            AlertProfile::Meteorological => &[RuleGroup::Meteorological],
            AlertProfile::Basins => &[RuleGroup::Basin],
            AlertProfile::Advanced => &[RuleGroup::Advanced],
            AlertProfile::Combined => &RuleGroup::ALL,
        }
    }

    /// Whether a region-wide alert is appended after deduplication
    pub fn aggregates_regionally(&self) -> bool {
        matches!(self, AlertProfile::Advanced | AlertProfile::Combined)
    }

    pub fn locations(&self, registry: &LocationRegistry) -> Vec<Location> {
        match self {
            AlertProfile::Meteorological => registry.glaciers().to_vec(),
            AlertProfile::Basins => registry.basins().to_vec(),
            AlertProfile::Advanced => registry.surveyed_glaciers(),
            AlertProfile::Combined => registry
                .glaciers()
                .iter()
                .chain(registry.basins())
                .cloned()
                .collect(),
        }
    }

    /// `fuente` label of the response
    pub fn source_label(&self) -> &'static str {
        match self {
            AlertProfile::Meteorological | AlertProfile::Combined => {
                "OpenMeteo API + Algoritmos propios"
            }
            AlertProfile::Basins => "OpenMeteo API + Análisis de cuencas",
            AlertProfile::Advanced => "OpenMeteo + OpenTopoData + Algoritmos propios",
        }
    }

    pub fn data_sources(&self) -> &'static [&'static str] {
        match self {
            AlertProfile::Advanced | AlertProfile::Combined => {
                &["OpenMeteo", "OpenTopoData", "Algoritmos propios"]
            }
            _ => &[],
        }
    }

    pub fn weather_request(&self) -> WeatherRequest {
        match self {
            AlertProfile::Meteorological => WeatherRequest {
                current: &[
                    "temperature_2m",
                    "relative_humidity_2m",
                    "precipitation",
                    "wind_speed_10m",
                    "wind_direction_10m",
                ],
                hourly: &["temperature_2m", "precipitation", "wind_speed_10m"],
                daily: &[
                    "temperature_2m_max",
                    "temperature_2m_min",
                    "precipitation_sum",
                    "wind_speed_10m_max",
                ],
                past_days: 1,
                forecast_days: 3,
            },
            AlertProfile::Basins => WeatherRequest {
                current: &["temperature_2m", "precipitation", "wind_speed_10m"],
                hourly: &["precipitation", "temperature_2m"],
                daily: &["precipitation_sum", "temperature_2m_max"],
                past_days: 2,
                forecast_days: 2,
            },
            AlertProfile::Advanced => WeatherRequest {
                current: &[
                    "temperature_2m",
                    "precipitation",
                    "wind_speed_10m",
                    "relative_humidity_2m",
                ],
                hourly: &["temperature_2m", "precipitation"],
                daily: &["temperature_2m_max", "temperature_2m_min", "precipitation_sum"],
                past_days: 3,
                forecast_days: 2,
            },
            AlertProfile::Combined => WeatherRequest {
                current: &[
                    "temperature_2m",
                    "relative_humidity_2m",
                    "precipitation",
                    "wind_speed_10m",
                    "wind_direction_10m",
                ],
                hourly: &["temperature_2m", "precipitation", "wind_speed_10m"],
                daily: &["temperature_2m_max", "temperature_2m_min", "precipitation_sum"],
                past_days: 3,
                forecast_days: 3,
            },
        }
    }

    /// Algorithm labels reported by the response, regional analysis included
    pub fn algorithm_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .rule_groups()
            .iter()
            .flat_map(|g| g.algorithm_names().iter().copied())
            .collect();
        if self.aggregates_regionally() {
            names.push(super::regional::ALGO_REGIONAL);
        }
        names
    }
}
