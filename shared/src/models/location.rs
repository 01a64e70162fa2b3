//! Monitored locations

use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

/// A named point evaluated by the alerting engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(flatten)]
    pub kind: LocationKind,
}

/// What a location represents, with the static attributes rules depend on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationKind {
    /// Glacier or ice field; `elevation_m` is an approximate terminus elevation
    Glacier { elevation_m: Option<f64> },
    /// Hydrographic drainage basin
    Basin { area_km2: f64 },
    /// Town used for regional temperature sweeps
    Settlement,
}

impl Location {
    pub fn glacier(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            kind: LocationKind::Glacier { elevation_m: None },
        }
    }

    pub fn glacier_at_elevation(name: &str, lat: f64, lng: f64, elevation_m: f64) -> Self {
        Self {
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            kind: LocationKind::Glacier {
                elevation_m: Some(elevation_m),
            },
        }
    }

    pub fn basin(name: &str, lat: f64, lng: f64, area_km2: f64) -> Self {
        Self {
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            kind: LocationKind::Basin { area_km2 },
        }
    }

    pub fn settlement(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            kind: LocationKind::Settlement,
        }
    }

    pub fn is_glacier(&self) -> bool {
        matches!(self.kind, LocationKind::Glacier { .. })
    }

    pub fn elevation_m(&self) -> Option<f64> {
        match self.kind {
            LocationKind::Glacier { elevation_m } => elevation_m,
            _ => None,
        }
    }

    pub fn basin_area_km2(&self) -> Option<f64> {
        match self.kind {
            LocationKind::Basin { area_km2 } => Some(area_km2),
            _ => None,
        }
    }
}
