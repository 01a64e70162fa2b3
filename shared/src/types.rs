//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Geographic coordinates in WGS84 degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Region-wide constants, built once at startup and passed explicitly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionProfile {
    /// Full administrative name, used as the `region` label of responses
    pub name: String,
    /// Short label used as the location of region-wide alerts
    pub short_name: String,
    /// Representative point for region-wide alerts
    pub centroid: Coordinates,
}

impl Default for RegionProfile {
    fn default() -> Self {
        Self {
            name: "Aysén del Gral. Carlos Ibáñez del Campo".to_string(),
            short_name: "Región de Aysén".to_string(),
            centroid: Coordinates::new(-47.0, -73.0),
        }
    }
}

/// Lowercase a place name and replace spaces with underscores, for alert ids
pub fn slugify(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Glaciar San Rafael"), "glaciar_san_rafael");
        assert_eq!(slugify("Glaciar O'Higgins"), "glaciar_o'higgins");
        assert_eq!(slugify("Cuenca Río Baker"), "cuenca_río_baker");
    }

    #[test]
    fn test_default_region() {
        let region = RegionProfile::default();
        assert_eq!(region.centroid, Coordinates::new(-47.0, -73.0));
        assert_eq!(region.short_name, "Región de Aysén");
    }
}
