//! Static registry of monitored locations in the Aysén region

use serde::Serialize;

use crate::models::Location;

/// Read-only set of locations the alerting endpoints evaluate
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationRegistry {
    glaciers: Vec<Location>,
    basins: Vec<Location>,
    settlements: Vec<Location>,
}

impl LocationRegistry {
    pub fn new(glaciers: Vec<Location>, basins: Vec<Location>, settlements: Vec<Location>) -> Self {
        Self {
            glaciers,
            basins,
            settlements,
        }
    }

    /// Glaciers, ice fields, basins and towns monitored in Aysén
    pub fn aysen() -> Self {
        let glaciers = vec![
            Location::glacier_at_elevation("Glaciar San Rafael", -46.6833, -73.8333, 1500.0),
            Location::glacier_at_elevation("Glaciar Jorge Montt", -48.0167, -73.5333, 1200.0),
            Location::glacier_at_elevation("Glaciar O'Higgins", -48.8833, -72.9167, 800.0),
            Location::glacier_at_elevation("Glaciar Tyndall", -50.9833, -73.5167, 900.0),
            Location::glacier("Campo de Hielo Norte", -47.0, -73.5),
            Location::glacier("Campo de Hielo Sur", -49.5, -73.0),
        ];

        let basins = vec![
            Location::basin("Cuenca Río Baker", -47.7, -72.8, 26726.0),
            Location::basin("Cuenca Río Pascua", -48.8, -72.4, 8194.0),
            Location::basin("Cuenca Río Aysén", -45.4, -72.7, 11674.0),
            Location::basin("Cuenca Río Cisnes", -44.2, -71.8, 7500.0),
            Location::basin("Cuenca Río Palena", -43.6, -71.5, 10500.0),
        ];

        let settlements = vec![
            Location::settlement("Coyhaique", -45.5752, -72.0662),
            Location::settlement("Puerto Aysén", -45.4014, -72.6925),
            Location::settlement("Chile Chico", -46.5417, -71.7267),
            Location::settlement("Cochrane", -47.2531, -72.5789),
            Location::settlement("Villa O'Higgins", -48.4667, -72.5667),
        ];

        Self::new(glaciers, basins, settlements)
    }

    pub fn glaciers(&self) -> &[Location] {
        &self.glaciers
    }

    /// Glaciers with a known approximate elevation
    pub fn surveyed_glaciers(&self) -> Vec<Location> {
        self.glaciers
            .iter()
            .filter(|g| g.elevation_m().is_some())
            .cloned()
            .collect()
    }

    pub fn basins(&self) -> &[Location] {
        &self.basins
    }

    pub fn settlements(&self) -> &[Location] {
        &self.settlements
    }

    /// Look up any registered location by exact name
    pub fn find(&self, name: &str) -> Option<&Location> {
        self.glaciers
            .iter()
            .chain(self.basins.iter())
            .chain(self.settlements.iter())
            .find(|l| l.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationKind;

    #[test]
    fn test_aysen_registry_sizes() {
        let registry = LocationRegistry::aysen();
        assert_eq!(registry.glaciers().len(), 6);
        assert_eq!(registry.basins().len(), 5);
        assert_eq!(registry.settlements().len(), 5);
        assert_eq!(registry.surveyed_glaciers().len(), 4);
    }

    #[test]
    fn test_find_basin() {
        let registry = LocationRegistry::aysen();
        let baker = registry.find("Cuenca Río Baker").unwrap();
        assert_eq!(baker.kind, LocationKind::Basin { area_km2: 26726.0 });
        assert!(registry.find("Glaciar Grey").is_none());
    }

    #[test]
    fn test_low_elevation_glaciers() {
        let registry = LocationRegistry::aysen();
        let low: Vec<_> = registry
            .surveyed_glaciers()
            .into_iter()
            .filter(|g| g.elevation_m().map(|e| e < 1000.0).unwrap_or(false))
            .map(|g| g.name)
            .collect();
        assert_eq!(low, vec!["Glaciar O'Higgins", "Glaciar Tyndall"]);
    }
}
