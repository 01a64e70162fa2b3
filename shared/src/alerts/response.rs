use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::AlertCandidate;
use crate::types::RegionProfile;

/// Alert list plus metadata returned by every alert endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertResponse {
    #[serde(rename = "alertas")]
    pub alerts: Vec<AlertCandidate>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "fuente")]
    pub source: String,
    pub region: String,
    #[serde(
        rename = "algoritmos_utilizados",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub algorithms: Vec<String>,
    #[serde(rename = "fuentes_datos", default, skip_serializing_if = "Vec::is_empty")]
    pub data_sources: Vec<String>,
    /// Locations whose weather could not be fetched
    #[serde(
        rename = "ubicaciones_sin_datos",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub unavailable_locations: Vec<String>,
}

impl AlertResponse {
    /// Wrap the final alert list; `total` always equals the list length
    pub fn assemble(
        alerts: Vec<AlertCandidate>,
        source: impl Into<String>,
        region: &RegionProfile,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            total: alerts.len(),
            alerts,
            timestamp: generated_at,
            source: source.into(),
            region: region.name.clone(),
            algorithms: Vec::new(),
            data_sources: Vec::new(),
            unavailable_locations: Vec::new(),
        }
    }

    pub fn with_algorithms<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.algorithms = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data_sources<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.data_sources = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unavailable(mut self, locations: Vec<String>) -> Self {
        self.unavailable_locations = locations;
        self
    }

    pub fn is_degraded(&self) -> bool {
        !self.unavailable_locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_response_wire_shape() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap();
        let response = AlertResponse::assemble(
            Vec::new(),
            "OpenMeteo API + Análisis de cuencas",
            &RegionProfile::default(),
            at,
        );
        assert_eq!(response.total, 0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["alertas"], serde_json::json!([]));
        assert_eq!(json["total"], 0);
        assert_eq!(json["fuente"], "OpenMeteo API + Análisis de cuencas");
        assert_eq!(json["region"], "Aysén del Gral. Carlos Ibáñez del Campo");
        assert!(json.get("algoritmos_utilizados").is_none());
        assert!(json.get("ubicaciones_sin_datos").is_none());
    }

    #[test]
    fn test_optional_metadata_is_serialized_when_set() {
        let response = AlertResponse::assemble(
            Vec::new(),
            "x",
            &RegionProfile::default(),
            Utc::now(),
        )
        .with_algorithms(["Lluvia sobre Hielo"])
        .with_data_sources(["OpenMeteo"])
        .with_unavailable(vec!["Glaciar Tyndall".to_string()]);

        assert!(response.is_degraded());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["algoritmos_utilizados"][0], "Lluvia sobre Hielo");
        assert_eq!(json["fuentes_datos"][0], "OpenMeteo");
        assert_eq!(json["ubicaciones_sin_datos"][0], "Glaciar Tyndall");
    }
}
