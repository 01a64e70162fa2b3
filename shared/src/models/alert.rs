//! Hazard alert models
//!
//! Field names on the wire follow the map client's contract (`tipo`, `nivel`,
//! `indiceRiesgo`, ...), while the Rust side keeps descriptive names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Coordinates;

/// Kind of hazard an alert describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlertType {
    #[serde(rename = "deshielo_acelerado")]
    AcceleratedThaw,
    #[serde(rename = "precipitacion_intensa")]
    IntensePrecipitation,
    #[serde(rename = "viento_extremo")]
    ExtremeWind,
    #[serde(rename = "inestabilidad_glaciar")]
    GlacierInstability,
    #[serde(rename = "crecida_fluvial")]
    RiverFlood,
    #[serde(rename = "deshielo_precipitacion")]
    ThawWithRain,
    #[serde(rename = "lluvia_sobre_hielo")]
    RainOnIce,
    #[serde(rename = "tendencia_climatica_adversa")]
    AdverseTrend,
    #[serde(rename = "alerta_regional")]
    Regional,
}

impl AlertType {
    /// Tag used by the map client
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::AcceleratedThaw => "deshielo_acelerado",
            AlertType::IntensePrecipitation => "precipitacion_intensa",
            AlertType::ExtremeWind => "viento_extremo",
            AlertType::GlacierInstability => "inestabilidad_glaciar",
            AlertType::RiverFlood => "crecida_fluvial",
            AlertType::ThawWithRain => "deshielo_precipitacion",
            AlertType::RainOnIce => "lluvia_sobre_hielo",
            AlertType::AdverseTrend => "tendencia_climatica_adversa",
            AlertType::Regional => "alerta_regional",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Media,
    Alta,
    Critica,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Media => write!(f, "media"),
            Severity::Alta => write!(f, "alta"),
            Severity::Critica => write!(f, "critica"),
        }
    }
}

/// Direction of the 24h-over-24h mean temperature change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TempTrend {
    #[serde(rename = "aumentando")]
    Increasing,
    #[serde(rename = "disminuyendo")]
    Decreasing,
    #[default]
    #[serde(rename = "estable")]
    Stable,
}

/// Metrics backing an alert. Only the fields a rule fills are serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertData {
    #[serde(rename = "temperatura", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "temperaturaMaxima", skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "precipitacion", skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(rename = "precipitacion24h", skip_serializing_if = "Option::is_none")]
    pub precipitation_24h: Option<f64>,
    #[serde(rename = "precipitacion48h", skip_serializing_if = "Option::is_none")]
    pub precipitation_48h: Option<f64>,
    #[serde(rename = "precipitacion72h", skip_serializing_if = "Option::is_none")]
    pub precipitation_72h: Option<f64>,
    #[serde(rename = "viento", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "humedad", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(rename = "elevacion", skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    #[serde(rename = "areaCuenca", skip_serializing_if = "Option::is_none")]
    pub basin_area_km2: Option<f64>,
    #[serde(rename = "indiceDeshielo", skip_serializing_if = "Option::is_none")]
    pub thaw_index: Option<f64>,
    #[serde(rename = "factorRiesgo", skip_serializing_if = "Option::is_none")]
    pub rain_on_ice_factor: Option<f64>,
    #[serde(rename = "tendenciaTemperatura", skip_serializing_if = "Option::is_none")]
    pub temperature_trend: Option<TempTrend>,
    #[serde(rename = "glaciaresAfectados", skip_serializing_if = "Option::is_none")]
    pub affected_locations: Option<usize>,
    #[serde(rename = "tipoAlertas", skip_serializing_if = "Option::is_none")]
    pub alert_types: Option<Vec<AlertType>>,
}

/// A single hazard alert. Immutable once built by a rule or the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertCandidate {
    pub id: String,
    #[serde(rename = "tipo")]
    pub alert_type: AlertType,
    #[serde(rename = "nivel")]
    pub severity: Severity,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: Coordinates,
    #[serde(rename = "indiceRiesgo")]
    pub risk_index: u8,
    #[serde(rename = "datos")]
    pub data: AlertData,
    pub timestamp: String,
    #[serde(rename = "impactoEsperado")]
    pub expected_impact: String,
    #[serde(rename = "recomendaciones")]
    pub recommendations: String,
    #[serde(rename = "algoritmo", skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

/// Identifies "the same kind of problem at the same place"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub location: String,
    pub alert_type: AlertType,
}

impl AlertCandidate {
    pub fn key(&self) -> AlertKey {
        AlertKey {
            location: self.location.clone(),
            alert_type: self.alert_type,
        }
    }

    pub fn is_regional(&self) -> bool {
        self.alert_type == AlertType::Regional
    }
}

/// Convert a raw score to a risk index: rounded half away from zero and
/// clamped to 0..=100
pub fn risk_index(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_index_rounding_and_clamp() {
        assert_eq!(risk_index(94.5), 95);
        assert_eq!(risk_index(94.4), 94);
        assert_eq!(risk_index(117.0), 100);
        assert_eq!(risk_index(-3.0), 0);
        assert_eq!(risk_index(f64::NAN), 0);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critica > Severity::Alta);
        assert!(Severity::Alta > Severity::Media);
    }

    #[test]
    fn test_alert_type_wire_names() {
        let json = serde_json::to_string(&AlertType::RiverFlood).unwrap();
        assert_eq!(json, "\"crecida_fluvial\"");
        assert_eq!(AlertType::Regional.to_string(), "alerta_regional");
    }

    #[test]
    fn test_alert_data_skips_absent_fields() {
        let data = AlertData {
            temperature: Some(9.5),
            temperature_trend: Some(TempTrend::Increasing),
            ..Default::default()
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["temperatura"], 9.5);
        assert_eq!(value["tendenciaTemperatura"], "aumentando");
        assert!(value.get("viento").is_none());
    }
}
