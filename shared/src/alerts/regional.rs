//! Region-wide alert raised when several alerts are active at once

use chrono::{DateTime, Utc};

use crate::models::{AlertCandidate, AlertData, AlertType, Severity};
use crate::types::RegionProfile;

pub const REGIONAL_ALERT_ID: &str = "alerta_regional_multiples";
pub const REGIONAL_RISK_INDEX: u8 = 95;
pub const ALGO_REGIONAL: &str = "Análisis Regional";

/// Build the regional alert for a deduplicated alert set, if one is due.
///
/// Due when more than one alert survived deduplication and none of them is
/// already a regional alert.
pub fn regional_alert(
    alerts: &[AlertCandidate],
    region: &RegionProfile,
    generated_at: DateTime<Utc>,
) -> Option<AlertCandidate> {
    if alerts.len() <= 1 || alerts.iter().any(AlertCandidate::is_regional) {
        return None;
    }

    let mut locations: Vec<&str> = Vec::new();
    let mut alert_types: Vec<AlertType> = Vec::new();
    for alert in alerts {
        if !locations.contains(&alert.location.as_str()) {
            locations.push(alert.location.as_str());
        }
        if !alert_types.contains(&alert.alert_type) {
            alert_types.push(alert.alert_type);
        }
    }

    Some(AlertCandidate {
        id: REGIONAL_ALERT_ID.to_string(),
        alert_type: AlertType::Regional,
        severity: Severity::Critica,
        title: "Alerta Regional - Múltiples Ubicaciones en Riesgo".to_string(),
        description: format!(
            "Se detectaron {} alertas en {} ubicaciones de la región simultáneamente.",
            alerts.len(),
            locations.len()
        ),
        location: region.short_name.clone(),
        coordinates: region.centroid,
        risk_index: REGIONAL_RISK_INDEX,
        data: AlertData {
            affected_locations: Some(locations.len()),
            alert_types: Some(alert_types),
            ..Default::default()
        },
        timestamp: generated_at.to_rfc3339(),
        expected_impact: "Impacto regional significativo en recursos hídricos y actividades humanas."
            .to_string(),
        recommendations:
            "Activar protocolo de emergencia regional. Coordinar respuesta inter-institucional."
                .to_string(),
        algorithm: Some(ALGO_REGIONAL.to_string()),
    })
}

/// Append the regional alert to `alerts` when one is due
pub fn aggregate_regional(
    mut alerts: Vec<AlertCandidate>,
    region: &RegionProfile,
    generated_at: DateTime<Utc>,
) -> Vec<AlertCandidate> {
    if let Some(regional) = regional_alert(&alerts, region, generated_at) {
        tracing::info!("Regional alert raised over {} alerts", alerts.len());
        alerts.push(regional);
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;
    use chrono::TimeZone;

    fn alert(location: &str, alert_type: AlertType) -> AlertCandidate {
        AlertCandidate {
            id: format!("{}_{}", alert_type, location),
            alert_type,
            severity: Severity::Critica,
            title: String::new(),
            description: String::new(),
            location: location.to_string(),
            coordinates: Coordinates::new(-48.0, -73.0),
            risk_index: 80,
            data: AlertData::default(),
            timestamp: String::new(),
            expected_impact: String::new(),
            recommendations: String::new(),
            algorithm: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_single_alert_has_no_regional() {
        let alerts = vec![alert("Glaciar Tyndall", AlertType::RainOnIce)];
        let out = aggregate_regional(alerts, &RegionProfile::default(), now());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_two_locations_add_one_regional() {
        let alerts = vec![
            alert("Glaciar Tyndall", AlertType::RainOnIce),
            alert("Glaciar O'Higgins", AlertType::AcceleratedThaw),
            alert("Glaciar O'Higgins", AlertType::RainOnIce),
        ];
        let out = aggregate_regional(alerts, &RegionProfile::default(), now());
        assert_eq!(out.len(), 4);

        let regional = out.last().unwrap();
        assert_eq!(regional.alert_type, AlertType::Regional);
        assert_eq!(regional.severity, Severity::Critica);
        assert_eq!(regional.risk_index, 95);
        assert_eq!(regional.coordinates, Coordinates::new(-47.0, -73.0));
        assert_eq!(regional.data.affected_locations, Some(2));
        assert_eq!(
            regional.data.alert_types,
            Some(vec![AlertType::RainOnIce, AlertType::AcceleratedThaw])
        );
        assert_eq!(regional.timestamp, "2024-01-15T17:00:00+00:00");
    }

    #[test]
    fn test_refeeding_output_adds_nothing() {
        let alerts = vec![
            alert("Glaciar Tyndall", AlertType::RainOnIce),
            alert("Glaciar O'Higgins", AlertType::AcceleratedThaw),
        ];
        let once = aggregate_regional(alerts, &RegionProfile::default(), now());
        let twice = aggregate_regional(once.clone(), &RegionProfile::default(), now());
        assert_eq!(once, twice);
        assert_eq!(twice.iter().filter(|a| a.is_regional()).count(), 1);
    }

    #[test]
    fn test_same_input_same_regional() {
        let alerts = vec![
            alert("Glaciar Tyndall", AlertType::RainOnIce),
            alert("Glaciar O'Higgins", AlertType::AcceleratedThaw),
        ];
        let a = regional_alert(&alerts, &RegionProfile::default(), now());
        let b = regional_alert(&alerts, &RegionProfile::default(), now());
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}
