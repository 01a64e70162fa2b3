//! Threshold rules mapping a weather snapshot to candidate alerts
//!
//! Rules are independent: every rule of every requested group is evaluated,
//! so one location can raise several alerts of different types at once.
//! Rules that depend on a location attribute (basin area, glacier elevation)
//! never fire for locations of another kind.

use serde::{Deserialize, Serialize};

use super::metrics::DerivedMetrics;
use crate::models::{
    risk_index, AlertCandidate, AlertData, AlertType, Location, Severity, TempTrend, WeatherSnapshot,
};
use crate::types::slugify;

/// Family of rules served together by one alert profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    /// Temperature, precipitation and wind thresholds
    Meteorological,
    /// Flood rules for drainage basins
    Basin,
    /// Elevation, rain-on-ice and trend algorithms for glaciers
    Advanced,
}

impl RuleGroup {
    pub const ALL: [RuleGroup; 3] = [
        RuleGroup::Meteorological,
        RuleGroup::Basin,
        RuleGroup::Advanced,
    ];

    fn rules(&self) -> &'static [Rule] {
        match self {
            RuleGroup::Meteorological => METEOROLOGICAL_RULES,
            RuleGroup::Basin => BASIN_RULES,
            RuleGroup::Advanced => ADVANCED_RULES,
        }
    }

    /// Algorithm labels reported by responses that use this group
    pub fn algorithm_names(&self) -> &'static [&'static str] {
        match self {
            RuleGroup::Meteorological => &[],
            RuleGroup::Basin => &[],
            RuleGroup::Advanced => &[ALGO_ELEVATION, ALGO_RAIN_ON_ICE, ALGO_TREND],
        }
    }
}

const ALGO_ELEVATION: &str = "Deshielo + Elevación";
const ALGO_RAIN_ON_ICE: &str = "Lluvia sobre Hielo";
const ALGO_TREND: &str = "Análisis de Tendencias";

type Rule = fn(&RuleContext<'_>) -> Option<AlertCandidate>;

const METEOROLOGICAL_RULES: &[Rule] = &[
    accelerated_thaw,
    intense_precipitation,
    extreme_wind,
    combined_instability,
];
const BASIN_RULES: &[Rule] = &[basin_flood, basin_thaw_with_rain];
const ADVANCED_RULES: &[Rule] = &[low_elevation_thaw, rain_on_ice, adverse_trend];

/// Inputs shared by every rule for one location
pub struct RuleContext<'a> {
    pub location: &'a Location,
    pub metrics: DerivedMetrics,
    pub observed_at: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(location: &'a Location, snapshot: &'a WeatherSnapshot) -> Self {
        Self {
            location,
            metrics: DerivedMetrics::from_snapshot(snapshot),
            observed_at: snapshot.current.observed_at.as_deref().unwrap_or(""),
        }
    }

    /// Skeleton alert for this location; rules fill in the text and data
    fn alert(&self, slug: &str, alert_type: AlertType, severity: Severity, risk: u8) -> AlertCandidate {
        AlertCandidate {
            id: format!("{}_{}", slug, slugify(&self.location.name)),
            alert_type,
            severity,
            title: String::new(),
            description: String::new(),
            location: self.location.name.clone(),
            coordinates: self.location.coordinates,
            risk_index: risk,
            data: AlertData::default(),
            timestamp: self.observed_at.to_string(),
            expected_impact: String::new(),
            recommendations: String::new(),
            algorithm: None,
        }
    }
}

/// Evaluate the rules of `groups`, in order, for one location's snapshot
pub fn evaluate_location(
    location: &Location,
    snapshot: &WeatherSnapshot,
    groups: &[RuleGroup],
) -> Vec<AlertCandidate> {
    let ctx = RuleContext::new(location, snapshot);
    let candidates: Vec<AlertCandidate> = groups
        .iter()
        .flat_map(|group| group.rules().iter())
        .filter_map(|rule| rule(&ctx))
        .collect();

    for candidate in &candidates {
        tracing::debug!(
            "Rule fired: {} ({}, risk {})",
            candidate.id,
            candidate.severity,
            candidate.risk_index
        );
    }

    candidates
}

// ---------------------------------------------------------------------------
// Meteorological rules
// ---------------------------------------------------------------------------

fn accelerated_thaw(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let m = &ctx.metrics;
    if !(m.temp_current > 8.0 || m.temp_max_today > 12.0) {
        return None;
    }
    let severity = if m.temp_current > 12.0 {
        Severity::Critica
    } else {
        Severity::Alta
    };
    let risk = risk_index((m.temp_current + m.temp_max_today) * 3.5);
    let name = &ctx.location.name;

    Some(AlertCandidate {
        title: format!("Alerta de Deshielo Acelerado - {}", name),
        description: format!(
            "Temperatura elevada detectada: {:.1}°C actual, máxima: {:.1}°C. Riesgo de deshielo acelerado.",
            m.temp_current, m.temp_max_today
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            temperature_max: Some(m.temp_max_today),
            precipitation: Some(m.precip_current),
            wind_speed: Some(m.wind_current),
            ..Default::default()
        },
        expected_impact: "Aumento del caudal de ríos y arroyos glaciares".to_string(),
        recommendations: "Monitorear niveles de agua en ríos cercanos. Evitar actividades en zonas bajas próximas a glaciares.".to_string(),
        ..ctx.alert("temp_critica", AlertType::AcceleratedThaw, severity, risk)
    })
}

fn intense_precipitation(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let m = &ctx.metrics;
    if !(m.precip_24h > 20.0 || m.precip_current > 5.0) {
        return None;
    }
    let severity = if m.precip_24h > 50.0 {
        Severity::Critica
    } else {
        Severity::Alta
    };
    let risk = risk_index(m.precip_24h * 1.5);

    Some(AlertCandidate {
        title: format!("Alerta de Precipitación Intensa - {}", ctx.location.name),
        description: format!(
            "Precipitación intensa: {:.1}mm en 24h. Riesgo de crecidas y desprendimientos.",
            m.precip_24h
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            precipitation: Some(m.precip_current),
            precipitation_24h: Some(m.precip_24h),
            wind_speed: Some(m.wind_current),
            ..Default::default()
        },
        expected_impact: "Crecidas súbitas en ríos y arroyos. Posible inestabilidad de laderas.".to_string(),
        recommendations: "Alejarse de cauces de ríos y zonas bajas. Monitorear pronóstico meteorológico.".to_string(),
        ..ctx.alert("precipitacion_intensa", AlertType::IntensePrecipitation, severity, risk)
    })
}

fn extreme_wind(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let m = &ctx.metrics;
    if m.wind_current <= 60.0 {
        return None;
    }
    let severity = if m.wind_current > 80.0 {
        Severity::Critica
    } else {
        Severity::Alta
    };
    let risk = risk_index(m.wind_current * 0.8);

    Some(AlertCandidate {
        title: format!("Alerta de Viento Extremo - {}", ctx.location.name),
        description: format!(
            "Vientos extremos: {:.1} km/h. Riesgo de desprendimientos y avalanchas.",
            m.wind_current
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            wind_speed: Some(m.wind_current),
            precipitation: Some(m.precip_current),
            ..Default::default()
        },
        expected_impact: "Desprendimientos de hielo y roca. Condiciones peligrosas para navegación.".to_string(),
        recommendations: "Evitar actividades al aire libre. Alejarse de áreas expuestas.".to_string(),
        ..ctx.alert("viento_extremo", AlertType::ExtremeWind, severity, risk)
    })
}

fn combined_instability(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let m = &ctx.metrics;
    if !(m.temp_current > 10.0 && m.precip_24h > 15.0 && m.wind_current > 40.0) {
        return None;
    }

    Some(AlertCandidate {
        title: format!("Condiciones Críticas Múltiples - {}", ctx.location.name),
        description: format!(
            "Combinación peligrosa: Temp {:.1}°C, Precipitación {:.1}mm/24h, Viento {:.1} km/h",
            m.temp_current, m.precip_24h, m.wind_current
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            precipitation_24h: Some(m.precip_24h),
            wind_speed: Some(m.wind_current),
            ..Default::default()
        },
        expected_impact: "Riesgo extremo de desprendimientos, crecidas y cambios bruscos en el glaciar.".to_string(),
        recommendations: "ALERTA MÁXIMA: Evacuar zonas de riesgo. Suspender todas las actividades en el área.".to_string(),
        ..ctx.alert("condiciones_criticas", AlertType::GlacierInstability, Severity::Critica, 95)
    })
}

// ---------------------------------------------------------------------------
// Basin rules
// ---------------------------------------------------------------------------

fn basin_flood(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let area_km2 = ctx.location.basin_area_km2()?;
    let m = &ctx.metrics;
    // Above 3°C the precipitation falls as rain rather than snow
    if !(m.precip_48h > 30.0 && m.temp_max_daily > 3.0) {
        return None;
    }
    let severity = if m.precip_48h > 60.0 {
        Severity::Critica
    } else {
        Severity::Alta
    };
    let area_factor = (area_km2 / 10_000.0).min(1.5);
    let risk = risk_index(m.precip_48h * area_factor * 1.2);
    let name = &ctx.location.name;

    Some(AlertCandidate {
        title: format!("Alerta de Crecida - {}", name),
        description: format!(
            "Precipitación intensa en cuenca: {:.1}mm en 48h. Riesgo de crecida del río principal.",
            m.precip_48h
        ),
        data: AlertData {
            precipitation_48h: Some(m.precip_48h),
            temperature_max: Some(m.temp_max_daily),
            basin_area_km2: Some(area_km2),
            ..Default::default()
        },
        expected_impact: format!(
            "Crecida del río principal de la {}. Riesgo para infraestructura y actividades cercanas al cauce.",
            name
        ),
        recommendations: "Monitorear niveles de agua. Alejarse de cauces y zonas bajas. Preparar evacuación si es necesario.".to_string(),
        ..ctx.alert("crecida", AlertType::RiverFlood, severity, risk)
    })
}

fn basin_thaw_with_rain(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let area_km2 = ctx.location.basin_area_km2()?;
    let m = &ctx.metrics;
    if !(m.temp_max_daily > 8.0 && m.precip_48h > 20.0) {
        return None;
    }

    Some(AlertCandidate {
        title: format!("Alerta Deshielo + Lluvia - {}", ctx.location.name),
        description: format!(
            "Combinación crítica: Temp máx {:.1}°C + {:.1}mm lluvia. Riesgo extremo de crecida.",
            m.temp_max_daily, m.precip_48h
        ),
        data: AlertData {
            temperature_max: Some(m.temp_max_daily),
            precipitation_48h: Some(m.precip_48h),
            basin_area_km2: Some(area_km2),
            ..Default::default()
        },
        expected_impact: "Crecida súbita por deshielo acelerado + lluvia. Riesgo MUY ALTO.".to_string(),
        recommendations: "EVACUACIÓN INMEDIATA de zonas bajas. Suspender actividades en la cuenca.".to_string(),
        ..ctx.alert("deshielo_lluvia", AlertType::ThawWithRain, Severity::Critica, 90)
    })
}

// ---------------------------------------------------------------------------
// Advanced glacier rules
// ---------------------------------------------------------------------------

fn low_elevation_thaw(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    let elevation = ctx.location.elevation_m()?;
    let m = &ctx.metrics;
    if elevation >= 1000.0 || m.temp_current <= 0.0 {
        return None;
    }
    let elevation_factor = if elevation < 500.0 { 1.5 } else { 1.2 };
    let thaw_index = m.temp_current * elevation_factor + m.humidity * 0.1;
    if thaw_index <= 8.0 {
        return None;
    }
    let severity = if thaw_index > 15.0 {
        Severity::Critica
    } else {
        Severity::Alta
    };
    let risk = risk_index(thaw_index * 5.0);

    Some(AlertCandidate {
        title: format!("Deshielo Crítico por Baja Elevación - {}", ctx.location.name),
        description: format!(
            "Glaciar de baja altitud ({:.0}m) con temperatura {:.1}°C. Índice de deshielo: {:.1}",
            elevation, m.temp_current, thaw_index
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            elevation_m: Some(elevation),
            humidity: Some(m.humidity),
            thaw_index: Some(thaw_index),
            ..Default::default()
        },
        expected_impact: "Retroceso acelerado del glaciar. Aumento significativo del caudal de ríos glaciares.".to_string(),
        recommendations: "Monitoreo continuo de caudales. Preparar medidas de evacuación en zonas bajas.".to_string(),
        algorithm: Some(ALGO_ELEVATION.to_string()),
        ..ctx.alert("deshielo_avanzado", AlertType::AcceleratedThaw, severity, risk)
    })
}

fn rain_on_ice(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    if !ctx.location.is_glacier() {
        return None;
    }
    let m = &ctx.metrics;
    if !(m.temp_current > 2.0 && m.precip_current > 2.0) {
        return None;
    }
    let factor = if m.temp_current > 5.0 {
        m.precip_current * 2.0
    } else {
        m.precip_current * 1.5
    };
    if factor <= 6.0 {
        return None;
    }
    let risk = risk_index(factor * 8.0);

    Some(AlertCandidate {
        title: format!("Lluvia sobre Hielo - {}", ctx.location.name),
        description: format!(
            "Lluvia ({:.1}mm/h) sobre superficie glaciar a {:.1}°C. Aceleración extrema del deshielo.",
            m.precip_current, m.temp_current
        ),
        data: AlertData {
            temperature: Some(m.temp_current),
            precipitation: Some(m.precip_current),
            rain_on_ice_factor: Some(factor),
            ..Default::default()
        },
        expected_impact: "Deshielo explosivo. Posibles GLOF (Glacial Lake Outburst Floods).".to_string(),
        recommendations: "EVACUACIÓN INMEDIATA de áreas aguas abajo. Cerrar acceso al glaciar.".to_string(),
        algorithm: Some(ALGO_RAIN_ON_ICE.to_string()),
        ..ctx.alert("lluvia_hielo", AlertType::RainOnIce, Severity::Critica, risk)
    })
}

fn adverse_trend(ctx: &RuleContext<'_>) -> Option<AlertCandidate> {
    if !ctx.location.is_glacier() {
        return None;
    }
    let m = &ctx.metrics;
    if !(m.temp_trend == TempTrend::Increasing && m.precip_72h > 40.0) {
        return None;
    }

    Some(AlertCandidate {
        title: format!("Tendencia Climática Adversa - {}", ctx.location.name),
        description: format!(
            "Tendencia de calentamiento sostenido + {:.1}mm en 72h. Condiciones de riesgo prolongado.",
            m.precip_72h
        ),
        data: AlertData {
            temperature_trend: Some(m.temp_trend),
            precipitation_72h: Some(m.precip_72h),
            temperature: Some(m.temp_current),
            ..Default::default()
        },
        expected_impact: "Deterioro progresivo del glaciar. Cambios en patrones de drenaje.".to_string(),
        recommendations: "Monitoreo intensivo. Revisar infraestructura en el área de influencia glaciar.".to_string(),
        algorithm: Some(ALGO_TREND.to_string()),
        ..ctx.alert("tendencia_critica", AlertType::AdverseTrend, Severity::Alta, 75)
    })
}
