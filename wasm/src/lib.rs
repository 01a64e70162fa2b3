//! WebAssembly module for the Aysén glacier map client
//!
//! Provides client-side alert evaluation so the map can preview alerts for
//! weather it already holds. Values cross the boundary as JSON strings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use shared::alerts::{self, AlertProfile, LocationOutcome};
use shared::registry::LocationRegistry;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str("glacier alert engine loaded"));
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_profile(profile: &str) -> Result<AlertProfile, JsValue> {
    serde_json::from_value(serde_json::Value::String(profile.to_string()))
        .map_err(|e| js_error("Unknown alert profile", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

/// Evaluate one location's snapshot under a profile's rules
#[wasm_bindgen]
pub fn evaluate_location(
    location_json: &str,
    snapshot_json: &str,
    profile: &str,
) -> Result<String, JsValue> {
    let location: Location = serde_json::from_str(location_json)
        .map_err(|e| js_error("Invalid location JSON", e))?;
    let snapshot: WeatherSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| js_error("Invalid snapshot JSON", e))?;
    let profile = parse_profile(profile)?;

    let candidates = alerts::evaluate_location(&location, &snapshot, profile.rule_groups());
    to_json(&candidates)
}

/// Collapse duplicate alerts, keeping the riskiest per location and type
#[wasm_bindgen]
pub fn deduplicate(alerts_json: &str) -> Result<String, JsValue> {
    let candidates: Vec<AlertCandidate> =
        serde_json::from_str(alerts_json).map_err(|e| js_error("Invalid alerts JSON", e))?;
    to_json(&alerts::deduplicate(candidates))
}

/// Run a whole profile over the registry.
///
/// `snapshots_json` maps location names to snapshots; registry locations with
/// no entry are reported as lacking data. `generated_at` is RFC 3339.
#[wasm_bindgen]
pub fn run_profile(profile: &str, snapshots_json: &str, generated_at: &str) -> Result<String, JsValue> {
    let profile = parse_profile(profile)?;
    let snapshots: HashMap<String, WeatherSnapshot> = serde_json::from_str(snapshots_json)
        .map_err(|e| js_error("Invalid snapshots JSON", e))?;
    let generated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(generated_at)
        .map_err(|e| js_error("Invalid timestamp", e))?
        .with_timezone(&Utc);

    let registry = LocationRegistry::aysen();
    let outcomes = profile
        .locations(&registry)
        .iter()
        .map(|location| match snapshots.get(&location.name) {
            Some(snapshot) => LocationOutcome::evaluate(profile, location, snapshot),
            None => LocationOutcome::Unavailable {
                location: location.name.clone(),
                reason: "no snapshot supplied".to_string(),
            },
        })
        .collect();

    let response = alerts::finalize(profile, outcomes, &RegionProfile::default(), generated_at);
    to_json(&response)
}

/// Monitored glaciers, basins and settlements
#[wasm_bindgen]
pub fn registry() -> Result<String, JsValue> {
    to_json(&LocationRegistry::aysen())
}

/// Convert a raw score to a 0-100 risk index
#[wasm_bindgen]
pub fn to_risk_index(score: f64) -> u8 {
    risk_index(score)
}

/// Check a point before requesting data for it
#[wasm_bindgen]
pub fn is_valid_point(lat: f64, lon: f64) -> bool {
    validate_coordinates(lat, lon).is_ok()
}
