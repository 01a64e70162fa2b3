//! Alert engine: rules, deduplication, regional aggregation and assembly
//!
//! Data flows one way: per-location snapshots are evaluated into candidates,
//! the candidates are deduplicated, a regional alert may be appended, and
//! the result is wrapped in an [`AlertResponse`].

mod dedup;
mod metrics;
mod profile;
mod regional;
mod response;
mod rules;

pub use dedup::deduplicate;
pub use metrics::{temperature_trend, trailing_sum, DerivedMetrics};
pub use profile::AlertProfile;
pub use regional::{aggregate_regional, regional_alert, REGIONAL_ALERT_ID};
pub use response::AlertResponse;
pub use rules::{evaluate_location, RuleGroup};

use chrono::{DateTime, Utc};

use crate::models::{AlertCandidate, Location, WeatherSnapshot};
use crate::types::RegionProfile;

/// Result of trying to evaluate one location
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Evaluated(Vec<AlertCandidate>),
    /// Weather could not be obtained; the location is skipped
    Unavailable { location: String, reason: String },
}

impl LocationOutcome {
    /// Evaluate `snapshot` for `location` under a profile's rule groups
    pub fn evaluate(profile: AlertProfile, location: &Location, snapshot: &WeatherSnapshot) -> Self {
        LocationOutcome::Evaluated(evaluate_location(
            location,
            snapshot,
            profile.rule_groups(),
        ))
    }
}

/// Run the post-evaluation pipeline for one request.
///
/// Candidates are concatenated in `outcomes` order, which callers keep equal
/// to the profile's location order so output is deterministic.
pub fn finalize(
    profile: AlertProfile,
    outcomes: Vec<LocationOutcome>,
    region: &RegionProfile,
    generated_at: DateTime<Utc>,
) -> AlertResponse {
    let mut candidates = Vec::new();
    let mut unavailable = Vec::new();
    for outcome in outcomes {
        match outcome {
            LocationOutcome::Evaluated(alerts) => candidates.extend(alerts),
            LocationOutcome::Unavailable { location, reason } => {
                tracing::warn!("No weather for {}: {}", location, reason);
                unavailable.push(location);
            }
        }
    }

    let mut alerts = deduplicate(candidates);
    if profile.aggregates_regionally() {
        alerts = aggregate_regional(alerts, region, generated_at);
    }

    AlertResponse::assemble(alerts, profile.source_label(), region, generated_at)
        .with_algorithms(profile.algorithm_names())
        .with_data_sources(profile.data_sources().iter().copied())
        .with_unavailable(unavailable)
}
