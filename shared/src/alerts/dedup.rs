//! Collapse alerts describing the same problem at the same place

use std::collections::HashMap;

use crate::models::{AlertCandidate, AlertKey};

/// Keep one alert per (location, type): the one with the strictly highest
/// risk index, the first one seen on ties. Output follows the order in which
/// each key first appeared.
pub fn deduplicate(candidates: Vec<AlertCandidate>) -> Vec<AlertCandidate> {
    let mut survivors: Vec<AlertCandidate> = Vec::with_capacity(candidates.len());
    let mut slots: HashMap<AlertKey, usize> = HashMap::new();

    for candidate in candidates {
        match slots.get(&candidate.key()) {
            Some(&slot) => {
                if candidate.risk_index > survivors[slot].risk_index {
                    survivors[slot] = candidate;
                }
            }
            None => {
                slots.insert(candidate.key(), survivors.len());
                survivors.push(candidate);
            }
        }
    }

    survivors
}
