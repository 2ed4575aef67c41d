//! Keyword-driven random vitals series, kept apart from the model.
//!
//! Nothing here touches the ODE model. The randomness is request-local so a
//! seeded request always reproduces the same series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::LegacyConfig;
use crate::error::PhysioError;

pub const KNOWN_EVENTS: [&str; 4] = ["stroke", "hemorrhage", "hypertension", "seizure"];

const VALUE_MIN: u32 = 60;
const VALUE_MAX: u32 = 180;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyRequest {
    pub event: Option<String>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacySeries {
    pub requested_event: Option<String>,
    pub matched_event: &'static str,
    pub values: Vec<u32>,
}

/// Known event appearing earliest in the lowercased text.
pub fn match_event(text: &str) -> Option<&'static str> {
    let text = text.trim().to_lowercase();
    KNOWN_EVENTS
        .iter()
        .filter_map(|&k| text.find(k).map(|pos| (pos, k)))
        .min_by_key(|&(pos, _)| pos)
        .map(|(_, k)| k)
}

pub fn generate(req: &LegacyRequest, cfg: &LegacyConfig) -> Result<LegacySeries, PhysioError> {
    let samples = req.samples.unwrap_or(cfg.default_samples);
    if samples == 0 || samples > cfg.max_samples {
        return Err(PhysioError::InvalidLegacyRequest(format!(
            "samples must be in 1..={}, got {samples}",
            cfg.max_samples
        )));
    }

    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let matched_event = match req.event.as_deref().and_then(match_event) {
        Some(k) => k,
        None => KNOWN_EVENTS[rng.gen_range(0..KNOWN_EVENTS.len())],
    };
    let values = (0..samples).map(|_| rng.gen_range(VALUE_MIN..=VALUE_MAX)).collect();

    Ok(LegacySeries {
        requested_event: req.event.clone(),
        matched_event,
        values,
    })
}
