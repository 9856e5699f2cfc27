//! Threat Aggregator
//!
//! Groups anomalous history by origin over a fixed trailing 7-day window
//! and turns per-origin counts into predictions. The horizon parameter
//! labels the report period only; it never changes the scan window. That
//! asymmetry is inherited behavior and is kept deliberately.
//!
//! ## Structure
//! - `types`: [`ThreatPrediction`], [`PredictionReport`]
//! - `rules`: count thresholds and confidence caps

pub mod rules;
pub mod types;

pub use types::{PredictionReport, ThreatLevel, ThreatPrediction};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::constants::{DEFAULT_HORIZON_HOURS, LOOKBACK_DAYS, MAX_HORIZON_HOURS};
use crate::error::{CoreError, CoreResult};
use crate::logic::records::RecordOrigin;
use crate::store::SqliteStore;
use rules::{
    LOG_CONFIDENCE_CAP, LOG_CONFIDENCE_DIVISOR, LOG_HIGH_ANOMALIES, LOG_MIN_ANOMALIES,
    LOG_THREAT_TYPE, TRAFFIC_CONFIDENCE_CAP, TRAFFIC_CONFIDENCE_DIVISOR, TRAFFIC_HIGH_ANOMALIES,
    TRAFFIC_MIN_ANOMALIES, TRAFFIC_THREAT_TYPE,
};

/// Parse and clamp the horizon parameter. Only the report label depends
/// on it; out-of-grammar input is rejected before any query runs.
pub fn parse_horizon(raw: Option<&str>) -> CoreResult<u32> {
    let hours = match raw {
        None => DEFAULT_HORIZON_HOURS,
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| CoreError::ParameterFormat(format!("invalid horizon: {}", value)))?,
    };

    if hours == 0 {
        return Err(CoreError::ParameterFormat(
            "horizon must be at least 1 hour".to_string(),
        ));
    }

    Ok(hours.min(MAX_HORIZON_HOURS))
}

/// Run both aggregation passes over the trailing window and assemble the
/// report: network predictions first, then system, each group ordered by
/// descending count then target so repeated calls are reproducible.
pub fn predict(
    store: &SqliteStore,
    horizon_hours: u32,
    now: DateTime<Utc>,
) -> CoreResult<PredictionReport> {
    let window_start = now - Duration::days(LOOKBACK_DAYS);

    let sources = store.anomalous_traffic_sources(window_start, now)?;
    let mut predictions = network_predictions(tally(sources));

    let hosts = store.anomalous_log_hosts(window_start, now)?;
    predictions.extend(system_predictions(tally(hosts)));

    log::debug!(
        "threat aggregation: {} predictions over trailing {} days",
        predictions.len(),
        LOOKBACK_DAYS
    );

    Ok(PredictionReport {
        prediction_period: format!("Next {} hours", horizon_hours),
        predictions,
    })
}

/// Occurrences per origin key
fn tally(keys: Vec<String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn ranked(counts: HashMap<String, usize>, min_count: usize) -> Vec<(String, usize)> {
    let mut flagged: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .collect();
    flagged.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    flagged
}

fn network_predictions(counts: HashMap<String, usize>) -> Vec<ThreatPrediction> {
    ranked(counts, TRAFFIC_MIN_ANOMALIES)
        .into_iter()
        .map(|(ip, count)| ThreatPrediction {
            source: RecordOrigin::Network,
            target: ip.clone(),
            threat_type: TRAFFIC_THREAT_TYPE.to_string(),
            confidence: (count as f64 / TRAFFIC_CONFIDENCE_DIVISOR).min(TRAFFIC_CONFIDENCE_CAP),
            threat_level: if count >= TRAFFIC_HIGH_ANOMALIES {
                ThreatLevel::High
            } else {
                ThreatLevel::Medium
            },
            details: format!(
                "IP {} has shown {} anomalous activities in the past 7 days",
                ip, count
            ),
        })
        .collect()
}

fn system_predictions(counts: HashMap<String, usize>) -> Vec<ThreatPrediction> {
    ranked(counts, LOG_MIN_ANOMALIES)
        .into_iter()
        .map(|(host, count)| ThreatPrediction {
            source: RecordOrigin::System,
            target: host.clone(),
            threat_type: LOG_THREAT_TYPE.to_string(),
            confidence: (count as f64 / LOG_CONFIDENCE_DIVISOR).min(LOG_CONFIDENCE_CAP),
            threat_level: if count >= LOG_HIGH_ANOMALIES {
                ThreatLevel::High
            } else {
                ThreatLevel::Medium
            },
            details: format!(
                "Host {} has shown {} anomalous log entries in the past 7 days",
                host, count
            ),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
