//! Scoring Types

use serde::{Deserialize, Serialize};

/// Outcome of scoring one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_anomalous: bool,
    /// Normalized confidence in [0.0, 1.0]
    pub score: f64,
    pub anomaly_type: Option<String>,
}

impl Verdict {
    /// A clean record: not anomalous, zero score, no label
    pub fn clean() -> Self {
        Self {
            is_anomalous: false,
            score: 0.0,
            anomaly_type: None,
        }
    }

    /// An anomalous record flagged by one rule
    pub fn flagged(score: f64, anomaly_type: &str) -> Self {
        Self {
            is_anomalous: true,
            score,
            anomaly_type: Some(anomaly_type.to_string()),
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::clean()
    }
}
