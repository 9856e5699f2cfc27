//! Threat Prediction Types

use serde::Serialize;

use crate::logic::records::RecordOrigin;

/// Coarse threat bucket derived from anomaly counts over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Medium,
    High,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A forward-looking threat report entry. Ephemeral: regenerated on each
/// aggregation call, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatPrediction {
    pub source: RecordOrigin,
    /// IP address (network) or host identifier (system)
    pub target: String,
    pub threat_type: String,
    pub confidence: f64,
    pub threat_level: ThreatLevel,
    pub details: String,
}

/// Response of one prediction call
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    /// Display label only; the scan window is fixed regardless
    pub prediction_period: String,
    pub predictions: Vec<ThreatPrediction>,
}
