//! Canonical Record Types
//!
//! Data structures only; normalization logic lives in `normalize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a record, and anything derived from it, originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    Network,
    System,
}

impl RecordOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOrigin::Network => "network",
            RecordOrigin::System => "system",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "network" => Some(RecordOrigin::Network),
            "system" => Some(RecordOrigin::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One network flow observation with its analysis verdict.
/// Immutable once scored; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRecord {
    /// Store id, assigned on insert
    pub id: Option<i64>,
    pub source_ip: String,
    pub destination_ip: String,
    pub source_port: Option<u16>,
    pub destination_port: Option<u16>,
    pub protocol: Option<String>,
    pub packet_size: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub is_anomalous: bool,
    /// Normalized confidence in [0.0, 1.0]
    pub anomaly_score: f64,
    pub anomaly_type: Option<String>,
    /// Verbatim submitted JSON, kept for audit
    pub raw_data: String,
}

/// One system log entry with its analysis verdict. Same lifecycle as
/// [`TrafficRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Option<i64>,
    pub log_level: Option<String>,
    pub source: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub host: Option<String>,
    pub is_anomalous: bool,
    pub anomaly_score: f64,
    pub anomaly_type: Option<String>,
    pub raw_data: String,
}
