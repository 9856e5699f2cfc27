//! Alert Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::HIGH_SEVERITY_THRESHOLD;
use crate::logic::records::RecordOrigin;

/// Alert severity, derived from the anomaly score; never set directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }

    /// High only above the high-severity threshold, Medium otherwise
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_SEVERITY_THRESHOLD {
            Severity::High
        } else {
            Severity::Medium
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A materialized security alert. Created only by the emitter during
/// ingestion; mutated only by the resolve operation, exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Store id, assigned on insert
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub source: RecordOrigin,
    pub is_resolved: bool,
    pub resolved_by: Option<i64>,
    /// Structured payload referencing the originating record
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Alert counts for the statistics report
#[derive(Debug, Clone, Serialize)]
pub struct AlertStatistics {
    pub total_alerts: i64,
    pub by_severity: SeverityCounts,
    pub by_source: SourceCounts,
    pub by_status: StatusCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeverityCounts {
    pub high: i64,
    pub medium: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceCounts {
    pub network: i64,
    pub system: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCounts {
    pub resolved: i64,
    pub unresolved: i64,
}
