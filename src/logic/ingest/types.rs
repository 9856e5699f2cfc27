//! Batch Ingestion Types

use serde::Serialize;

/// Per-record outcome in a batch response
#[derive(Debug, Clone, Serialize)]
pub struct RecordResult {
    pub id: i64,
    pub is_anomalous: bool,
    pub anomaly_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_type: Option<String>,
}

/// Summary returned by a successful batch ingestion
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub message: String,
    pub processed_count: usize,
    pub anomalous_count: usize,
    pub alerts_generated: usize,
    pub results: Vec<RecordResult>,
}
