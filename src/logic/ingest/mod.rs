//! Batch Ingestion Orchestrator
//!
//! Drives normalize → score → emit → stage over one batch, in order.
//! Every staged write lives in the caller's open transaction; the first
//! error of any kind aborts the batch and the caller rolls everything
//! back. Partial commits are forbidden.

pub mod types;

pub use types::{BatchResult, RecordResult};

use chrono::Utc;
use rusqlite::Connection;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::logic::alerting;
use crate::logic::records::{normalize_log, normalize_traffic};
use crate::logic::scoring::AnomalyScorer;
use crate::store;

/// Validate the payload shape before touching any record.
fn batch_records<'a>(payload: &'a Value, expected: &str) -> CoreResult<&'a [Value]> {
    match payload.as_array() {
        Some(records) if !records.is_empty() => Ok(records),
        _ => Err(CoreError::InvalidPayload(format!(
            "expected a non-empty list of {}",
            expected
        ))),
    }
}

/// Run one traffic batch inside `conn`'s open transaction.
pub fn run_traffic_batch(
    conn: &Connection,
    scorer: &dyn AnomalyScorer,
    payload: &Value,
) -> CoreResult<BatchResult> {
    let records = batch_records(payload, "traffic records")?;

    let mut results = Vec::with_capacity(records.len());
    let mut alerts_generated = 0;

    for raw in records {
        let now = Utc::now();
        let mut record = normalize_traffic(raw, now)?;

        let verdict = scorer.score_traffic(&record);
        record.is_anomalous = verdict.is_anomalous;
        record.anomaly_score = verdict.score;
        record.anomaly_type = verdict.anomaly_type;

        let id = store::insert_traffic_record(conn, &record)?;

        if let Some(alert) = alerting::traffic_alert(&record, id, now) {
            store::insert_alert(conn, &alert)?;
            alerts_generated += 1;
        }

        results.push(RecordResult {
            id,
            is_anomalous: record.is_anomalous,
            anomaly_score: record.anomaly_score,
            anomaly_type: if record.is_anomalous {
                record.anomaly_type.clone()
            } else {
                None
            },
        });
    }

    Ok(summarize("traffic records", results, alerts_generated))
}

/// Run one log batch inside `conn`'s open transaction.
pub fn run_log_batch(
    conn: &Connection,
    scorer: &dyn AnomalyScorer,
    payload: &Value,
) -> CoreResult<BatchResult> {
    let records = batch_records(payload, "log entries")?;

    let mut results = Vec::with_capacity(records.len());
    let mut alerts_generated = 0;

    for raw in records {
        let now = Utc::now();
        let mut record = normalize_log(raw, now)?;

        let verdict = scorer.score_log(&record);
        record.is_anomalous = verdict.is_anomalous;
        record.anomaly_score = verdict.score;
        record.anomaly_type = verdict.anomaly_type;

        let id = store::insert_log_record(conn, &record)?;

        if let Some(alert) = alerting::log_alert(&record, id, now) {
            store::insert_alert(conn, &alert)?;
            alerts_generated += 1;
        }

        results.push(RecordResult {
            id,
            is_anomalous: record.is_anomalous,
            anomaly_score: record.anomaly_score,
            anomaly_type: if record.is_anomalous {
                record.anomaly_type.clone()
            } else {
                None
            },
        });
    }

    Ok(summarize("log entries", results, alerts_generated))
}

fn summarize(kind: &str, results: Vec<RecordResult>, alerts_generated: usize) -> BatchResult {
    let anomalous_count = results.iter().filter(|result| result.is_anomalous).count();
    BatchResult {
        message: format!("Analyzed {} {}", results.len(), kind),
        processed_count: results.len(),
        anomalous_count,
        alerts_generated,
        results,
    }
}

// ============================================================================
// TESTS
// ============================================================================
