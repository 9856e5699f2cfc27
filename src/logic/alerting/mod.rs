//! Alert Emitter
//!
//! Decides whether a scored record materializes an [`Alert`] and
//! synthesizes its title, description, and details payload. Emission is
//! pure; persistence happens in the orchestrator's transaction.

pub mod types;

pub use types::{Alert, AlertStatistics, Severity, SeverityCounts, SourceCounts, StatusCounts};

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::constants::ALERT_SCORE_THRESHOLD;
use crate::logic::records::{LogRecord, RecordOrigin, TrafficRecord};

/// An alert fires only for anomalous records scoring strictly above the
/// threshold; a score of exactly 0.7 does not alert.
fn crosses_threshold(is_anomalous: bool, score: f64) -> bool {
    is_anomalous && score > ALERT_SCORE_THRESHOLD
}

/// Build the alert for a scored traffic record, if it crosses the
/// threshold. `record_id` is the id the store assigned inside the open
/// transaction.
pub fn traffic_alert(record: &TrafficRecord, record_id: i64, now: DateTime<Utc>) -> Option<Alert> {
    if !crosses_threshold(record.is_anomalous, record.anomaly_score) {
        return None;
    }

    let anomaly_type = record.anomaly_type.as_deref().unwrap_or("Unknown");

    Some(Alert {
        id: None,
        title: format!("Network Anomaly Detected: {}", anomaly_type),
        description: format!(
            "Suspicious traffic detected from {} to {}",
            record.source_ip, record.destination_ip
        ),
        severity: Severity::from_score(record.anomaly_score),
        source: RecordOrigin::Network,
        is_resolved: false,
        resolved_by: None,
        details: json!({
            "traffic_id": record_id,
            "anomaly_score": record.anomaly_score,
            "anomaly_type": record.anomaly_type,
            "source_ip": record.source_ip,
            "destination_ip": record.destination_ip,
            "protocol": record.protocol,
            "timestamp": record.timestamp.to_rfc3339(),
        }),
        created_at: now,
        updated_at: None,
    })
}

/// Build the alert for a scored log record, if it crosses the threshold.
pub fn log_alert(record: &LogRecord, record_id: i64, now: DateTime<Utc>) -> Option<Alert> {
    if !crosses_threshold(record.is_anomalous, record.anomaly_score) {
        return None;
    }

    let anomaly_type = record.anomaly_type.as_deref().unwrap_or("Unknown");

    Some(Alert {
        id: None,
        title: format!("System Log Anomaly: {}", anomaly_type),
        description: format!(
            "Suspicious log entry detected from {} on {}",
            record.source.as_deref().unwrap_or("unknown"),
            record.host.as_deref().unwrap_or("unknown"),
        ),
        severity: Severity::from_score(record.anomaly_score),
        source: RecordOrigin::System,
        is_resolved: false,
        resolved_by: None,
        details: json!({
            "log_id": record_id,
            "anomaly_score": record.anomaly_score,
            "anomaly_type": record.anomaly_type,
            "message": record.message,
            "source": record.source,
            "host": record.host,
            "timestamp": record.timestamp.to_rfc3339(),
        }),
        created_at: now,
        updated_at: None,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scored_traffic(score: f64, anomaly_type: &str) -> TrafficRecord {
        TrafficRecord {
            id: None,
            source_ip: "10.0.0.1".to_string(),
            destination_ip: "192.168.1.5".to_string(),
            source_port: None,
            destination_port: Some(3389),
            protocol: Some("TCP".to_string()),
            packet_size: Some(20_000),
            timestamp: Utc::now(),
            is_anomalous: score > 0.0,
            anomaly_score: score,
            anomaly_type: Some(anomaly_type.to_string()),
            raw_data: "{}".to_string(),
        }
    }

    fn scored_log(score: f64) -> LogRecord {
        LogRecord {
            id: None,
            log_level: Some("WARNING".to_string()),
            source: Some("sshd".to_string()),
            message: "failed login from 203.0.113.9".to_string(),
            timestamp: Utc::now(),
            host: Some("web-01".to_string()),
            is_anomalous: score > 0.0,
            anomaly_score: score,
            anomaly_type: Some("Security Keyword Detected".to_string()),
            raw_data: "{}".to_string(),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let now = Utc::now();
        assert!(traffic_alert(&scored_traffic(0.7, "Suspicious Port Access"), 1, now).is_none());
        assert!(traffic_alert(&scored_traffic(0.8, "Large Packet Size"), 1, now).is_some());
    }

    #[test]
    fn test_severity_derivation() {
        let now = Utc::now();
        let medium = traffic_alert(&scored_traffic(0.8, "Large Packet Size"), 1, now).unwrap();
        assert_eq!(medium.severity, Severity::Medium);

        let high = traffic_alert(&scored_traffic(0.95, "Large Packet Size"), 1, now).unwrap();
        assert_eq!(high.severity, Severity::High);

        // 0.9 exactly stays medium
        assert_eq!(Severity::from_score(0.9), Severity::Medium);
    }

    #[test]
    fn test_traffic_alert_contents() {
        let alert = traffic_alert(&scored_traffic(0.8, "Large Packet Size"), 42, Utc::now()).unwrap();
        assert_eq!(alert.title, "Network Anomaly Detected: Large Packet Size");
        assert_eq!(alert.source, RecordOrigin::Network);
        assert!(!alert.is_resolved);
        assert_eq!(alert.details["traffic_id"], 42);
        assert_eq!(alert.details["source_ip"], "10.0.0.1");
    }

    #[test]
    fn test_log_alert_contents() {
        let alert = log_alert(&scored_log(0.8), 7, Utc::now()).unwrap();
        assert_eq!(alert.title, "System Log Anomaly: Security Keyword Detected");
        assert_eq!(alert.description, "Suspicious log entry detected from sshd on web-01");
        assert_eq!(alert.source, RecordOrigin::System);
        assert_eq!(alert.details["log_id"], 7);
    }

    #[test]
    fn test_missing_origin_fields_render_unknown() {
        let mut record = scored_log(0.8);
        record.source = None;
        record.host = None;
        let alert = log_alert(&record, 1, Utc::now()).unwrap();
        assert_eq!(alert.description, "Suspicious log entry detected from unknown on unknown");
    }
}
