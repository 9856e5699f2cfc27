//! Record Normalizer
//!
//! Turns a raw ingested field map into a canonical record. A missing
//! required field is fatal to the whole batch, not just the record;
//! the orchestrator rolls everything back.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use super::types::{LogRecord, TrafficRecord};
use crate::error::{CoreError, CoreResult};

/// Build an unscored [`TrafficRecord`] from a raw field map.
/// Required: `source_ip`, `destination_ip`.
pub fn normalize_traffic(raw: &Value, now: DateTime<Utc>) -> CoreResult<TrafficRecord> {
    Ok(TrafficRecord {
        id: None,
        source_ip: required_str(raw, "source_ip")?,
        destination_ip: required_str(raw, "destination_ip")?,
        source_port: optional_port(raw, "source_port"),
        destination_port: optional_port(raw, "destination_port"),
        protocol: optional_str(raw, "protocol"),
        packet_size: optional_u64(raw, "packet_size"),
        timestamp: record_timestamp(raw, now)?,
        is_anomalous: false,
        anomaly_score: 0.0,
        anomaly_type: None,
        raw_data: raw.to_string(),
    })
}

/// Build an unscored [`LogRecord`] from a raw field map.
/// Required: `message`.
pub fn normalize_log(raw: &Value, now: DateTime<Utc>) -> CoreResult<LogRecord> {
    Ok(LogRecord {
        id: None,
        log_level: optional_str(raw, "log_level"),
        source: optional_str(raw, "source"),
        message: required_str(raw, "message")?,
        timestamp: record_timestamp(raw, now)?,
        host: optional_str(raw, "host"),
        is_anomalous: false,
        anomaly_score: 0.0,
        anomaly_type: None,
        raw_data: raw.to_string(),
    })
}

fn required_str(raw: &Value, field: &str) -> CoreResult<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CoreError::MissingField(field.to_string()))
}

fn optional_str(raw: &Value, field: &str) -> Option<String> {
    raw.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Absent or non-integer values stay absent, never zero.
fn optional_u64(raw: &Value, field: &str) -> Option<u64> {
    raw.get(field).and_then(Value::as_u64)
}

fn optional_port(raw: &Value, field: &str) -> Option<u16> {
    raw.get(field)
        .and_then(Value::as_u64)
        .and_then(|port| u16::try_from(port).ok())
}

/// The record timestamp defaults to the ingestion instant; a present but
/// unparsable value is a format error, fatal to the batch.
fn record_timestamp(raw: &Value, now: DateTime<Utc>) -> CoreResult<DateTime<Utc>> {
    match raw.get("timestamp") {
        None | Some(Value::Null) => Ok(now),
        Some(Value::String(s)) => {
            parse_instant(s).ok_or_else(|| CoreError::TimestampFormat(s.clone()))
        }
        Some(other) => Err(CoreError::TimestampFormat(other.to_string())),
    }
}

/// RFC 3339, or a naive ISO-8601 instant assumed UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_traffic_defaults() {
        let now = Utc::now();
        let raw = json!({"source_ip": "10.0.0.1", "destination_ip": "10.0.0.2"});
        let record = normalize_traffic(&raw, now).unwrap();

        assert_eq!(record.source_ip, "10.0.0.1");
        assert_eq!(record.destination_port, None);
        assert_eq!(record.packet_size, None);
        assert_eq!(record.timestamp, now);
        assert!(!record.is_anomalous);
        assert_eq!(record.anomaly_score, 0.0);
    }

    #[test]
    fn test_traffic_missing_source_ip() {
        let raw = json!({"destination_ip": "10.0.0.2"});
        let err = normalize_traffic(&raw, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::MissingField(field) if field == "source_ip"));
    }

    #[test]
    fn test_log_missing_message() {
        let raw = json!({"host": "web-01", "log_level": "ERROR"});
        let err = normalize_log(&raw, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::MissingField(field) if field == "message"));
    }

    #[test]
    fn test_explicit_timestamp_parses() {
        let raw = json!({
            "source_ip": "10.0.0.1",
            "destination_ip": "10.0.0.2",
            "timestamp": "2026-08-01T12:30:00+00:00",
        });
        let record = normalize_traffic(&raw, Utc::now()).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2026-08-01T12:30:00+00:00");
    }

    #[test]
    fn test_naive_timestamp_assumed_utc() {
        let raw = json!({"message": "ok", "timestamp": "2026-08-01T12:30:00"});
        let record = normalize_log(&raw, Utc::now()).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2026-08-01T12:30:00+00:00");
    }

    #[test]
    fn test_bad_timestamp_is_format_error() {
        let raw = json!({"message": "ok", "timestamp": "yesterday"});
        let err = normalize_log(&raw, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::TimestampFormat(_)));
    }

    #[test]
    fn test_non_integer_port_stays_absent() {
        let raw = json!({
            "source_ip": "10.0.0.1",
            "destination_ip": "10.0.0.2",
            "destination_port": "not-a-port",
            "packet_size": -5,
        });
        let record = normalize_traffic(&raw, Utc::now()).unwrap();
        assert_eq!(record.destination_port, None);
        assert_eq!(record.packet_size, None);
    }

    #[test]
    fn test_raw_data_kept_verbatim() {
        let raw = json!({"message": "boot", "extra": {"k": 1}});
        let record = normalize_log(&raw, Utc::now()).unwrap();
        let round_trip: serde_json::Value = serde_json::from_str(&record.raw_data).unwrap();
        assert_eq!(round_trip, raw);
    }
}
