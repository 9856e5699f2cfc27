//! SQLite Persistence
//!
//! The store is an opaque collaborator: inserts, range queries, and one
//! transaction per batch. Timestamps are stored as RFC 3339 text with a
//! fixed `+00:00` offset, so lexicographic range comparisons are correct.
//! A reader never observes a partially committed batch.

pub mod schema;

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::error::{CoreError, CoreResult};
use crate::logic::alerting::{
    Alert, AlertStatistics, Severity, SeverityCounts, SourceCounts, StatusCounts,
};
use crate::logic::records::{LogRecord, RecordOrigin, TrafficRecord};

/// SQLite-backed store shared by ingestion and aggregation
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and apply the schema.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Fully in-memory store, used by tests.
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> CoreResult<Self> {
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` inside one transaction. Ok commits every staged write;
    /// Err rolls all of them back before propagating.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&Transaction) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Aggregation queries (read-only)
    // ------------------------------------------------------------------

    /// `source_ip` of every anomalous traffic record in `[start, end]`,
    /// one entry per record.
    pub fn anomalous_traffic_sources(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT source_ip FROM traffic_records \
             WHERE is_anomalous = 1 AND timestamp >= ?1 AND timestamp <= ?2",
        )?;
        let rows = stmt.query_map(
            params![start.to_rfc3339(), end.to_rfc3339()],
            |row| row.get::<_, String>(0),
        )?;
        collect_rows(rows)
    }

    /// `host` of every anomalous log record in `[start, end]` that has
    /// one; hostless records cannot be attributed and are left out.
    pub fn anomalous_log_hosts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT host FROM log_records \
             WHERE is_anomalous = 1 AND host IS NOT NULL \
             AND timestamp >= ?1 AND timestamp <= ?2",
        )?;
        let rows = stmt.query_map(
            params![start.to_rfc3339(), end.to_rfc3339()],
            |row| row.get::<_, String>(0),
        )?;
        collect_rows(rows)
    }

    // ------------------------------------------------------------------
    // Alert operations
    // ------------------------------------------------------------------

    /// Flip an alert to resolved, stamping resolver and time. Stamps are
    /// set exactly once: resolving an already-resolved alert is a no-op.
    pub fn resolve_alert(
        &self,
        alert_id: i64,
        resolved_by: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        let conn = self.conn.lock();
        let existing: Option<bool> = conn
            .query_row(
                "SELECT is_resolved FROM alerts WHERE id = ?1",
                params![alert_id],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            None => Err(CoreError::NotFound(format!("alert {}", alert_id))),
            Some(true) => Ok(()),
            Some(false) => {
                conn.execute(
                    "UPDATE alerts SET is_resolved = 1, resolved_by = ?2, updated_at = ?3 \
                     WHERE id = ?1",
                    params![alert_id, resolved_by, now.to_rfc3339()],
                )?;
                Ok(())
            }
        }
    }

    /// Fetch one alert by id.
    pub fn get_alert(&self, alert_id: i64) -> CoreResult<Option<Alert>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT id, title, description, severity, source, is_resolved, resolved_by, \
                 details, created_at, updated_at FROM alerts WHERE id = ?1",
                params![alert_id],
                |row| {
                    Ok(AlertRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        severity: row.get(3)?,
                        source: row.get(4)?,
                        is_resolved: row.get(5)?,
                        resolved_by: row.get(6)?,
                        details: row.get(7)?,
                        created_at: row.get(8)?,
                        updated_at: row.get(9)?,
                    })
                },
            )
            .optional()?;

        row.map(AlertRow::into_alert).transpose()
    }

    /// Totals and per-bucket alert counts.
    pub fn alert_statistics(&self) -> CoreResult<AlertStatistics> {
        let conn = self.conn.lock();

        let by_severity = SeverityCounts {
            high: count_alerts_where(&conn, "severity = 'high'")?,
            medium: count_alerts_where(&conn, "severity = 'medium'")?,
        };
        let by_source = SourceCounts {
            network: count_alerts_where(&conn, "source = 'network'")?,
            system: count_alerts_where(&conn, "source = 'system'")?,
        };
        let by_status = StatusCounts {
            resolved: count_alerts_where(&conn, "is_resolved = 1")?,
            unresolved: count_alerts_where(&conn, "is_resolved = 0")?,
        };

        Ok(AlertStatistics {
            total_alerts: by_severity.high + by_severity.medium,
            by_severity,
            by_source,
            by_status,
        })
    }

    // ------------------------------------------------------------------
    // Summary counts
    // ------------------------------------------------------------------

    /// (high, medium) alert counts created at or after `start`.
    pub fn count_alerts_by_severity_since(&self, start: DateTime<Utc>) -> CoreResult<(i64, i64)> {
        let conn = self.conn.lock();
        let since = start.to_rfc3339();
        let high = conn.query_row(
            "SELECT COUNT(*) FROM alerts WHERE created_at >= ?1 AND severity = 'high'",
            params![since],
            |row| row.get(0),
        )?;
        let medium = conn.query_row(
            "SELECT COUNT(*) FROM alerts WHERE created_at >= ?1 AND severity = 'medium'",
            params![since],
            |row| row.get(0),
        )?;
        Ok((high, medium))
    }

    /// (total, anomalous) traffic records stamped at or after `start`.
    pub fn count_traffic_since(&self, start: DateTime<Utc>) -> CoreResult<(i64, i64)> {
        self.count_feed_since("traffic_records", start)
    }

    /// (total, anomalous) log records stamped at or after `start`.
    pub fn count_logs_since(&self, start: DateTime<Utc>) -> CoreResult<(i64, i64)> {
        self.count_feed_since("log_records", start)
    }

    fn count_feed_since(&self, table: &str, start: DateTime<Utc>) -> CoreResult<(i64, i64)> {
        let conn = self.conn.lock();
        let since = start.to_rfc3339();
        let total = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE timestamp >= ?1", table),
            params![since],
            |row| row.get(0),
        )?;
        let anomalous = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE timestamp >= ?1 AND is_anomalous = 1",
                table
            ),
            params![since],
            |row| row.get(0),
        )?;
        Ok((total, anomalous))
    }

    // ------------------------------------------------------------------
    // Plain counts
    // ------------------------------------------------------------------

    pub fn count_traffic_records(&self) -> CoreResult<i64> {
        self.count_all("traffic_records")
    }

    pub fn count_log_records(&self) -> CoreResult<i64> {
        self.count_all("log_records")
    }

    pub fn count_alerts(&self) -> CoreResult<i64> {
        self.count_all("alerts")
    }

    fn count_all(&self, table: &str) -> CoreResult<i64> {
        let conn = self.conn.lock();
        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

// ============================================================================
// TRANSACTIONAL INSERTS
// ============================================================================

/// Insert a scored traffic record, returning its id. Runs against the
/// orchestrator's open transaction.
pub fn insert_traffic_record(conn: &Connection, record: &TrafficRecord) -> CoreResult<i64> {
    conn.execute(
        "INSERT INTO traffic_records (source_ip, destination_ip, source_port, destination_port, \
         protocol, packet_size, timestamp, is_anomalous, anomaly_score, anomaly_type, raw_data) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.source_ip,
            record.destination_ip,
            record.source_port,
            record.destination_port,
            record.protocol,
            record.packet_size.map(|size| size as i64),
            record.timestamp.to_rfc3339(),
            record.is_anomalous,
            record.anomaly_score,
            record.anomaly_type,
            record.raw_data,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a scored log record, returning its id.
pub fn insert_log_record(conn: &Connection, record: &LogRecord) -> CoreResult<i64> {
    conn.execute(
        "INSERT INTO log_records (log_level, source, message, timestamp, host, \
         is_anomalous, anomaly_score, anomaly_type, raw_data) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.log_level,
            record.source,
            record.message,
            record.timestamp.to_rfc3339(),
            record.host,
            record.is_anomalous,
            record.anomaly_score,
            record.anomaly_type,
            record.raw_data,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a freshly emitted alert, returning its id.
pub fn insert_alert(conn: &Connection, alert: &Alert) -> CoreResult<i64> {
    conn.execute(
        "INSERT INTO alerts (title, description, severity, source, is_resolved, resolved_by, \
         details, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            alert.title,
            alert.description,
            alert.severity.as_str(),
            alert.source.as_str(),
            alert.is_resolved,
            alert.resolved_by,
            alert.details.to_string(),
            alert.created_at.to_rfc3339(),
            alert.updated_at.map(|at| at.to_rfc3339()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ============================================================================
// ROW MAPPING
// ============================================================================

struct AlertRow {
    id: i64,
    title: String,
    description: String,
    severity: String,
    source: String,
    is_resolved: bool,
    resolved_by: Option<i64>,
    details: Option<String>,
    created_at: String,
    updated_at: Option<String>,
}

impl AlertRow {
    fn into_alert(self) -> CoreResult<Alert> {
        let severity = Severity::parse(&self.severity)
            .ok_or_else(|| CoreError::Storage(format!("unknown severity: {}", self.severity)))?;
        let source = RecordOrigin::parse(&self.source)
            .ok_or_else(|| CoreError::Storage(format!("unknown alert source: {}", self.source)))?;
        let details = match self.details {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|err| CoreError::Storage(format!("corrupt alert details: {}", err)))?,
            None => serde_json::Value::Null,
        };

        Ok(Alert {
            id: Some(self.id),
            title: self.title,
            description: self.description,
            severity,
            source,
            is_resolved: self.is_resolved,
            resolved_by: self.resolved_by,
            details,
            created_at: parse_stored_instant(&self.created_at)?,
            updated_at: self
                .updated_at
                .as_deref()
                .map(parse_stored_instant)
                .transpose()?,
        })
    }
}

fn parse_stored_instant(raw: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| CoreError::Storage(format!("corrupt timestamp {}: {}", raw, err)))
}

fn collect_rows(
    rows: impl Iterator<Item = rusqlite::Result<String>>,
) -> CoreResult<Vec<String>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn count_alerts_where(conn: &Connection, predicate: &str) -> CoreResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM alerts WHERE {}", predicate);
    let count = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn anomalous_traffic(source_ip: &str, at: DateTime<Utc>) -> TrafficRecord {
        TrafficRecord {
            id: None,
            source_ip: source_ip.to_string(),
            destination_ip: "192.168.1.5".to_string(),
            source_port: None,
            destination_port: Some(3389),
            protocol: Some("TCP".to_string()),
            packet_size: Some(500),
            timestamp: at,
            is_anomalous: true,
            anomaly_score: 0.7,
            anomaly_type: Some("Suspicious Port Access".to_string()),
            raw_data: "{}".to_string(),
        }
    }

    fn sample_alert(severity: Severity) -> Alert {
        Alert {
            id: None,
            title: "Network Anomaly Detected: Large Packet Size".to_string(),
            description: "Suspicious traffic detected from 10.0.0.1 to 192.168.1.5".to_string(),
            severity,
            source: RecordOrigin::Network,
            is_resolved: false,
            resolved_by: None,
            details: json!({"traffic_id": 1}),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("test.db")).unwrap();
        assert_eq!(store.count_traffic_records().unwrap(), 0);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = SqliteStore::open_in_memory().unwrap();

        let result: CoreResult<()> = store.transaction(|tx| {
            insert_traffic_record(tx, &anomalous_traffic("10.0.0.5", Utc::now()))?;
            Err(CoreError::MissingField("source_ip".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.count_traffic_records().unwrap(), 0);
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let store = SqliteStore::open_in_memory().unwrap();

        store
            .transaction(|tx| {
                insert_traffic_record(tx, &anomalous_traffic("10.0.0.5", Utc::now()))?;
                insert_traffic_record(tx, &anomalous_traffic("10.0.0.6", Utc::now()))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(store.count_traffic_records().unwrap(), 2);
    }

    #[test]
    fn test_anomalous_sources_respect_window() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();

        store
            .transaction(|tx| {
                insert_traffic_record(tx, &anomalous_traffic("10.0.0.5", now))?;
                insert_traffic_record(
                    tx,
                    &anomalous_traffic("10.9.9.9", now - Duration::days(10)),
                )?;
                Ok(())
            })
            .unwrap();

        let sources = store
            .anomalous_traffic_sources(now - Duration::days(7), now)
            .unwrap();
        assert_eq!(sources, vec!["10.0.0.5".to_string()]);
    }

    #[test]
    fn test_resolve_alert_stamps_once() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .transaction(|tx| insert_alert(tx, &sample_alert(Severity::Medium)))
            .unwrap();

        let first = Utc::now();
        store.resolve_alert(id, 7, first).unwrap();

        let resolved = store.get_alert(id).unwrap().unwrap();
        assert!(resolved.is_resolved);
        assert_eq!(resolved.resolved_by, Some(7));
        let first_stamp = resolved.updated_at.unwrap();

        // Second resolve keeps the original stamps
        store.resolve_alert(id, 99, first + Duration::hours(1)).unwrap();
        let unchanged = store.get_alert(id).unwrap().unwrap();
        assert_eq!(unchanged.resolved_by, Some(7));
        assert_eq!(unchanged.updated_at, Some(first_stamp));
    }

    #[test]
    fn test_resolve_unknown_alert_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.resolve_alert(404, 1, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_alert_statistics_buckets() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .transaction(|tx| {
                insert_alert(tx, &sample_alert(Severity::Medium))?;
                insert_alert(tx, &sample_alert(Severity::High))?;
                let mut system = sample_alert(Severity::Medium);
                system.source = RecordOrigin::System;
                insert_alert(tx, &system)?;
                Ok(())
            })
            .unwrap();

        let stats = store.alert_statistics().unwrap();
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.by_severity.high, 1);
        assert_eq!(stats.by_severity.medium, 2);
        assert_eq!(stats.by_source.network, 2);
        assert_eq!(stats.by_source.system, 1);
        assert_eq!(stats.by_status.unresolved, 3);
    }

    #[test]
    fn test_alert_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let alert = sample_alert(Severity::Medium);
        let id = store.transaction(|tx| insert_alert(tx, &alert)).unwrap();

        let loaded = store.get_alert(id).unwrap().unwrap();
        assert_eq!(loaded.title, alert.title);
        assert_eq!(loaded.severity, Severity::Medium);
        assert_eq!(loaded.details["traffic_id"], 1);
        assert_eq!(loaded.updated_at, None);
    }
}
