//! Database Schema
//!
//! Applied at store open; every statement is idempotent.

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS traffic_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_ip TEXT NOT NULL,
    destination_ip TEXT NOT NULL,
    source_port INTEGER,
    destination_port INTEGER,
    protocol TEXT,
    packet_size INTEGER,
    timestamp TEXT NOT NULL,
    is_anomalous INTEGER NOT NULL DEFAULT 0,
    anomaly_score REAL NOT NULL DEFAULT 0.0,
    anomaly_type TEXT,
    raw_data TEXT
);

CREATE INDEX IF NOT EXISTS idx_traffic_timestamp ON traffic_records(timestamp);

CREATE TABLE IF NOT EXISTS log_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    log_level TEXT,
    source TEXT,
    message TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    host TEXT,
    is_anomalous INTEGER NOT NULL DEFAULT 0,
    anomaly_score REAL NOT NULL DEFAULT 0.0,
    anomaly_type TEXT,
    raw_data TEXT
);

CREATE INDEX IF NOT EXISTS idx_log_timestamp ON log_records(timestamp);

CREATE TABLE IF NOT EXISTS alerts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    severity TEXT NOT NULL,
    source TEXT NOT NULL,
    is_resolved INTEGER NOT NULL DEFAULT 0,
    resolved_by INTEGER,
    details TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_alerts_created ON alerts(created_at);
";
