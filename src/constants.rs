//! Central Configuration Constants
//!
//! Single source of truth for analysis defaults. Thresholds that belong to
//! a specific rule set live next to that rule set under `logic/`.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "NetSentry";

/// Default database file
pub const DEFAULT_DB_FILE: &str = "netsentry.db";

/// Fixed trailing window scanned by the threat aggregator (days).
/// Distinct from the prediction horizon, which only labels the report.
pub const LOOKBACK_DAYS: i64 = 7;

/// Default prediction horizon label (hours)
pub const DEFAULT_HORIZON_HOURS: u32 = 24;

/// Maximum prediction horizon label (hours, 7 days)
pub const MAX_HORIZON_HOURS: u32 = 168;

/// Minimum anomaly score that materializes an alert.
/// Strictly greater-than: a score of exactly 0.7 does not alert.
pub const ALERT_SCORE_THRESHOLD: f64 = 0.7;

/// Scores above this make the alert High severity
pub const HIGH_SEVERITY_THRESHOLD: f64 = 0.9;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get database path from environment or use default
pub fn get_database_path() -> String {
    std::env::var("NETSENTRY_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string())
}
