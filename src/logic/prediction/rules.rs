//! Threat Aggregation Thresholds
//!
//! Count thresholds and confidence caps for the two 7-day aggregation
//! passes. Levels and confidences are pure functions of the counts.

// ============================================================================
// NETWORK PASS (traffic grouped by source IP)
// ============================================================================

/// Anomalies from one IP before it becomes a prediction
pub const TRAFFIC_MIN_ANOMALIES: usize = 3;

/// Anomalies from one IP before the prediction is High
pub const TRAFFIC_HIGH_ANOMALIES: usize = 10;

/// Network confidence is count / divisor, capped
pub const TRAFFIC_CONFIDENCE_DIVISOR: f64 = 20.0;

/// Network confidence cap
pub const TRAFFIC_CONFIDENCE_CAP: f64 = 0.95;

/// Threat label on network predictions
pub const TRAFFIC_THREAT_TYPE: &str = "Suspicious Activity";

// ============================================================================
// SYSTEM PASS (logs grouped by host)
// ============================================================================

/// Anomalies from one host before it becomes a prediction
pub const LOG_MIN_ANOMALIES: usize = 5;

/// Anomalies from one host before the prediction is High
pub const LOG_HIGH_ANOMALIES: usize = 15;

/// System confidence is count / divisor, capped
pub const LOG_CONFIDENCE_DIVISOR: f64 = 30.0;

/// System confidence cap
pub const LOG_CONFIDENCE_CAP: f64 = 0.90;

/// Threat label on system predictions
pub const LOG_THREAT_TYPE: &str = "System Anomalies";
