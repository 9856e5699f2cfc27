//! Dashboard Summary
//!
//! Read-only counts over a bounded window for the overview screen.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::store::SqliteStore;

/// Supported summary windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRange {
    Day,
    Week,
    Month,
}

impl SummaryRange {
    /// Parse the `time_range` query value ("24h", "7d", "30d")
    pub fn parse(raw: &str) -> CoreResult<Self> {
        match raw {
            "24h" => Ok(SummaryRange::Day),
            "7d" => Ok(SummaryRange::Week),
            "30d" => Ok(SummaryRange::Month),
            other => Err(CoreError::ParameterFormat(format!(
                "invalid time range: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryRange::Day => "24h",
            SummaryRange::Week => "7d",
            SummaryRange::Month => "30d",
        }
    }

    fn duration(self) -> Duration {
        match self {
            SummaryRange::Day => Duration::hours(24),
            SummaryRange::Week => Duration::days(7),
            SummaryRange::Month => Duration::days(30),
        }
    }
}

/// Dashboard counts for one window
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub time_range: String,
    pub alerts: AlertCounts,
    pub traffic: FeedCounts,
    pub logs: FeedCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertCounts {
    pub total: i64,
    pub high: i64,
    pub medium: i64,
}

/// Total vs anomalous rows seen in the window
#[derive(Debug, Clone, Serialize)]
pub struct FeedCounts {
    pub total: i64,
    pub anomalous: i64,
}

/// Assemble the summary for `range` ending at `now`.
pub fn summarize(
    store: &SqliteStore,
    range: SummaryRange,
    now: DateTime<Utc>,
) -> CoreResult<SummaryReport> {
    let start = now - range.duration();

    let (high, medium) = store.count_alerts_by_severity_since(start)?;
    let (traffic_total, traffic_anomalous) = store.count_traffic_since(start)?;
    let (log_total, log_anomalous) = store.count_logs_since(start)?;

    Ok(SummaryReport {
        time_range: range.as_str().to_string(),
        alerts: AlertCounts {
            total: high + medium,
            high,
            medium,
        },
        traffic: FeedCounts {
            total: traffic_total,
            anomalous: traffic_anomalous,
        },
        logs: FeedCounts {
            total: log_total,
            anomalous: log_anomalous,
        },
    })
}
