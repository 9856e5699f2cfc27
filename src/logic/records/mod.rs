//! Canonical Records Module
//!
//! Typed traffic/log records and the normalizer that produces them from
//! raw ingested field maps.

pub mod normalize;
pub mod types;

pub use normalize::{normalize_log, normalize_traffic};
pub use types::{LogRecord, RecordOrigin, TrafficRecord};
