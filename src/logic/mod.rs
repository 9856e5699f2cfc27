//! Logic Module - Analysis Pipeline Engines
//!
//! ## Structure
//! - `records` - Canonical records + normalizer
//! - `scoring` - Anomaly scorer strategies and rule sets
//! - `alerting` - Alert emission and alert types
//! - `ingest` - Batch orchestration (all-or-nothing)
//! - `prediction` - Trailing-week threat aggregation
//! - `status` - Dashboard summary

pub mod alerting;
pub mod ingest;
pub mod prediction;
pub mod records;
pub mod scoring;
pub mod status;
