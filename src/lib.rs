//! NetSentry Analysis Core
//!
//! Ingests batches of network-traffic and system-log records, scores each
//! with an injectable anomaly scorer, raises alerts above a confidence
//! threshold, and aggregates the trailing week of anomalies into
//! forward-looking threat predictions per source.
//!
//! The HTTP layer, authentication, and record listing live in the calling
//! service; this crate is the decision core plus its SQLite store.
//!
//! ## Structure
//! - `logic::records` - canonical records + normalizer
//! - `logic::scoring` - scorer strategies and the rule sets
//! - `logic::alerting` - alert emission and alert types
//! - `logic::ingest` - batch orchestration (all-or-nothing)
//! - `logic::prediction` - trailing-week threat aggregation
//! - `logic::status` - dashboard summary
//! - `store` - SQLite persistence collaborator

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logic;
pub mod store;

pub use config::{EngineConfig, ScorerKind};
pub use engine::{AnalysisEngine, Caller};
pub use error::{CoreError, CoreResult};
