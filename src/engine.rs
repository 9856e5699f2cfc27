//! Analysis Engine
//!
//! Façade over the pipeline: batch ingestion, threat prediction, alert
//! operations, and the dashboard summary. The HTTP layer and
//! authentication sit outside the core; callers arrive here already
//! authenticated and their identity is recorded for audit only.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::config::{EngineConfig, ScorerKind};
use crate::error::CoreResult;
use crate::logic::alerting::AlertStatistics;
use crate::logic::ingest::{self, BatchResult};
use crate::logic::prediction::{self, PredictionReport};
use crate::logic::scoring::{AnomalyScorer, ModelBackedScorer, RuleBasedScorer};
use crate::logic::status::{self, SummaryRange, SummaryReport};
use crate::store::SqliteStore;

/// Authenticated caller identity, supplied by the auth middleware in the
/// calling layer.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: i64,
    pub username: String,
}

/// The core engine. One instance per store; safe to share behind `Arc`.
pub struct AnalysisEngine {
    store: Arc<SqliteStore>,
    scorer: Box<dyn AnomalyScorer>,
}

impl AnalysisEngine {
    /// Build an engine over `store` with the configured scoring strategy.
    pub fn new(store: Arc<SqliteStore>, config: &EngineConfig) -> Self {
        let scorer: Box<dyn AnomalyScorer> = match config.scorer {
            ScorerKind::RuleBased => Box::new(RuleBasedScorer),
            ScorerKind::ModelBacked => Box::new(ModelBackedScorer::new()),
        };
        log::info!("analysis engine ready (scorer: {})", scorer.name());
        Self { store, scorer }
    }

    /// Score and persist one traffic batch atomically. Any failure rolls
    /// the whole batch back; nothing partial is ever visible to readers.
    pub fn ingest_traffic_batch(&self, caller: &Caller, payload: &Value) -> CoreResult<BatchResult> {
        let batch_id = Uuid::new_v4();
        log::info!("traffic batch {} submitted by {}", batch_id, caller.username);

        let result = self
            .store
            .transaction(|tx| ingest::run_traffic_batch(tx, self.scorer.as_ref(), payload));

        match &result {
            Ok(batch) => log::info!(
                "traffic batch {}: {} records, {} anomalous, {} alerts",
                batch_id,
                batch.processed_count,
                batch.anomalous_count,
                batch.alerts_generated
            ),
            Err(err) => log::warn!("traffic batch {} rolled back: {}", batch_id, err),
        }
        result
    }

    /// Score and persist one log batch atomically.
    pub fn ingest_log_batch(&self, caller: &Caller, payload: &Value) -> CoreResult<BatchResult> {
        let batch_id = Uuid::new_v4();
        log::info!("log batch {} submitted by {}", batch_id, caller.username);

        let result = self
            .store
            .transaction(|tx| ingest::run_log_batch(tx, self.scorer.as_ref(), payload));

        match &result {
            Ok(batch) => log::info!(
                "log batch {}: {} records, {} anomalous, {} alerts",
                batch_id,
                batch.processed_count,
                batch.anomalous_count,
                batch.alerts_generated
            ),
            Err(err) => log::warn!("log batch {} rolled back: {}", batch_id, err),
        }
        result
    }

    /// Aggregate the trailing week into threat predictions.
    /// `horizon_hours` labels the report period only.
    pub fn predict_threats(&self, horizon_hours: Option<&str>) -> CoreResult<PredictionReport> {
        let hours = prediction::parse_horizon(horizon_hours)?;
        prediction::predict(&self.store, hours, Utc::now())
    }

    /// Mark an alert resolved on behalf of `caller`.
    pub fn resolve_alert(&self, caller: &Caller, alert_id: i64) -> CoreResult<()> {
        self.store
            .resolve_alert(alert_id, caller.user_id, Utc::now())?;
        log::info!("alert {} resolved by {}", alert_id, caller.username);
        Ok(())
    }

    /// Alert totals and per-bucket counts.
    pub fn alert_statistics(&self) -> CoreResult<AlertStatistics> {
        self.store.alert_statistics()
    }

    /// Dashboard counts for one of the supported windows.
    pub fn summary(&self, time_range: &str) -> CoreResult<SummaryReport> {
        let range = SummaryRange::parse(time_range)?;
        status::summarize(&self.store, range, Utc::now())
    }
}

// ============================================================================
// TESTS
// ============================================================================
