//! Anomaly Scorer
//!
//! Deterministic, side-effect-free scoring of canonical records. The
//! strategy is injected at engine construction; there is no process-wide
//! model state.
//!
//! ## Structure
//! - `types`: the [`Verdict`] a scorer produces
//! - `rules`: keyword/port lists and rule scores (the contract)

pub mod rules;
pub mod types;

pub use types::Verdict;

use crate::logic::records::{LogRecord, TrafficRecord};
use rules::{
    ERROR_KEYWORDS, ERROR_KEYWORD_SCORE, ERROR_KEYWORD_TYPE, LARGE_PACKET_BYTES,
    LARGE_PACKET_SCORE, LARGE_PACKET_TYPE, SECURITY_KEYWORDS, SECURITY_KEYWORD_SCORE,
    SECURITY_KEYWORD_TYPE, SUSPICIOUS_PORTS, SUSPICIOUS_PORT_SCORE, SUSPICIOUS_PORT_TYPE,
};

// ============================================================================
// SCORER STRATEGY
// ============================================================================

/// Scoring strategy. Any drop-in replacement (rule-based today, learned
/// tomorrow) must reproduce the verdict contract in [`rules`].
pub trait AnomalyScorer: Send + Sync {
    fn score_traffic(&self, record: &TrafficRecord) -> Verdict;
    fn score_log(&self, record: &LogRecord) -> Verdict;

    /// Strategy name, for logs and reports
    fn name(&self) -> &'static str;
}

/// Evaluates the fixed traffic/log rule sets
#[derive(Debug, Default)]
pub struct RuleBasedScorer;

impl AnomalyScorer for RuleBasedScorer {
    fn score_traffic(&self, record: &TrafficRecord) -> Verdict {
        evaluate_traffic_rules(record)
    }

    fn score_log(&self, record: &LogRecord) -> Verdict {
        evaluate_log_rules(&record.message)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Reserved inference path. Until a model artifact is wired in, scoring
/// falls back to the rule set so verdicts stay within the contract.
#[derive(Debug, Default)]
pub struct ModelBackedScorer {
    fallback: RuleBasedScorer,
}

impl ModelBackedScorer {
    pub fn new() -> Self {
        log::warn!("model scorer: no model artifact configured, falling back to rules");
        Self {
            fallback: RuleBasedScorer,
        }
    }
}

impl AnomalyScorer for ModelBackedScorer {
    fn score_traffic(&self, record: &TrafficRecord) -> Verdict {
        self.fallback.score_traffic(record)
    }

    fn score_log(&self, record: &LogRecord) -> Verdict {
        self.fallback.score_log(record)
    }

    fn name(&self) -> &'static str {
        "model-fallback"
    }
}

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// Traffic rules evaluate sequentially and a later match overwrites an
/// earlier one, so a large packet on a suspicious port scores 0.8, not
/// 0.7. The overwrite order is observable and must not change.
pub fn evaluate_traffic_rules(record: &TrafficRecord) -> Verdict {
    let mut verdict = Verdict::clean();

    if let Some(port) = record.destination_port {
        if SUSPICIOUS_PORTS.contains(&port) {
            verdict = Verdict::flagged(SUSPICIOUS_PORT_SCORE, SUSPICIOUS_PORT_TYPE);
        }
    }

    if let Some(size) = record.packet_size {
        if size > LARGE_PACKET_BYTES {
            verdict = Verdict::flagged(LARGE_PACKET_SCORE, LARGE_PACKET_TYPE);
        }
    }

    verdict
}

/// Log rules in priority order; the first matching set short-circuits.
/// Matching is case-insensitive and substring-based, not tokenized.
pub fn evaluate_log_rules(message: &str) -> Verdict {
    let haystack = message.to_lowercase();

    if SECURITY_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        return Verdict::flagged(SECURITY_KEYWORD_SCORE, SECURITY_KEYWORD_TYPE);
    }

    if ERROR_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        return Verdict::flagged(ERROR_KEYWORD_SCORE, ERROR_KEYWORD_TYPE);
    }

    Verdict::clean()
}

// ============================================================================
// TESTS
// ============================================================================
