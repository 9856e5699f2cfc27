//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants;

/// Scoring strategy selected at engine construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    /// Fixed rule sets (the default)
    RuleBased,
    /// Reserved inference path; falls back to rules until a model is wired in
    ModelBacked,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// SQLite database path
    pub database_path: PathBuf,

    /// Which scorer the engine is built with
    pub scorer: ScorerKind,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let scorer = match env::var("NETSENTRY_SCORER").as_deref() {
            Ok("model") => ScorerKind::ModelBacked,
            _ => ScorerKind::RuleBased,
        };

        Self {
            database_path: PathBuf::from(constants::get_database_path()),
            scorer,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(constants::DEFAULT_DB_FILE),
            scorer: ScorerKind::RuleBased,
        }
    }
}
