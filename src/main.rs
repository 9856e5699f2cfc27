//! NetSentry Core - Batch Runner Entry Point
//!
//! Feeds a JSON batch file through the engine against the configured
//! store, prints the batch report, then the current threat predictions.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use netsentry_core::store::SqliteStore;
use netsentry_core::{constants, AnalysisEngine, Caller, EngineConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (kind, path) = match args.as_slice() {
        [kind, path] if kind == "traffic" || kind == "logs" => (kind.clone(), PathBuf::from(path)),
        _ => {
            eprintln!("usage: netsentry-core <traffic|logs> <batch.json>");
            return ExitCode::FAILURE;
        }
    };

    let config = EngineConfig::from_env();
    let store = match SqliteStore::open(&config.database_path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            log::error!("failed to open store at {:?}: {}", config.database_path, err);
            return ExitCode::FAILURE;
        }
    };
    let engine = AnalysisEngine::new(store, &config);

    let payload = match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => value,
            Err(err) => {
                log::error!("{:?} is not valid JSON: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        Err(err) => {
            log::error!("failed to read {:?}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let caller = Caller {
        user_id: 0,
        username: "cli".to_string(),
    };

    let result = if kind == "traffic" {
        engine.ingest_traffic_batch(&caller, &payload)
    } else {
        engine.ingest_log_batch(&caller, &payload)
    };

    match result {
        Ok(batch) => println!("{}", serde_json::to_string_pretty(&batch).unwrap_or_default()),
        Err(err) => {
            log::error!("batch rejected: {}", err);
            return ExitCode::FAILURE;
        }
    }

    match engine.predict_threats(None) {
        Ok(report) => println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default()),
        Err(err) => log::error!("prediction failed: {}", err),
    }

    ExitCode::SUCCESS
}
