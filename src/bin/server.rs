//! Cardio-risk Server - heart disease prediction API
//!
//! Loads the trained model and scaler once at startup, then serves
//! `GET /health` and `POST /api/v1/predict`. Startup aborts if either
//! artifact is missing or unreadable.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=heart_disease_model.json SCALER_PATH=scaler.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_BIND_ADDRESS` / `SERVER_PORT` - Listen address (default: 0.0.0.0:5000)
//! - `MODEL_PATH` / `SCALER_PATH` - Artifact locations
//! - `PREDICTION_LOG_PATH` - Append-only audit log (default: prediction_logs.log)
//! - `LOG_FORMAT` - `pretty` or `json` (default: pretty)

use anyhow::{Context, Result};
use cardio_risk::application::ml::SmartCoreRiskPredictor;
use cardio_risk::config::ServiceConfig;
use cardio_risk::infrastructure::FilePredictionLog;
use cardio_risk::infrastructure::observability::init_tracing;
use cardio_risk::interfaces::http::{AppState, serve};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    init_tracing(config.observability.log_format);
    if let Some(warning) = config.observability.fallback_warning() {
        warn!("{}", warning);
    }

    info!("Cardio-risk Server {} starting...", env!("CARGO_PKG_VERSION"));

    let predictor = SmartCoreRiskPredictor::load(
        &config.artifacts.model_path,
        &config.artifacts.scaler_path,
    )
    .context("Failed to load model artifacts")?;

    let prediction_log = FilePredictionLog::open(&config.artifacts.prediction_log_path)
        .with_context(|| {
            format!(
                "Failed to open prediction log {:?}",
                config.artifacts.prediction_log_path
            )
        })?;
    info!(
        "Prediction audit log: {:?}",
        config.artifacts.prediction_log_path
    );

    let state = AppState::new(Arc::new(predictor), Arc::new(prediction_log));
    let addr = config.http.socket_addr()?;

    serve(addr, state).await
}
