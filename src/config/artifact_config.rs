//! Artifact and audit-log locations from environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "heart_disease_model.json";
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";
pub const DEFAULT_PREDICTION_LOG_PATH: &str = "prediction_logs.log";

/// Artifact environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEnvConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub prediction_log_path: PathBuf,
}

impl Default for ArtifactEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            prediction_log_path: PathBuf::from(DEFAULT_PREDICTION_LOG_PATH),
        }
    }
}

impl ArtifactEnvConfig {
    pub fn from_env() -> Self {
        let path = |key: &str, default: &str| {
            env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            model_path: path("MODEL_PATH", DEFAULT_MODEL_PATH),
            scaler_path: path("SCALER_PATH", DEFAULT_SCALER_PATH),
            prediction_log_path: path("PREDICTION_LOG_PATH", DEFAULT_PREDICTION_LOG_PATH),
        }
    }
}
