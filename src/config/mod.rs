//! Configuration module for cardio-risk.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: HTTP listener, artifacts, and Observability.
//! The `train` binary takes its options from the command line instead.

mod artifact_config;
mod http_config;
mod observability_config;

pub use artifact_config::{
    ArtifactEnvConfig, DEFAULT_MODEL_PATH, DEFAULT_PREDICTION_LOG_PATH, DEFAULT_SCALER_PATH,
};
pub use http_config::HttpEnvConfig;
pub use observability_config::{LogFormat, ObservabilityEnvConfig};

use anyhow::{Context, Result};

/// Inference service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub http: HttpEnvConfig,
    pub artifacts: ArtifactEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let http = HttpEnvConfig::from_env().context("Failed to load HTTP config")?;
        let artifacts = ArtifactEnvConfig::from_env();
        let observability = ObservabilityEnvConfig::from_env();

        Ok(Self {
            http,
            artifacts,
            observability,
        })
    }
}
