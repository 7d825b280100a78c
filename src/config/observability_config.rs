//! Observability configuration parsing from environment variables.
//!
//! This module handles the stdout log format.

use std::env;
use std::str::FromStr;

/// Stdout log rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone, Default)]
pub struct ObservabilityEnvConfig {
    pub log_format: LogFormat,
    /// Raw `LOG_FORMAT` value that failed to parse. Read before the subscriber
    /// exists, so reporting it is left to the caller.
    pub rejected_log_format: Option<String>,
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(raw) => match raw.parse::<LogFormat>() {
                Ok(log_format) => Self {
                    log_format,
                    rejected_log_format: None,
                },
                Err(_) => Self {
                    log_format: LogFormat::Pretty,
                    rejected_log_format: Some(raw),
                },
            },
            Err(_) => Self::default(),
        }
    }

    /// Message to log once tracing is initialized, if `LOG_FORMAT` was rejected.
    pub fn fallback_warning(&self) -> Option<String> {
        self.rejected_log_format.as_ref().map(|raw| {
            format!(
                "Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'; falling back to pretty logs",
                raw
            )
        })
    }
}
