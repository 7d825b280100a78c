//! HTTP listener configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// HTTP environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEnvConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for HttpEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl HttpEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let bind_address = env::var("SERVER_BIND_ADDRESS").unwrap_or(defaults.bind_address);
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Failed to parse SERVER_PORT: {raw:?}"))?,
            Err(_) => defaults.port,
        };
        Ok(Self { bind_address, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.bind_address, self.port))
    }
}
