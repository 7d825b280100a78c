//! Stdout logging setup shared by the `server` and `train` binaries.

use crate::config::LogFormat;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Builds the env filter: `RUST_LOG` directives plus an `info` floor.
pub fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(Level::INFO.into())
}

/// Installs the global subscriber. Call once, at binary start.
///
/// `LogFormat::Json` emits one JSON object per event for log shippers,
/// `LogFormat::Pretty` the multi-line human format.
pub fn init_tracing(format: LogFormat) {
    let (pretty, json) = match format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_target(false).pretty()),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .json()
                    .flatten_event(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(pretty)
        .with(json)
        .init();
}
