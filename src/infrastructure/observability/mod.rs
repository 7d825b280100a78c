//! Observability for cardio-risk
//!
//! Structured logs only: `tracing` events written to stdout, either pretty or
//! as JSON lines. Prediction auditing lives in `infrastructure::prediction_log`.

pub mod logging;

pub use logging::init_tracing;
