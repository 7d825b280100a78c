//! Append-only audit trail of served predictions.

use crate::domain::ml::FeatureVector;
use crate::domain::prediction::{PredictionResult, format_timestamp};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use uuid::Uuid;

/// One successful prediction as written to the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub input: Map<String, Value>,
    pub prediction: u8,
    pub probability: f64,
    pub timestamp: String,
}

impl PredictionRecord {
    pub fn new(features: &FeatureVector, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            input: features.to_json_map(),
            prediction: result.label,
            probability: result.probability,
            timestamp: format_timestamp(&result.timestamp),
        }
    }
}

/// Sink for audit events. Implementations never fail the caller.
pub trait PredictionLog: Send + Sync {
    fn record_prediction(&self, record: &PredictionRecord);
    fn record_failure(&self, message: &str);
}

/// Text log, one line per event:
/// `<timestamp> - INFO - <json record>` or `<timestamp> - ERROR - Prediction error: <message>`.
pub struct FilePredictionLog {
    path: PathBuf,
    file: Mutex<RollingFileAppender>,
}

impl FilePredictionLog {
    /// Opens `path` in append mode, creating it (and its directory) if absent.
    /// The file is never rotated, so its name stays exactly `path`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("prediction log path {path:?} has no file name"),
            )
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name.to_string_lossy())
            .build(dir)
            .map_err(io::Error::other)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(appender),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, level: &str, message: &str) {
        let line = format!(
            "{} - {} - {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            message
        );
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            error!("Failed to write prediction log {:?}: {}", self.path, e);
        }
    }
}

impl PredictionLog for FilePredictionLog {
    fn record_prediction(&self, record: &PredictionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.append_line("INFO", &json),
            Err(e) => error!("Failed to serialize prediction record: {}", e),
        }
    }

    fn record_failure(&self, message: &str) {
        self.append_line("ERROR", &format!("Prediction error: {message}"));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuditEntry {
    Prediction(PredictionRecord),
    Failure(String),
}

/// Keeps audit events in memory; used by tests and embedding callers.
#[derive(Default)]
pub struct InMemoryPredictionLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryPredictionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, entry: AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

impl PredictionLog for InMemoryPredictionLog {
    fn record_prediction(&self, record: &PredictionRecord) {
        self.push(AuditEntry::Prediction(record.clone()));
    }

    fn record_failure(&self, message: &str) {
        self.push(AuditEntry::Failure(message.to_string()));
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPredictionLog;

impl PredictionLog for NoopPredictionLog {
    fn record_prediction(&self, _record: &PredictionRecord) {}

    fn record_failure(&self, _message: &str) {}
}
