//! JSON artifacts written by training and read by the service.
//!
//! Each file is an envelope around the serialized payload that records what
//! kind of object it holds, the crate version that wrote it and the feature
//! names it was fit against. Loading rejects the wrong kind and any feature
//! list that differs from the current schema.

use crate::application::ml::classifier::TrainedClassifier;
use crate::application::ml::scaler::FeatureScaler;
use crate::domain::errors::SerializationError;
use crate::domain::ml::feature_registry::feature_names;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const MODEL_KIND: &str = "model";
pub const SCALER_KIND: &str = "scaler";

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactEnvelope<T> {
    pub kind: String,
    pub crate_version: String,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub payload: T,
}

pub fn save_model(path: &Path, model: &TrainedClassifier) -> Result<(), SerializationError> {
    save_artifact(path, MODEL_KIND, model)
}

pub fn load_model(path: &Path) -> Result<TrainedClassifier, SerializationError> {
    load_artifact(path, MODEL_KIND)
}

pub fn save_scaler(path: &Path, scaler: &FeatureScaler) -> Result<(), SerializationError> {
    save_artifact(path, SCALER_KIND, scaler)
}

pub fn load_scaler(path: &Path) -> Result<FeatureScaler, SerializationError> {
    load_artifact(path, SCALER_KIND)
}

fn save_artifact<T: Serialize>(
    path: &Path,
    kind: &str,
    payload: &T,
) -> Result<(), SerializationError> {
    let write_err = |source| SerializationError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let envelope = ArtifactEnvelope {
        kind: kind.to_string(),
        crate_version: env!("CARGO_PKG_VERSION").to_string(),
        features: feature_names().map(str::to_string).collect(),
        created_at: Utc::now(),
        payload,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &envelope).map_err(|source| {
        SerializationError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(write_err)?;

    info!("Saved {} artifact to {:?}", kind, path);
    Ok(())
}

fn load_artifact<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T, SerializationError> {
    let decode_err = |source| SerializationError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| SerializationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: ArtifactEnvelope<serde_json::Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(decode_err)?;

    if envelope.kind != kind {
        return Err(SerializationError::WrongKind {
            path: path.to_path_buf(),
            expected: kind.to_string(),
            found: envelope.kind,
        });
    }

    let expected: Vec<&str> = feature_names().collect();
    if envelope.features != expected {
        return Err(SerializationError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: expected.join(", "),
            found: envelope.features.join(", "),
        });
    }

    serde_json::from_value(envelope.payload).map_err(decode_err)
}
