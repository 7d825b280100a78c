use std::path::PathBuf;
use thiserror::Error;

/// Request payload problems, reported back to the caller as client errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("No input data provided")]
    NoInputData,

    #[error("Missing required features: {}", .0.join(", "))]
    MissingFeatures(Vec<&'static str>),
}

/// Failures while turning a validated payload into a prediction.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("could not convert feature '{feature}' to float: {value}")]
    NonNumericFeature {
        feature: &'static str,
        value: String,
    },

    #[error("feature scaling failed: {reason}")]
    Scaling { reason: String },

    #[error("model prediction failed: {reason}")]
    Model { reason: String },
}

/// Errors reading, writing or validating persisted artifacts.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode artifact {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode artifact {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} holds a {found} artifact, expected {expected}")]
    WrongKind {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("artifact {path} was fit against features [{found}], expected [{expected}]")]
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Anything that can go wrong while serving a single prediction request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Errors loading the labeled training dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no target column (expected one of: {expected})")]
    MissingTarget { expected: String },

    #[error("dataset has no column for feature '{feature}' (expected '{feature}' or '{column}')")]
    MissingFeature {
        feature: &'static str,
        column: &'static str,
    },

    #[error("row {row}: target value '{value}' cannot be mapped to 0/1")]
    InvalidTarget { row: usize, value: String },

    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset contains no rows")]
    Empty,

    #[error("dataset has {rows} rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("row index {index} has {found} features, expected {expected}")]
    RowWidth {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("row index {index} has label {label}; labels must be 0 or 1")]
    LabelOutOfRange { index: usize, label: u8 },

    #[error("dataset contains a single class ({label}); both classes are required")]
    SingleClass { label: u8 },
}

/// Errors raised by the offline training pipeline.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("invalid training options: {reason}")]
    InvalidOptions { reason: String },

    #[error("not enough samples: {reason}")]
    InsufficientData { reason: String },

    #[error("feature scaling failed: {reason}")]
    Scaling { reason: String },

    #[error("fitting {candidate} failed: {reason}")]
    Fit {
        candidate: &'static str,
        reason: String,
    },

    #[error("evaluating {candidate} failed: {reason}")]
    Evaluation {
        candidate: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::NoInputData.to_string(),
            "No input data provided"
        );
        let missing = ValidationError::MissingFeatures(vec!["ca", "thal"]);
        assert_eq!(missing.to_string(), "Missing required features: ca, thal");
    }

    #[test]
    fn test_prediction_error_is_transparent() {
        let err: PredictionError = InferenceError::NonNumericFeature {
            feature: "age",
            value: "\"old\"".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "could not convert feature 'age' to float: \"old\""
        );
    }

    #[test]
    fn test_dataset_error_formatting() {
        let err = DatasetError::InvalidTarget {
            row: 7,
            value: "Maybe".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("Maybe"));
    }
}
