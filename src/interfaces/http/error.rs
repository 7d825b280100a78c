use super::types::ErrorBody;
use crate::domain::errors::{PredictionError, ValidationError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error surface of the HTTP API.
///
/// Validation problems are client errors with structured detail; every other
/// failure is a 500 carrying the underlying message.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(ValidationError::NoInputData) => ErrorBody {
                error: "No input data provided".to_string(),
                missing_features: None,
                details: None,
            },
            ApiError::Validation(ValidationError::MissingFeatures(missing)) => ErrorBody {
                error: "Missing required features".to_string(),
                missing_features: Some(missing.iter().map(|s| s.to_string()).collect()),
                details: None,
            },
            ApiError::Internal(details) => ErrorBody {
                error: "Internal Server Error".to_string(),
                missing_features: None,
                details: Some(details.clone()),
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::Validation(v) => ApiError::Validation(v),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
