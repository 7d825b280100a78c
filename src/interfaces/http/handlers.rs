use super::error::ApiError;
use super::state::AppState;
use super::types::{HealthResponse, PredictionResponse};
use crate::domain::errors::{PredictionError, ValidationError};
use crate::domain::ml::FeatureVector;
use crate::domain::prediction::format_timestamp;
use crate::infrastructure::prediction_log::PredictionRecord;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{error, info};

/// GET /health -- liveness probe; the model is always loaded once the server is up
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        model_loaded: true,
        timestamp: format_timestamp(&Utc::now()),
    })
}

/// POST /api/v1/predict
///
/// The body is read raw so that an empty body, malformed JSON and a non-object
/// value all surface as "No input data provided" rather than an extractor rejection.
pub async fn predict_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let payload = parse_payload(&body)?;

    match run_prediction(&state, &payload) {
        Ok(response) => Ok(Json(response)),
        Err(PredictionError::Validation(v)) => Err(ApiError::Validation(v)),
        Err(err) => {
            let message = err.to_string();
            error!("Prediction error: {}", message);
            state.prediction_log.record_failure(&message);
            Err(ApiError::Internal(message))
        }
    }
}

/// Accepts only a non-empty JSON object.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(ValidationError::NoInputData),
    }
}

fn run_prediction(
    state: &AppState,
    payload: &Map<String, Value>,
) -> Result<PredictionResponse, PredictionError> {
    let features = FeatureVector::from_json_object(payload)?;
    let result = state.predictor.predict(&features)?;

    let record = PredictionRecord::new(&features, &result);
    state.prediction_log.record_prediction(&record);
    info!(
        prediction = result.label,
        probability = result.probability,
        "Served prediction with {}",
        state.predictor.name()
    );

    Ok(PredictionResponse {
        prediction: result.label,
        risk_label: result.risk_label(),
        confidence: result.confidence_pct(),
        features_used: features.to_json_map(),
        timestamp: format_timestamp(&result.timestamp),
    })
}
