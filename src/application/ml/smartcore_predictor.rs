use super::classifier::{Classifier, TrainedClassifier};
use super::predictor::RiskModel;
use super::scaler::FeatureScaler;
use crate::domain::errors::{InferenceError, SerializationError};
use crate::domain::ml::FeatureVector;
use crate::domain::prediction::PredictionResult;
use crate::infrastructure::persistence::artifacts;
use std::path::Path;
use tracing::info;

/// Serves a trained candidate together with the scaler fitted alongside it.
#[derive(Debug)]
pub struct SmartCoreRiskPredictor {
    model: TrainedClassifier,
    scaler: FeatureScaler,
}

impl SmartCoreRiskPredictor {
    pub fn new(model: TrainedClassifier, scaler: FeatureScaler) -> Self {
        Self { model, scaler }
    }

    /// Loads both artifacts. Any missing or corrupt file is an error; there is no
    /// neutral fallback model.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, SerializationError> {
        let model = artifacts::load_model(model_path)?;
        let scaler = artifacts::load_scaler(scaler_path)?;
        info!(
            "Loaded {} model from {:?} and scaler from {:?}",
            model.kind(),
            model_path,
            scaler_path
        );
        Ok(Self::new(model, scaler))
    }

    pub fn model(&self) -> &TrainedClassifier {
        &self.model
    }
}

impl RiskModel for SmartCoreRiskPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        let scaled = self
            .scaler
            .transform_row(features.values())
            .map_err(|e| InferenceError::Scaling {
                reason: e.to_string(),
            })?;
        let rows = [scaled];

        let label = self
            .model
            .predict(&rows)
            .map_err(|e| InferenceError::Model {
                reason: e.to_string(),
            })?
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Model {
                reason: "No prediction returned".to_string(),
            })?;

        let proba = self
            .model
            .predict_proba(&rows)
            .map_err(|e| InferenceError::Model {
                reason: e.to_string(),
            })?
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Model {
                reason: "No probability returned".to_string(),
            })?;

        Ok(PredictionResult::new(label, proba[usize::from(label)]))
    }

    fn name(&self) -> &str {
        self.model.kind().display_name()
    }
}
