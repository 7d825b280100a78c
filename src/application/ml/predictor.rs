use crate::domain::errors::InferenceError;
use crate::domain::ml::FeatureVector;
use crate::domain::prediction::PredictionResult;

/// Interface for heart-disease risk models served over HTTP
pub trait RiskModel: Send + Sync {
    /// Classify one patient. The returned probability is that of the predicted class.
    fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, InferenceError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
