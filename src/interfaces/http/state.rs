use crate::application::ml::RiskModel;
use crate::infrastructure::prediction_log::PredictionLog;
use std::sync::Arc;

/// Shared, read-only router state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn RiskModel>,
    pub prediction_log: Arc<dyn PredictionLog>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn RiskModel>, prediction_log: Arc<dyn PredictionLog>) -> Self {
        Self {
            predictor,
            prediction_log,
        }
    }
}
