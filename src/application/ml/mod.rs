pub mod classifier;
pub mod forest;
pub mod knn;
pub mod logistic;
pub mod matrix;
pub mod platt;
pub mod predictor;
pub mod scaler;
pub mod smartcore_predictor;
pub mod svm;

pub use classifier::{CandidateKind, Classifier, TrainedClassifier};
pub use predictor::RiskModel;
pub use scaler::FeatureScaler;
pub use smartcore_predictor::SmartCoreRiskPredictor;
