// Candidate classifiers, scaler and the serving predictor
pub mod ml;

// Offline model training and selection
pub mod training;
