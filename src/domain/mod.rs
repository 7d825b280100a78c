// Feature schema, feature vectors and datasets
pub mod ml;

// Prediction outcome types
pub mod prediction;

// Domain-specific error types
pub mod errors;
