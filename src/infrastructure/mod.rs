pub mod dataset;
pub mod observability;
pub mod persistence;
pub mod prediction_log;

pub use dataset::load_dataset;
pub use prediction_log::{
    FilePredictionLog, InMemoryPredictionLog, NoopPredictionLog, PredictionLog,
};
