// Model and scaler artifacts on disk
pub mod artifacts;

pub use artifacts::{load_model, load_scaler, save_model, save_scaler};
