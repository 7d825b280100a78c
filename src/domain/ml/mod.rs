pub mod dataset;
pub mod feature_registry;
pub mod features;

pub use dataset::LabeledDataset;
pub use feature_registry::{FEATURE_COUNT, FEATURES, FeatureKind, FeatureSpec};
pub use features::FeatureVector;
