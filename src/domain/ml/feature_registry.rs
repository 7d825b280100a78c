use serde_json::{Map, Value};

/// Number of clinical features consumed by the model.
pub const FEATURE_COUNT: usize = 13;

/// Whether a feature is measured on a continuous scale or encodes a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Continuous,
    Categorical,
}

/// One entry of the feature schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    /// Name used by the HTTP API and in artifacts.
    pub name: &'static str,
    /// Column header used by the public `Heart_Disease_Prediction.csv` dataset.
    pub dataset_column: &'static str,
    pub kind: FeatureKind,
}

const fn spec(name: &'static str, dataset_column: &'static str, kind: FeatureKind) -> FeatureSpec {
    FeatureSpec {
        name,
        dataset_column,
        kind,
    }
}

/// Ordered feature schema.
/// This order MUST match the column order used when the scaler and model were fit.
/// Any change here is a breaking change for persisted artifacts.
pub static FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    spec("age", "Age", FeatureKind::Continuous),
    spec("sex", "Sex", FeatureKind::Categorical),
    spec("cp", "Chest pain type", FeatureKind::Categorical),
    spec("trestbps", "BP", FeatureKind::Continuous),
    spec("chol", "Cholesterol", FeatureKind::Continuous),
    spec("fbs", "FBS over 120", FeatureKind::Categorical),
    spec("restecg", "EKG results", FeatureKind::Categorical),
    spec("thalach", "Max HR", FeatureKind::Continuous),
    spec("exang", "Exercise angina", FeatureKind::Categorical),
    spec("oldpeak", "ST depression", FeatureKind::Continuous),
    spec("slope", "Slope of ST", FeatureKind::Categorical),
    spec("ca", "Number of vessels fluro", FeatureKind::Categorical),
    spec("thal", "Thallium", FeatureKind::Categorical),
];

/// Feature names in schema order.
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|f| f.name)
}

/// Schema position of a feature, by API name.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURES.iter().position(|f| f.name == name)
}

/// Returns the schema features absent from `payload`, in schema order.
pub fn missing_features(payload: &Map<String, Value>) -> Vec<&'static str> {
    feature_names()
        .filter(|name| !payload.contains_key(*name))
        .collect()
}

/// True when `header` names the given feature, either by API name or by dataset column.
/// Comparison ignores case and surrounding whitespace.
pub fn header_matches(feature: &FeatureSpec, header: &str) -> bool {
    let header = header.trim();
    header.eq_ignore_ascii_case(feature.name) || header.eq_ignore_ascii_case(feature.dataset_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_length() {
        assert_eq!(FEATURES.len(), FEATURE_COUNT);
        assert_eq!(feature_names().count(), FEATURE_COUNT);
    }

    #[test]
    fn test_schema_order() {
        let names: Vec<_> = feature_names().collect();
        assert_eq!(
            names,
            vec![
                "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang",
                "oldpeak", "slope", "ca", "thal"
            ]
        );
        assert_eq!(feature_index("age"), Some(0));
        assert_eq!(feature_index("thal"), Some(12));
        assert_eq!(feature_index("unknown"), None);
    }

    #[test]
    fn test_missing_features_in_schema_order() {
        let payload = json!({ "thal": 1, "age": 63, "chol": 233 });
        let missing = missing_features(payload.as_object().unwrap());
        assert_eq!(missing.len(), FEATURE_COUNT - 3);
        assert_eq!(missing[0], "sex");
        assert!(!missing.contains(&"thal"));
        assert_eq!(*missing.last().unwrap(), "ca");
    }

    #[test]
    fn test_header_matching() {
        let bp = FEATURES[3];
        assert!(header_matches(&bp, "BP"));
        assert!(header_matches(&bp, " trestbps "));
        assert!(header_matches(&bp, "bp"));
        assert!(!header_matches(&bp, "Cholesterol"));
    }
}
