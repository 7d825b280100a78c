use super::feature_registry::{FEATURE_COUNT, FEATURES, missing_features};
use crate::domain::errors::{InferenceError, PredictionError, ValidationError};
use serde_json::{Map, Value};

/// The 13 clinical measurements of one patient, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Builds a vector from a JSON request payload.
    ///
    /// Every schema feature must be present (reported together, in schema order),
    /// then every value must coerce to a finite float.
    pub fn from_json_object(payload: &Map<String, Value>) -> Result<Self, PredictionError> {
        let missing = missing_features(payload);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFeatures(missing).into());
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (slot, feature) in values.iter_mut().zip(FEATURES.iter()) {
            let raw = &payload[feature.name];
            *slot = coerce_f64(raw).ok_or_else(|| InferenceError::NonNumericFeature {
                feature: feature.name,
                value: raw.to_string(),
            })?;
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURES
            .iter()
            .position(|f| f.name == name)
            .map(|idx| self.values[idx])
    }

    /// (name, value) pairs in schema order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURES.iter().map(|f| f.name).zip(self.values.iter().copied())
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        self.named()
            .map(|(name, value)| (name.to_string(), Value::from(value)))
            .collect()
    }
}

/// Lenient float coercion for request values.
/// Accepts numbers, booleans and numeric strings; rejects everything non-finite.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
            "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0,
            "ca": 0, "thal": 1
        })
    }

    #[test]
    fn test_from_json_object_orders_values() {
        let payload = sample_payload();
        let fv = FeatureVector::from_json_object(payload.as_object().unwrap()).unwrap();
        assert_eq!(fv.values()[0], 63.0);
        assert_eq!(fv.values()[9], 2.3);
        assert_eq!(fv.values()[12], 1.0);
        assert_eq!(fv.get("chol"), Some(233.0));
    }

    #[test]
    fn test_missing_feature_is_validation_error() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("thal");
        let err = FeatureVector::from_json_object(payload.as_object().unwrap()).unwrap_err();
        match err {
            PredictionError::Validation(ValidationError::MissingFeatures(missing)) => {
                assert_eq!(missing, vec!["thal"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_is_inference_error() {
        let mut payload = sample_payload();
        payload["chol"] = json!("high");
        let err = FeatureVector::from_json_object(payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Inference(InferenceError::NonNumericFeature { feature: "chol", .. })
        ));
        assert!(err.to_string().contains("chol"));
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&json!(2.5)), Some(2.5));
        assert_eq!(coerce_f64(&json!(" 63 ")), Some(63.0));
        assert_eq!(coerce_f64(&json!(true)), Some(1.0));
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!([1])), None);
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!("abc")), None);
    }

    #[test]
    fn test_json_map_roundtrip_names() {
        let fv = FeatureVector::from_values([1.0; FEATURE_COUNT]);
        let map = fv.to_json_map();
        assert_eq!(map.len(), FEATURE_COUNT);
        assert_eq!(map["oldpeak"], json!(1.0));
    }
}
