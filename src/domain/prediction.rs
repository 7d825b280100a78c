use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Human-readable verdict derived from the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLabel {
    pub fn from_prediction(label: u8) -> Self {
        if label == 1 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::High => "High Risk",
            RiskLabel::Low => "Low Risk",
        }
    }
}

/// Outcome of a single inference. Derived per request, never stored by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Predicted class: 1 = disease present, 0 = absent.
    pub label: u8,
    /// Estimated probability of the predicted class, in [0, 1].
    pub probability: f64,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(label: u8, probability: f64) -> Self {
        Self {
            label,
            probability: probability.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        }
    }

    pub fn risk_label(&self) -> RiskLabel {
        RiskLabel::from_prediction(self.label)
    }

    /// Probability of the predicted class as a percentage, rounded to 2 decimals.
    pub fn confidence_pct(&self) -> f64 {
        round_to(self.probability * 100.0, 2)
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// RFC 3339 timestamp in UTC with microsecond precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
