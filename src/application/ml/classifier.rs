use super::forest::RandomForestModel;
use super::knn::KnnModel;
use super::logistic::LogisticModel;
use super::svm::KernelSvmModel;
use serde::{Deserialize, Serialize};
use smartcore::error::Failed;
use std::fmt;

/// Fit/predict contract shared by every candidate model.
///
/// Rows are already scaled. Labels are 0 (absent) or 1 (present).
pub trait Classifier {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed>;

    /// Per-row `[P(label = 0), P(label = 1)]`.
    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed>;
}

/// The fixed candidate set, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    LogisticRegression,
    RandomForest,
    Svm,
    Knn,
}

impl CandidateKind {
    pub const ALL: [CandidateKind; 4] = [
        CandidateKind::LogisticRegression,
        CandidateKind::RandomForest,
        CandidateKind::Svm,
        CandidateKind::Knn,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CandidateKind::LogisticRegression => "Logistic Regression",
            CandidateKind::RandomForest => "Random Forest",
            CandidateKind::Svm => "SVM",
            CandidateKind::Knn => "KNN",
        }
    }

    /// Fits a fresh model of this kind with its fixed hyperparameters.
    pub fn fit(&self, rows: &[Vec<f64>], labels: &[u8], seed: u64) -> Result<TrainedClassifier, Failed> {
        let model = match self {
            CandidateKind::LogisticRegression => {
                TrainedClassifier::LogisticRegression(LogisticModel::fit(rows, labels)?)
            }
            CandidateKind::RandomForest => {
                TrainedClassifier::RandomForest(RandomForestModel::fit(rows, labels, seed)?)
            }
            CandidateKind::Svm => TrainedClassifier::Svm(KernelSvmModel::fit(rows, labels, seed)?),
            CandidateKind::Knn => TrainedClassifier::Knn(KnnModel::fit(rows, labels)?),
        };
        Ok(model)
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A fitted candidate, as persisted in the model artifact.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model")]
pub enum TrainedClassifier {
    LogisticRegression(LogisticModel),
    RandomForest(RandomForestModel),
    Svm(KernelSvmModel),
    Knn(KnnModel),
}

impl TrainedClassifier {
    pub fn kind(&self) -> CandidateKind {
        match self {
            TrainedClassifier::LogisticRegression(_) => CandidateKind::LogisticRegression,
            TrainedClassifier::RandomForest(_) => CandidateKind::RandomForest,
            TrainedClassifier::Svm(_) => CandidateKind::Svm,
            TrainedClassifier::Knn(_) => CandidateKind::Knn,
        }
    }

    fn as_classifier(&self) -> &dyn Classifier {
        match self {
            TrainedClassifier::LogisticRegression(m) => m,
            TrainedClassifier::RandomForest(m) => m,
            TrainedClassifier::Svm(m) => m,
            TrainedClassifier::Knn(m) => m,
        }
    }
}

impl Classifier for TrainedClassifier {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed> {
        self.as_classifier().predict(rows)
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed> {
        self.as_classifier().predict_proba(rows)
    }
}

/// Fraction of labels matching predictions.
pub fn accuracy(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    smartcore::metrics::accuracy(&actual.to_vec(), &predicted.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well separated clusters around -2 and +2 on every axis.
    pub(crate) fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let jitter = (i as f64) * 0.05;
            rows.push(vec![-2.0 + jitter, -2.0 - jitter, -1.5 + jitter]);
            labels.push(0);
            rows.push(vec![2.0 - jitter, 2.0 + jitter, 1.5 - jitter]);
            labels.push(1);
        }
        (rows, labels)
    }

    #[test]
    fn test_every_candidate_separates_clusters() {
        let (rows, labels) = separable_data();
        for kind in CandidateKind::ALL {
            let model = kind.fit(&rows, &labels, 42).unwrap();
            assert_eq!(model.kind(), kind);

            let probe = vec![vec![-2.0, -2.0, -1.5], vec![2.0, 2.0, 1.5]];
            let predicted = model.predict(&probe).unwrap();
            assert_eq!(predicted, vec![0, 1], "{kind} misclassified a cluster centre");

            for proba in model.predict_proba(&probe).unwrap() {
                assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
                assert!((0.0..=1.0).contains(&proba[1]));
            }
        }
    }

    #[test]
    fn test_trained_classifier_serde_roundtrip() {
        let (rows, labels) = separable_data();
        let model = CandidateKind::LogisticRegression.fit(&rows, &labels, 42).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"kind\":\"LogisticRegression\""));

        let restored: TrainedClassifier = serde_json::from_str(&json).unwrap();
        assert_eq!(
            model.predict_proba(&rows).unwrap(),
            restored.predict_proba(&rows).unwrap()
        );
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<_> = CandidateKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["Logistic Regression", "Random Forest", "SVM", "KNN"]
        );
    }
}
