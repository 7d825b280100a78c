// Offline training pipeline: split, scale, fit candidates, select, report
pub mod cross_validation;
pub mod report;
pub mod selection;
pub mod split;

use crate::application::ml::classifier::{CandidateKind, Classifier, TrainedClassifier};
use crate::application::ml::matrix::take_rows;
use crate::application::ml::scaler::FeatureScaler;
use crate::domain::errors::TrainingError;
use crate::domain::ml::LabeledDataset;
use report::ClassificationReport;
use selection::{EvaluationData, evaluate_candidates, select_best};
use split::stratified_split;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub test_size: f64,
    pub seed: u64,
    pub cv_folds: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            cv_folds: 5,
        }
    }
}

/// Held-out and cross-validated scores of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub kind: CandidateKind,
    pub accuracy: f64,
    pub cv_score: f64,
}

/// The selected model, the scaler it was trained behind, and the audit numbers.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: TrainedClassifier,
    pub scaler: FeatureScaler,
    pub selected: CandidateScore,
    pub scores: Vec<CandidateScore>,
    pub report: ClassificationReport,
}

/// Runs the full pipeline on a labeled dataset and returns the winning (model, scaler) pair.
pub fn train_and_select(
    dataset: &LabeledDataset,
    options: &TrainingOptions,
) -> Result<TrainingOutcome, TrainingError> {
    let split = stratified_split(dataset.labels(), options.test_size, options.seed)?;
    info!(
        "Split {} rows into {} train / {} test",
        dataset.len(),
        split.train.len(),
        split.test.len()
    );

    let raw_train = take_rows(dataset.rows(), &split.train);
    let raw_test = take_rows(dataset.rows(), &split.test);
    let y_train = take_rows(dataset.labels(), &split.train);
    let y_test = take_rows(dataset.labels(), &split.test);

    // Scaler sees the training partition only.
    let scaler = FeatureScaler::fit(&raw_train).map_err(|e| TrainingError::Scaling {
        reason: e.to_string(),
    })?;
    let scale = |rows: &[Vec<f64>]| {
        scaler.transform(rows).map_err(|e| TrainingError::Scaling {
            reason: e.to_string(),
        })
    };
    let x_train = scale(raw_train.as_slice())?;
    let x_test = scale(raw_test.as_slice())?;

    let data = EvaluationData {
        x_train: &x_train,
        y_train: &y_train,
        x_test: &x_test,
        y_test: &y_test,
        cv_rows: dataset.rows(),
        cv_labels: dataset.labels(),
    };
    let evaluations = evaluate_candidates(&data, options.cv_folds, options.seed)?;
    let scores: Vec<CandidateScore> = evaluations
        .iter()
        .map(|e| CandidateScore {
            kind: e.kind,
            accuracy: e.accuracy,
            cv_score: e.cv_score,
        })
        .collect();

    let best = select_best(evaluations)?;
    info!(
        "Best Model Selected: {} with Accuracy: {:.4}",
        best.kind, best.accuracy
    );

    let predicted = best
        .model
        .predict(&x_test)
        .map_err(|e| TrainingError::Evaluation {
            candidate: best.kind.display_name(),
            reason: e.to_string(),
        })?;
    let report = ClassificationReport::new(&y_test, &predicted);

    Ok(TrainingOutcome {
        selected: CandidateScore {
            kind: best.kind,
            accuracy: best.accuracy,
            cv_score: best.cv_score,
        },
        model: best.model,
        scaler,
        scores,
        report,
    })
}
