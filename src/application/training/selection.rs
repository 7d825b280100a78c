use super::cross_validation::cross_val_score;
use crate::application::ml::classifier::{CandidateKind, Classifier, TrainedClassifier, accuracy};
use crate::domain::errors::TrainingError;
use rayon::prelude::*;
use tracing::{info, warn};

/// One fitted candidate with its held-out and cross-validated scores.
#[derive(Debug)]
pub struct CandidateEvaluation {
    pub kind: CandidateKind,
    pub model: TrainedClassifier,
    pub accuracy: f64,
    pub cv_score: f64,
}

/// Scaled partitions plus the raw full dataset used for cross-validation.
pub struct EvaluationData<'a> {
    pub x_train: &'a [Vec<f64>],
    pub y_train: &'a [u8],
    pub x_test: &'a [Vec<f64>],
    pub y_test: &'a [u8],
    pub cv_rows: &'a [Vec<f64>],
    pub cv_labels: &'a [u8],
}

/// Fits and scores every candidate. Runs in parallel; results keep candidate order.
pub fn evaluate_candidates(
    data: &EvaluationData<'_>,
    cv_folds: usize,
    seed: u64,
) -> Result<Vec<CandidateEvaluation>, TrainingError> {
    CandidateKind::ALL
        .par_iter()
        .map(|&kind| evaluate_candidate(kind, data, cv_folds, seed))
        .collect()
}

fn evaluate_candidate(
    kind: CandidateKind,
    data: &EvaluationData<'_>,
    cv_folds: usize,
    seed: u64,
) -> Result<CandidateEvaluation, TrainingError> {
    let model = kind
        .fit(data.x_train, data.y_train, seed)
        .map_err(|e| TrainingError::Fit {
            candidate: kind.display_name(),
            reason: e.to_string(),
        })?;
    let predicted = model
        .predict(data.x_test)
        .map_err(|e| TrainingError::Evaluation {
            candidate: kind.display_name(),
            reason: e.to_string(),
        })?;
    let accuracy = accuracy(data.y_test, &predicted);
    let cv_score = cross_val_score(kind, data.cv_rows, data.cv_labels, cv_folds, seed)?;

    info!("{} Accuracy: {:.2}, CV Score: {:.2}", kind, accuracy, cv_score);
    Ok(CandidateEvaluation {
        kind,
        model,
        accuracy,
        cv_score,
    })
}

/// Index of the highest score and whether a later candidate tied it.
/// The first candidate in order wins ties.
pub fn best_index(scores: &[f64]) -> Option<(usize, bool)> {
    let mut best: Option<usize> = None;
    let mut tied = false;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) if score > scores[b] => {
                best = Some(i);
                tied = false;
            }
            Some(b) if score == scores[b] => tied = true,
            Some(_) => {}
        }
    }
    best.map(|b| (b, tied))
}

/// Picks the candidate with the highest held-out accuracy.
pub fn select_best(
    mut evaluations: Vec<CandidateEvaluation>,
) -> Result<CandidateEvaluation, TrainingError> {
    let scores: Vec<f64> = evaluations.iter().map(|e| e.accuracy).collect();
    let (index, tied) = best_index(&scores).ok_or_else(|| TrainingError::InsufficientData {
        reason: "no candidate was evaluated".to_string(),
    })?;
    let best = evaluations.swap_remove(index);
    if tied {
        let others: Vec<&str> = evaluations
            .iter()
            .filter(|e| e.accuracy == best.accuracy)
            .map(|e| e.kind.display_name())
            .collect();
        warn!(
            "{} ties on held-out accuracy {:.4} with [{}]; keeping the first in evaluation order",
            best.kind,
            best.accuracy,
            others.join(", ")
        );
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_index_picks_highest() {
        assert_eq!(best_index(&[0.7, 0.9, 0.8]), Some((1, false)));
    }

    #[test]
    fn test_best_index_first_wins_ties() {
        assert_eq!(best_index(&[0.8, 0.9, 0.9, 0.5]), Some((1, true)));
        assert_eq!(best_index(&[0.9, 0.9]), Some((0, true)));
    }

    #[test]
    fn test_tie_flag_resets_on_new_best() {
        assert_eq!(best_index(&[0.5, 0.5, 0.6]), Some((2, false)));
    }

    #[test]
    fn test_best_index_empty() {
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_evaluate_candidates_keeps_order() {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            let d = i as f64 * 0.02;
            rows.push(vec![-1.5 + d, -1.0 - d]);
            labels.push(0);
            rows.push(vec![1.5 - d, 1.0 + d]);
            labels.push(1);
        }
        let data = EvaluationData {
            x_train: &rows[..40],
            y_train: &labels[..40],
            x_test: &rows[40..],
            y_test: &labels[40..],
            cv_rows: &rows,
            cv_labels: &labels,
        };
        let evaluations = evaluate_candidates(&data, 5, 42).unwrap();
        let kinds: Vec<_> = evaluations.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, CandidateKind::ALL.to_vec());

        let best = select_best(evaluations).unwrap();
        // All candidates separate the clusters perfectly, so the first wins.
        assert_eq!(best.kind, CandidateKind::LogisticRegression);
        assert_eq!(best.accuracy, 1.0);
    }
}
