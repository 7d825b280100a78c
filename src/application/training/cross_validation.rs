use crate::application::ml::classifier::{CandidateKind, Classifier, accuracy};
use crate::application::ml::matrix::take_rows;
use crate::application::ml::scaler::FeatureScaler;
use crate::domain::errors::TrainingError;
use tracing::debug;

/// Test-fold indices for stratified k-fold without shuffling.
///
/// Rows of each class are dealt to folds round-robin in input order, so every
/// fold holds roughly `1/k` of each class.
pub fn stratified_folds(labels: &[u8], k: usize) -> Result<Vec<Vec<usize>>, TrainingError> {
    if k < 2 {
        return Err(TrainingError::InvalidOptions {
            reason: format!("cross-validation needs at least 2 folds, got {k}"),
        });
    }
    for class in [0u8, 1u8] {
        let members = labels.iter().filter(|&&l| l == class).count();
        if members < k {
            return Err(TrainingError::InsufficientData {
                reason: format!("class {class} has {members} rows, fewer than {k} folds"),
            });
        }
    }

    let mut folds = vec![Vec::new(); k];
    let mut dealt = [0usize; 2];
    for (i, &label) in labels.iter().enumerate() {
        let slot = &mut dealt[usize::from(label.min(1))];
        folds[*slot % k].push(i);
        *slot += 1;
    }
    Ok(folds)
}

/// Mean held-out accuracy of `kind` over stratified folds. Every fold gets its
/// own scaler fitted on that fold's training rows.
pub fn cross_val_score(
    kind: CandidateKind,
    rows: &[Vec<f64>],
    labels: &[u8],
    k: usize,
    seed: u64,
) -> Result<f64, TrainingError> {
    let folds = stratified_folds(labels, k)?;
    let mut scores = Vec::with_capacity(k);

    for (fold, test_idx) in folds.iter().enumerate() {
        let mut in_test = vec![false; labels.len()];
        for &i in test_idx {
            in_test[i] = true;
        }
        let train_idx: Vec<usize> = (0..labels.len()).filter(|&i| !in_test[i]).collect();

        let scaler = FeatureScaler::fit(&take_rows(rows, &train_idx)).map_err(|e| {
            TrainingError::Scaling {
                reason: e.to_string(),
            }
        })?;
        let scale = |idx: &[usize]| {
            scaler
                .transform(&take_rows(rows, idx))
                .map_err(|e| TrainingError::Scaling {
                    reason: e.to_string(),
                })
        };
        let x_train = scale(train_idx.as_slice())?;
        let x_test = scale(test_idx.as_slice())?;
        let y_train = take_rows(labels, &train_idx);
        let y_test = take_rows(labels, test_idx);

        let model = kind
            .fit(&x_train, &y_train, seed)
            .map_err(|e| TrainingError::Fit {
                candidate: kind.display_name(),
                reason: format!("fold {fold}: {e}"),
            })?;
        let predicted = model
            .predict(&x_test)
            .map_err(|e| TrainingError::Evaluation {
                candidate: kind.display_name(),
                reason: format!("fold {fold}: {e}"),
            })?;
        let score = accuracy(&y_test, &predicted);
        debug!("{} fold {}: accuracy {:.4}", kind, fold, score);
        scores.push(score);
    }

    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_deal_each_class_round_robin() {
        let labels = vec![0, 1, 0, 1, 0, 1, 0, 0, 1, 1];
        let folds = stratified_folds(&labels, 2).unwrap();
        // class 0 at 0,2,4,6,7 -> folds 0,1,0,1,0; class 1 at 1,3,5,8,9 -> 0,1,0,1,0
        assert_eq!(folds[0], vec![0, 1, 4, 5, 7, 9]);
        assert_eq!(folds[1], vec![2, 3, 6, 8]);
    }

    #[test]
    fn test_folds_cover_every_row_once() {
        let labels: Vec<u8> = (0..53).map(|i| u8::from(i % 3 == 0)).collect();
        let folds = stratified_folds(&labels, 5).unwrap();
        let mut all: Vec<usize> = folds.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..53).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejects_too_few_members_per_class() {
        let labels = vec![0, 0, 0, 0, 0, 1, 1];
        assert!(matches!(
            stratified_folds(&labels, 5),
            Err(TrainingError::InsufficientData { .. })
        ));
        assert!(matches!(
            stratified_folds(&labels, 1),
            Err(TrainingError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_cross_val_score_on_separable_data() {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..25 {
            let d = i as f64 * 0.01;
            rows.push(vec![-1.0 - d, 10.0 + d]);
            labels.push(0);
            rows.push(vec![1.0 + d, 20.0 - d]);
            labels.push(1);
        }
        let score = cross_val_score(CandidateKind::Knn, &rows, &labels, 5, 42).unwrap();
        assert_eq!(score, 1.0);
    }
}
