use super::classifier::Classifier;
use super::matrix::{ensure_binary, to_matrix};
use serde::{Deserialize, Serialize};
use smartcore::algorithm::neighbour::KNNAlgorithmName;
use smartcore::error::Failed;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::distance::euclidian::Euclidian;
use smartcore::neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters};

pub const DEFAULT_K: usize = 5;

type Inner = KNNClassifier<f64, u8, DenseMatrix<f64>, Vec<u8>, Euclidian<f64>>;

/// k-nearest-neighbours vote with uniform weights over a linear scan.
#[derive(Debug, Serialize, Deserialize)]
pub struct KnnModel {
    inner: Inner,
}

impl KnnModel {
    pub fn fit(rows: &[Vec<f64>], labels: &[u8]) -> Result<Self, Failed> {
        Self::fit_with_k(rows, labels, DEFAULT_K)
    }

    pub fn fit_with_k(rows: &[Vec<f64>], labels: &[u8], k: usize) -> Result<Self, Failed> {
        ensure_binary(labels)?;
        if rows.len() < k {
            return Err(Failed::fit(&format!(
                "KNN with k={k} needs at least {k} training rows, got {}",
                rows.len()
            )));
        }
        let x = to_matrix(rows)?;
        let y = labels.to_vec();
        let params = KNNClassifierParameters::default()
            .with_k(k)
            .with_algorithm(KNNAlgorithmName::LinearSearch);
        let inner = KNNClassifier::fit(&x, &y, params)?;
        Ok(Self { inner })
    }
}

impl Classifier for KnnModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed> {
        let x = to_matrix(rows)?;
        self.inner.predict(&x)
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed> {
        let x = to_matrix(rows)?;
        self.inner
            .predict_proba(&x)?
            .into_iter()
            .map(|p| match p.as_slice() {
                [p0, p1] => Ok([*p0, *p1]),
                _ => Err(Failed::predict("KNN model was not fitted on two classes")),
            })
            .collect()
    }
}
