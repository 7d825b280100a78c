use super::classifier::Classifier;
use super::matrix::{ensure_binary, to_matrix};
use serde::{Deserialize, Serialize};
use smartcore::error::Failed;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

type Inner = LogisticRegression<f64, u8, DenseMatrix<f64>, Vec<u8>>;

/// L2 penalty strength; 1.0 is the usual C = 1 regularisation.
const ALPHA: f64 = 1.0;

/// Binary logistic regression fitted with L-BFGS and an L2 penalty.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogisticModel {
    inner: Inner,
}

impl LogisticModel {
    pub fn fit(rows: &[Vec<f64>], labels: &[u8]) -> Result<Self, Failed> {
        ensure_binary(labels)?;
        let x = to_matrix(rows)?;
        let y = labels.to_vec();
        let params = LogisticRegressionParameters::default().with_alpha(ALPHA);
        let inner = LogisticRegression::fit(&x, &y, params)?;
        Ok(Self { inner })
    }

    fn logit(&self, row: &[f64]) -> f64 {
        let coefficients = self.inner.coefficients();
        let intercept = *self.inner.intercept().get((0, 0));
        row.iter()
            .enumerate()
            .map(|(j, v)| v * *coefficients.get((0, j)))
            .sum::<f64>()
            + intercept
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed> {
        let x = to_matrix(rows)?;
        self.inner.predict(&x)
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed> {
        let (_, n_features) = self.inner.coefficients().shape();
        rows.iter()
            .map(|row| {
                if row.len() != n_features {
                    return Err(Failed::predict(&format!(
                        "Expected {n_features} features, got {}",
                        row.len()
                    )));
                }
                let p1 = sigmoid(self.logit(row));
                Ok([1.0 - p1, p1])
            })
            .collect()
    }
}
