use super::classifier::Classifier;
use super::matrix::{ensure_binary, to_matrix};
use super::platt::PlattScaling;
use serde::{Deserialize, Serialize};
use smartcore::error::Failed;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::svm::Kernels;
use smartcore::svm::svc::{SVC, SVCParameters};

const C: f64 = 1.0;

/// RBF kernel machine exported from a fitted smartcore `SVC`.
///
/// The smartcore model borrows its parameters and cannot be reloaded, so the
/// support vectors, dual coefficients and bias are lifted out after fitting and
/// evaluated here: `f(x) = bias + sum_i dual_coef[i] * exp(-gamma * |x - sv_i|^2)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelSvmModel {
    support_vectors: Vec<Vec<f64>>,
    dual_coef: Vec<f64>,
    bias: f64,
    gamma: f64,
    classes: (u8, u8),
    platt: PlattScaling,
}

/// Fields of the serialized smartcore `SVC` that define its decision function.
#[derive(Deserialize)]
struct ExportedSvc {
    classes: Option<(u8, u8)>,
    instances: Option<Vec<Vec<f64>>>,
    w: Option<Vec<f64>>,
    b: Option<f64>,
}

impl KernelSvmModel {
    pub fn fit(rows: &[Vec<f64>], labels: &[u8], seed: u64) -> Result<Self, Failed> {
        ensure_binary(labels)?;
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        // The smartcore optimizer truncates each row to n_samples entries.
        if rows.len() < n_features {
            return Err(Failed::fit(&format!(
                "SVM needs at least {n_features} training rows, got {}",
                rows.len()
            )));
        }

        let gamma = scale_gamma(rows);
        let x = to_matrix(rows)?;
        let y = labels.to_vec();
        let params = SVCParameters::<f64, u8, DenseMatrix<f64>, Vec<u8>>::default()
            .with_c(C)
            .with_kernel(Kernels::rbf().with_gamma(gamma))
            .with_seed(Some(seed));
        let svc = SVC::fit(&x, &y, &params)?;

        let exported: ExportedSvc = serde_json::to_value(&svc)
            .and_then(serde_json::from_value)
            .map_err(|e| Failed::fit(&format!("Failed to export SVC: {e}")))?;
        let (Some(classes), Some(support_vectors), Some(dual_coef), Some(bias)) =
            (exported.classes, exported.instances, exported.w, exported.b)
        else {
            return Err(Failed::fit("fitted SVC is missing its decision function"));
        };

        let mut model = Self {
            support_vectors,
            dual_coef,
            bias,
            gamma,
            classes,
            platt: PlattScaling { a: 0.0, b: 0.0 },
        };

        let decision_values: Vec<f64> = rows.iter().map(|r| model.decision_value(r)).collect();
        let targets: Vec<u8> = labels
            .iter()
            .map(|&l| u8::from(l == model.classes.1))
            .collect();
        model.platt = PlattScaling::fit(&decision_values, &targets)?;
        Ok(model)
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    pub fn decision_value(&self, row: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, coef)| {
                let dist: f64 = sv.iter().zip(row).map(|(a, b)| (a - b) * (a - b)).sum();
                coef * (-self.gamma * dist).exp()
            })
            .sum::<f64>()
            + self.bias
    }

    fn check_width(&self, row: &[f64]) -> Result<(), Failed> {
        match self.support_vectors.first() {
            Some(sv) if sv.len() != row.len() => Err(Failed::predict(&format!(
                "Expected {} features, got {}",
                sv.len(),
                row.len()
            ))),
            _ => Ok(()),
        }
    }
}

/// `1 / (n_features * var(X))` over every entry of the training matrix.
pub fn scale_gamma(rows: &[Vec<f64>]) -> f64 {
    let n_features = rows.first().map(Vec::len).unwrap_or(0);
    let values: Vec<f64> = rows.iter().flatten().copied().collect();
    if values.is_empty() || n_features == 0 {
        return 1.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    if variance > 0.0 {
        1.0 / (n_features as f64 * variance)
    } else {
        1.0
    }
}

impl Classifier for KernelSvmModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed> {
        rows.iter()
            .map(|row| {
                self.check_width(row)?;
                Ok(if self.decision_value(row) > 0.0 {
                    self.classes.1
                } else {
                    self.classes.0
                })
            })
            .collect()
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed> {
        rows.iter()
            .map(|row| {
                self.check_width(row)?;
                let p_second = self.platt.probability(self.decision_value(row));
                // classes are sorted, so the second class is label 1
                Ok([1.0 - p_second, p_second])
            })
            .collect()
    }
}
