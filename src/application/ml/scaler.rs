use super::matrix::{to_matrix, to_rows};
use serde::{Deserialize, Serialize};
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::error::Failed;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};

/// Standardizing transform (zero mean, unit variance per feature) captured at training time.
///
/// Columns that were constant in the training rows are only centred (unit scale);
/// smartcore would divide them by a near-zero std and blow any other value up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    n_features: usize,
    inner: StandardScaler<f64>,
    /// (column, training value) for every zero-variance column.
    #[serde(default)]
    constant_columns: Vec<(usize, f64)>,
}

impl FeatureScaler {
    /// Fits on the given rows only. Callers pass the training partition to avoid leakage.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, Failed> {
        let matrix = to_matrix(rows)?;
        let n_features = rows[0].len();
        let inner = StandardScaler::fit(&matrix, StandardScalerParameters::default())?;
        let constant_columns = (0..n_features)
            .filter_map(|j| {
                let first = rows[0][j];
                rows.iter().all(|r| r[j] == first).then_some((j, first))
            })
            .collect();
        Ok(Self {
            n_features,
            inner,
            constant_columns,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Indices of the columns that had zero variance at fit time.
    pub fn constant_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.constant_columns.iter().map(|&(j, _)| j)
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, Failed> {
        if let Some(bad) = rows.iter().find(|r| r.len() != self.n_features) {
            return Err(Failed::transform(&format!(
                "Expected {} features, got {}",
                self.n_features,
                bad.len()
            )));
        }
        let matrix = to_matrix(rows)?;
        let mut scaled = to_rows(&self.inner.transform(&matrix)?);
        for (raw, out) in rows.iter().zip(scaled.iter_mut()) {
            for &(j, center) in &self.constant_columns {
                out[j] = raw[j] - center;
            }
        }
        Ok(scaled)
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, Failed> {
        let mut scaled = self.transform(&[row.to_vec()])?;
        scaled
            .pop()
            .ok_or_else(|| Failed::transform("scaler returned no rows"))
    }
}
