use super::classifier::Classifier;
use super::matrix::{ensure_binary, to_matrix};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::error::Failed;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub const DEFAULT_N_TREES: usize = 300;

type Tree = RandomForestClassifier<f64, u8, DenseMatrix<f64>, Vec<u8>>;

/// Bagged decision trees. Each member is a one-tree smartcore forest with its own seed,
/// so the vote fraction gives a class probability.
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomForestModel {
    trees: Vec<Tree>,
}

impl RandomForestModel {
    pub fn fit(rows: &[Vec<f64>], labels: &[u8], seed: u64) -> Result<Self, Failed> {
        Self::fit_with_trees(rows, labels, seed, DEFAULT_N_TREES)
    }

    pub fn fit_with_trees(
        rows: &[Vec<f64>],
        labels: &[u8],
        seed: u64,
        n_trees: usize,
    ) -> Result<Self, Failed> {
        ensure_binary(labels)?;
        if n_trees == 0 {
            return Err(Failed::fit("random forest needs at least one tree"));
        }
        let x = to_matrix(rows)?;
        let y = labels.to_vec();
        let trees = (0..n_trees as u64)
            .map(|i| {
                let params = RandomForestClassifierParameters::default()
                    .with_n_trees(1)
                    .with_seed(seed.wrapping_add(i));
                RandomForestClassifier::fit(&x, &y, params)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForestModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>, Failed> {
        Ok(self
            .predict_proba(rows)?
            .into_iter()
            .map(|p| u8::from(p[1] > 0.5))
            .collect())
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>, Failed> {
        let x = to_matrix(rows)?;
        let mut positive_votes = vec![0usize; rows.len()];
        for tree in &self.trees {
            for (votes, label) in positive_votes.iter_mut().zip(tree.predict(&x)?) {
                if label == 1 {
                    *votes += 1;
                }
            }
        }
        let n_trees = self.trees.len() as f64;
        Ok(positive_votes
            .into_iter()
            .map(|votes| {
                let p1 = votes as f64 / n_trees;
                [1.0 - p1, p1]
            })
            .collect())
    }
}
