use super::feature_registry::FEATURE_COUNT;
use crate::domain::errors::DatasetError;

/// Labeled tabular data: one row of schema-ordered features per patient.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    rows: Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl LabeledDataset {
    /// Rows must be `FEATURE_COUNT` wide, labels in {0, 1}, both classes present.
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<u8>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        if rows.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != FEATURE_COUNT)
        {
            return Err(DatasetError::RowWidth {
                index,
                expected: FEATURE_COUNT,
                found: row.len(),
            });
        }
        if let Some((index, &label)) = labels.iter().enumerate().find(|(_, l)| **l > 1) {
            return Err(DatasetError::LabelOutOfRange { index, label });
        }

        let dataset = Self { rows, labels };
        let (negatives, positives) = dataset.class_counts();
        if negatives == 0 {
            return Err(DatasetError::SingleClass { label: 1 });
        }
        if positives == 0 {
            return Err(DatasetError::SingleClass { label: 0 });
        }
        Ok(dataset)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (count of label 0, count of label 1)
    pub fn class_counts(&self) -> (usize, usize) {
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        (self.labels.len() - positives, positives)
    }
}
