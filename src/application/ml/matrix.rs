use smartcore::error::Failed;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>, Failed> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
}

pub fn to_rows(matrix: &DenseMatrix<f64>) -> Vec<Vec<f64>> {
    let (n_rows, n_cols) = matrix.shape();
    (0..n_rows)
        .map(|i| (0..n_cols).map(|j| *matrix.get((i, j))).collect())
        .collect()
}

/// Selects the rows at `indices`, preserving the given order.
pub fn take_rows<T: Clone>(rows: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| rows[i].clone()).collect()
}

/// Requires both classes so every candidate sees a binary problem.
pub fn ensure_binary(labels: &[u8]) -> Result<(), Failed> {
    let has_negative = labels.contains(&0);
    let has_positive = labels.contains(&1);
    if !has_negative || !has_positive {
        return Err(Failed::fit("training labels must contain both classes 0 and 1"));
    }
    if labels.iter().any(|&l| l > 1) {
        return Err(Failed::fit("training labels must be 0 or 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_roundtrip() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let m = to_matrix(&rows).unwrap();
        assert_eq!(to_rows(&m), rows);
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert!(to_matrix(&[]).is_err());
    }

    #[test]
    fn test_take_rows() {
        let rows = vec!['a', 'b', 'c'];
        assert_eq!(take_rows(&rows, &[2, 0]), vec!['c', 'a']);
    }

    #[test]
    fn test_ensure_binary() {
        assert!(ensure_binary(&[0, 1, 1]).is_ok());
        assert!(ensure_binary(&[1, 1]).is_err());
        assert!(ensure_binary(&[0, 2, 1]).is_err());
    }
}
