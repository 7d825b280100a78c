use crate::domain::errors::TrainingError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices of a train/test partition, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified train/test split.
///
/// Indices of each class are shuffled with a single RNG seeded from `seed`,
/// then `round(n_class * test_size)` of them go to the test partition.
pub fn stratified_split(
    labels: &[u8],
    test_size: f64,
    seed: u64,
) -> Result<SplitIndices, TrainingError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TrainingError::InvalidOptions {
            reason: format!("test size must be in (0, 1), got {test_size}"),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        let n_test = (members.len() as f64 * test_size).round() as usize;
        if n_test == 0 || n_test >= members.len() {
            return Err(TrainingError::InsufficientData {
                reason: format!(
                    "class {class} has {} rows, too few for a {:.0}% test split",
                    members.len(),
                    test_size * 100.0
                ),
            });
        }
        members.shuffle(&mut rng);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(SplitIndices { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(neg: usize, pos: usize) -> Vec<u8> {
        // Interleave so class membership does not follow index order.
        let mut out = Vec::new();
        let (mut n, mut p) = (0, 0);
        while n < neg || p < pos {
            if n < neg {
                out.push(0);
                n += 1;
            }
            if p < pos {
                out.push(1);
                p += 1;
            }
        }
        out
    }

    #[test]
    fn test_preserves_class_proportions() {
        let y = labels(150, 120);
        let split = stratified_split(&y, 0.2, 42).unwrap();

        let test_pos = split.test.iter().filter(|&&i| y[i] == 1).count();
        let test_neg = split.test.len() - test_pos;
        assert_eq!(test_neg, 30);
        assert_eq!(test_pos, 24);
        assert_eq!(split.train.len(), 216);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let y = labels(40, 25);
        let split = stratified_split(&y, 0.2, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..y.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_seed_determinism() {
        let y = labels(50, 50);
        let a = stratified_split(&y, 0.2, 42).unwrap();
        let b = stratified_split(&y, 0.2, 42).unwrap();
        let c = stratified_split(&y, 0.2, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.test, c.test);
    }

    #[test]
    fn test_rejects_bad_test_size() {
        let y = labels(10, 10);
        assert!(matches!(
            stratified_split(&y, 0.0, 42),
            Err(TrainingError::InvalidOptions { .. })
        ));
        assert!(matches!(
            stratified_split(&y, 1.0, 42),
            Err(TrainingError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_rejects_class_too_small() {
        let y = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(matches!(
            stratified_split(&y, 0.2, 42),
            Err(TrainingError::InsufficientData { .. })
        ));
    }
}
