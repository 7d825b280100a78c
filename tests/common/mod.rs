#![allow(dead_code)]

use cardio_risk::application::ml::knn::KnnModel;
use cardio_risk::application::ml::{FeatureScaler, TrainedClassifier};
use cardio_risk::infrastructure::persistence::{save_model, save_scaler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

pub const KAGGLE_HEADER: &str = "Age,Sex,Chest pain type,BP,Cholesterol,FBS over 120,EKG results,Max HR,Exercise angina,ST depression,Slope of ST,Number of vessels fluro,Thallium,Heart Disease";

/// The reference patient used across the API scenarios.
pub const SCENARIO: [f64; 13] = [
    63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0,
];

pub fn scenario_payload() -> Value {
    json!({
        "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
        "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0,
        "ca": 0, "thal": 1
    })
}

/// Fresh directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cardio-risk-{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Rows for a fixed KNN artifact: six copies of the scenario patient labeled 1,
/// four patients that differ from it in every feature labeled 0. With k = 5 the
/// scenario patient's neighbourhood is all positive.
pub fn knn_training_rows() -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut rows = vec![SCENARIO.to_vec(); 6];
    let mut labels = vec![1u8; 6];
    for i in 0..4 {
        let offset = 10.0 * (i as f64 + 1.0);
        rows.push(
            SCENARIO
                .iter()
                .enumerate()
                .map(|(j, v)| v + offset + j as f64)
                .collect(),
        );
        labels.push(0);
    }
    (rows, labels)
}

/// Same rows as `knn_training_rows`, but every patient has fasting blood sugar 1,
/// so the `fbs` column carries no variance.
pub fn constant_fbs_training_rows() -> (Vec<Vec<f64>>, Vec<u8>) {
    let (mut rows, labels) = knn_training_rows();
    for row in &mut rows {
        row[5] = 1.0;
    }
    (rows, labels)
}

pub fn knn_artifacts_from(rows: &[Vec<f64>], labels: &[u8]) -> (TrainedClassifier, FeatureScaler) {
    let scaler = FeatureScaler::fit(rows).unwrap();
    let scaled = scaler.transform(rows).unwrap();
    let model = KnnModel::fit_with_k(&scaled, labels, 5).unwrap();
    (TrainedClassifier::Knn(model), scaler)
}

pub fn knn_artifacts() -> (TrainedClassifier, FeatureScaler) {
    let (rows, labels) = knn_training_rows();
    knn_artifacts_from(&rows, &labels)
}

/// Writes the fixed KNN model and its scaler into `dir`; returns (model, scaler) paths.
pub fn write_knn_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    let (model, scaler) = knn_artifacts();
    write_artifacts(dir, &model, &scaler)
}

pub fn write_artifacts(
    dir: &Path,
    model: &TrainedClassifier,
    scaler: &FeatureScaler,
) -> (PathBuf, PathBuf) {
    let model_path = dir.join("heart_disease_model.json");
    let scaler_path = dir.join("scaler.json");
    save_model(&model_path, model).unwrap();
    save_scaler(&scaler_path, scaler).unwrap();
    (model_path, scaler_path)
}

/// Synthetic dataset in the Kaggle layout. Diseased patients are older, with
/// lower max heart rate and more vessels; the classes overlap a little.
pub fn synthetic_csv(n_rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from(KAGGLE_HEADER);
    for i in 0..n_rows {
        let sick = i % 2 == 0;
        let s = if sick { 1.0 } else { 0.0 };
        let age = 45.0 + 12.0 * s + rng.random_range(-8.0..8.0);
        let sex = f64::from(rng.random_bool(0.5 + 0.2 * s));
        let cp = (1.0 + 2.0 * s + rng.random_range(-1.0..1.0_f64)).round().clamp(1.0, 4.0);
        let bp = 125.0 + 10.0 * s + rng.random_range(-15.0..15.0);
        let chol = 230.0 + 25.0 * s + rng.random_range(-40.0..40.0);
        let fbs = f64::from(rng.random_bool(0.15));
        let ekg = (rng.random_range(0..3)) as f64;
        let max_hr = 165.0 - 25.0 * s + rng.random_range(-15.0..15.0);
        let exang = f64::from(rng.random_bool(0.2 + 0.5 * s));
        let st = (0.5 + 1.5 * s + rng.random_range(-0.5..0.5_f64)).max(0.0);
        let slope = (1.0 + s + rng.random_range(-0.6..0.6_f64)).round();
        let vessels = (s * 1.5 + rng.random_range(-0.6..0.6_f64)).round().clamp(0.0, 3.0);
        let thal = if rng.random_bool(0.3 + 0.4 * s) { 7.0 } else { 3.0 };
        let target = if sick { "Presence" } else { "Absence" };
        out.push_str(&format!(
            "\n{:.0},{},{},{:.0},{:.0},{},{},{:.0},{},{:.1},{},{},{},{}",
            age, sex, cp, bp, chol, fbs, ekg, max_hr, exang, st, slope, vessels, thal, target
        ));
    }
    out.push('\n');
    out
}

pub fn write_synthetic_csv(dir: &Path, n_rows: usize, seed: u64) -> PathBuf {
    let path = dir.join("Heart_Disease_Prediction.csv");
    std::fs::write(&path, synthetic_csv(n_rows, seed)).unwrap();
    path
}
