//! CSV loading for the training dataset.

use crate::domain::errors::DatasetError;
use crate::domain::ml::feature_registry::{FEATURES, header_matches};
use crate::domain::ml::LabeledDataset;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Accepted target column headers, compared case-insensitively.
pub const TARGET_COLUMNS: [&str; 2] = ["Heart Disease", "target"];

/// Loads a labeled dataset from a CSV file with a header row.
pub fn load_dataset(path: &Path) -> Result<LabeledDataset, DatasetError> {
    info!("Loading training data from {:?}", path);
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_dataset(file)
}

/// Parses CSV from any reader. Features are located by API name or dataset
/// column header, so column order in the file does not matter.
pub fn read_dataset<R: Read>(reader: R) -> Result<LabeledDataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let target_idx = find_target_column(&headers).ok_or_else(|| DatasetError::MissingTarget {
        expected: TARGET_COLUMNS.join(", "),
    })?;

    let feature_idx = FEATURES
        .iter()
        .map(|feature| {
            headers
                .iter()
                .position(|h| header_matches(feature, h))
                .ok_or(DatasetError::MissingFeature {
                    feature: feature.name,
                    column: feature.dataset_column,
                })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based data row number, header excluded
        let row = i + 1;

        let raw_target = record.get(target_idx).unwrap_or_default();
        let label = parse_target(raw_target).ok_or_else(|| DatasetError::InvalidTarget {
            row,
            value: raw_target.to_string(),
        })?;

        let values = feature_idx
            .iter()
            .map(|&idx| {
                let raw = record.get(idx).unwrap_or_default();
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DatasetError::InvalidValue {
                        row,
                        column: headers.get(idx).unwrap_or_default().to_string(),
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        rows.push(values);
        labels.push(label);
    }

    let dataset = LabeledDataset::new(rows, labels)?;
    let (absent, present) = dataset.class_counts();
    info!(
        "Target distribution: 0 (Absence) = {}, 1 (Presence) = {}, total = {}",
        absent,
        present,
        dataset.len()
    );
    Ok(dataset)
}

fn find_target_column(headers: &StringRecord) -> Option<usize> {
    headers.iter().position(|h| {
        TARGET_COLUMNS
            .iter()
            .any(|target| h.trim().eq_ignore_ascii_case(target))
    })
}

/// `Presence`/`1` map to 1, `Absence`/`0` to 0.
pub fn parse_target(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("presence") {
        return Some(1);
    }
    if raw.eq_ignore_ascii_case("absence") {
        return Some(0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v == 1.0 => Some(1),
        Ok(v) if v == 0.0 => Some(0),
        _ => None,
    }
}
