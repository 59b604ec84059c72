use std::collections::HashMap;
use std::io::Read;

use ndarray::Array2;

use super::model::Dataset;
use crate::error::{Error, Result};

/// The Iris reference table, compiled into the binary.
const IRIS_CSV: &str = include_str!("../../assets/iris.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled Iris dataset: 150 rows, 4 measurements, 3 species.
pub fn load_iris() -> Result<Dataset> {
    let dataset = load_labeled_csv(IRIS_CSV.as_bytes())?;
    log::debug!(
        "Loaded iris: {} rows, features {:?}, classes {:?}",
        dataset.len(),
        dataset.feature_names,
        dataset.label_names
    );
    Ok(dataset)
}

/// CSV layout: header row with column names, numeric feature columns, and
/// the class name in the last column.
///
/// Class ids are handed out in order of first appearance.
pub fn load_labeled_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.len() < 2 {
        return Err(Error::Dataset(format!(
            "expected feature columns and a class column, got {} columns",
            headers.len()
        )));
    }
    let n_features = headers.len() - 1;

    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut label_names: Vec<String> = Vec::new();
    let mut label_ids: HashMap<String, usize> = HashMap::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            return Err(Error::Dataset(format!(
                "row {row_no}: expected {} fields, got {}",
                headers.len(),
                record.len()
            )));
        }

        for (col, tok) in record.iter().take(n_features).enumerate() {
            let value = tok.parse::<f64>().map_err(|_| {
                Error::Dataset(format!("row {row_no}, column {col}: '{tok}' is not a number"))
            })?;
            values.push(value);
        }

        let class = &record[n_features];
        let id = match label_ids.get(class) {
            Some(&id) => id,
            None => {
                let id = label_names.len();
                label_ids.insert(class.to_string(), id);
                label_names.push(class.to_string());
                id
            }
        };
        labels.push(id);
    }

    if labels.is_empty() {
        return Err(Error::Dataset("no data rows".to_string()));
    }

    let features = Array2::from_shape_vec((labels.len(), n_features), values)
        .map_err(|e| Error::Dataset(e.to_string()))?;
    let feature_names = headers[..n_features].to_vec();

    Dataset::new(features, labels, label_names, feature_names)
}
