use ndarray::Array2;

use crate::error::{ensure_rows, Error, Result};

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// A labelled, fixed-width numeric dataset.
///
/// `labels[i]` is the class of `features.row(i)` and indexes `label_names`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// One row per sample.
    pub features: Array2<f64>,
    /// Class id per row.
    pub labels: Vec<usize>,
    /// Human readable class names, indexed by class id.
    pub label_names: Vec<String>,
    /// Column headers for the feature matrix.
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Validate and assemble a dataset.
    pub fn new(
        features: Array2<f64>,
        labels: Vec<usize>,
        label_names: Vec<String>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        ensure_rows(features.nrows(), labels.len())?;
        if feature_names.len() != features.ncols() {
            return Err(Error::Dataset(format!(
                "{} feature names for {} columns",
                feature_names.len(),
                features.ncols()
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= label_names.len()) {
            return Err(Error::UnknownLabel {
                label,
                classes: label_names.len(),
            });
        }

        Ok(Dataset {
            features,
            labels,
            label_names,
            feature_names,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn n_classes(&self) -> usize {
        self.label_names.len()
    }
}
