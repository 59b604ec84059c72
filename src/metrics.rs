use ndarray::Array2;

use crate::error::{ensure_rows, Error, Result};

/// True-vs-predicted counts. Rows are true labels, columns predicted labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Array2<usize>,
}

impl ConfusionMatrix {
    /// Cross-tabulate `truth` against `predicted` over `n_classes` classes.
    pub fn from_predictions(truth: &[usize], predicted: &[usize], n_classes: usize) -> Result<Self> {
        ensure_rows(truth.len(), predicted.len())?;
        let mut counts = Array2::zeros((n_classes, n_classes));
        for (&t, &p) in truth.iter().zip(predicted) {
            if let Some(&label) = [t, p].iter().find(|&&l| l >= n_classes) {
                return Err(Error::UnknownLabel {
                    label,
                    classes: n_classes,
                });
            }
            counts[[t, p]] += 1;
        }
        Ok(Self { counts })
    }

    pub fn n_classes(&self) -> usize {
        self.counts.nrows()
    }

    /// Samples of class `truth` predicted as `predicted`.
    pub fn count(&self, truth: usize, predicted: usize) -> usize {
        self.counts[[truth, predicted]]
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn correct(&self) -> usize {
        self.counts.diag().sum()
    }

    /// Fraction of correct predictions, 0 when empty.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.correct() as f64 / total as f64,
        }
    }
}
