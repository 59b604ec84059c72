use thiserror::Error;

/// Everything that can go wrong between loading the dataset and building figures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dataset: {0}")]
    Dataset(String),

    #[error("reading csv")]
    Csv(#[from] csv::Error),

    #[error("row count mismatch: {features} feature rows but {labels} labels")]
    RowMismatch { features: usize, labels: usize },

    #[error("cannot keep {requested} components from {available} features")]
    InvalidComponents { requested: usize, available: usize },

    #[error("need at least {required} samples, got {actual}")]
    NotEnoughSamples { required: usize, actual: usize },

    #[error("need at least {required} feature columns, got {actual}")]
    NotEnoughColumns { required: usize, actual: usize },

    #[error("expected {expected} feature columns, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("classifier has not been fitted")]
    NotFitted,

    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),

    #[error("subplot position {position} is outside a {rows}x{cols} grid")]
    GridPosition {
        position: usize,
        rows: usize,
        cols: usize,
    },

    #[error("label {label} has no class name ({classes} classes known)")]
    UnknownLabel { label: usize, classes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::RowMismatch`] unless both sides have the same number of rows.
pub(crate) fn ensure_rows(features: usize, labels: usize) -> Result<()> {
    if features != labels {
        return Err(Error::RowMismatch { features, labels });
    }
    Ok(())
}
