//! Multi-layer perceptron classifier.

pub mod activation;
mod layer;
mod mlp;
mod optimizer;

use ndarray::Array2;

pub use activation::Activation;
pub use mlp::{FitReport, MlpClassifier};

use crate::config::ClassifierConfig;
use crate::error::Result;

/// Fit a fresh classifier on `features` / `labels` and predict the same rows.
pub fn train_and_predict(
    config: &ClassifierConfig,
    features: &Array2<f64>,
    labels: &[usize],
) -> Result<(MlpClassifier, Vec<usize>, FitReport)> {
    let mut classifier = MlpClassifier::new(config.clone())?;
    let report = classifier.fit(features, labels)?;
    log::info!(
        "Trained {classifier} in {} epochs (loss {:.4}, converged: {})",
        report.iterations,
        report.best_loss,
        report.converged
    );

    let predictions = classifier.predict(features)?;
    Ok((classifier, predictions, report))
}
