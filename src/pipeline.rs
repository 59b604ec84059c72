//! The walkthrough: load iris, classify the raw features, reduce them with
//! PCA, classify again, and collect the figures to show.
//!
//! ```text
//!   load_iris ──► scatter (1) ──► train "Without PCA" ──► overlay (2)
//!       │
//!       └──► reduce_dimensions ──► scatter (3) ──► train "With PCA" ──► overlay (4)
//!
//!   both classifiers ──► confusion_figure (Figure 2)
//! ```

use ndarray::Array2;

use crate::classifier::{train_and_predict, FitReport, MlpClassifier};
use crate::config::{ClassifierConfig, PipelineConfig};
use crate::data::loader::load_iris;
use crate::data::model::Dataset;
use crate::error::Result;
use crate::figure::{confusion_figure, scatter_labels, scatter_predictions, ClassifierRun, Figure, Panel};
use crate::pca::{reduce_dimensions, Reduction};

pub const WITHOUT_PCA: &str = "Without PCA";
pub const WITH_PCA: &str = "With PCA";

/// One trained classifier with its in-sample predictions.
pub struct RunOutcome {
    pub title: &'static str,
    pub classifier: MlpClassifier,
    pub predictions: Vec<usize>,
    pub report: FitReport,
}

/// Everything computed before the window opens.
pub struct PipelineOutput {
    pub dataset: Dataset,
    pub reduction: Reduction,
    /// Raw-feature run first, then the PCA run.
    pub runs: Vec<RunOutcome>,
    /// Scatter grid, then confusion matrices.
    pub figures: Vec<Figure>,
}

/// Run every stage on the bundled iris data.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    match serde_json::to_string_pretty(config) {
        Ok(json) => log::debug!("Pipeline configuration:\n{json}"),
        Err(e) => log::debug!("Pipeline configuration not serializable: {e}"),
    }

    let dataset = load_iris()?;
    log::info!(
        "Loaded {} samples with {} features and {} classes {:?}",
        dataset.len(),
        dataset.n_features(),
        dataset.n_classes(),
        dataset.label_names
    );

    let mut scatter = Figure::grid("Iris classification", 2, 2);
    let raw_axes = (
        dataset.feature_names.first().cloned().unwrap_or_default(),
        dataset.feature_names.get(1).cloned().unwrap_or_default(),
    );

    let original = scatter_labels(&dataset.features, &dataset.labels, &dataset.label_names, "Original data")?
        .with_axis_labels(raw_axes.0.as_str(), raw_axes.1.as_str());
    scatter.subplot(1, Panel::Scatter(original))?;

    let without = classify(WITHOUT_PCA, &config.original, &dataset.features, &dataset)?;
    let overlay = scatter_predictions(
        &dataset.features,
        &dataset.labels,
        &without.predictions,
        &dataset.label_names,
        WITHOUT_PCA,
    )?
    .with_axis_labels(raw_axes.0.as_str(), raw_axes.1.as_str());
    scatter.subplot(2, Panel::Scatter(overlay))?;

    let reduction = reduce_dimensions(&dataset.features, config.components)?;
    let reduced = scatter_labels(
        &reduction.features,
        &dataset.labels,
        &dataset.label_names,
        "After PCA",
    )?
    .with_axis_labels("PC 1", "PC 2");
    scatter.subplot(3, Panel::Scatter(reduced))?;

    let with = classify(WITH_PCA, &config.reduced, &reduction.features, &dataset)?;
    let overlay = scatter_predictions(
        &reduction.features,
        &dataset.labels,
        &with.predictions,
        &dataset.label_names,
        WITH_PCA,
    )?
    .with_axis_labels("PC 1", "PC 2");
    scatter.subplot(4, Panel::Scatter(overlay))?;

    let confusion = confusion_figure(
        "Confusion matrices",
        &dataset.labels,
        &dataset.label_names,
        &[
            ClassifierRun {
                title: without.title,
                classifier: &without.classifier,
                features: &dataset.features,
            },
            ClassifierRun {
                title: with.title,
                classifier: &with.classifier,
                features: &reduction.features,
            },
        ],
    )?;

    Ok(PipelineOutput {
        dataset,
        reduction,
        runs: vec![without, with],
        figures: vec![scatter, confusion],
    })
}

fn classify(
    title: &'static str,
    config: &ClassifierConfig,
    features: &Array2<f64>,
    dataset: &Dataset,
) -> Result<RunOutcome> {
    log::info!("{title}: training on {} columns", features.ncols());
    let (classifier, predictions, report) = train_and_predict(config, features, &dataset.labels)?;
    Ok(RunOutcome {
        title,
        classifier,
        predictions,
        report,
    })
}
