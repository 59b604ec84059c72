//! Iris walkthrough: PCA with whitening, a multi-layer perceptron
//! classifier, and an egui viewer for the resulting plots.

pub mod app;
pub mod classifier;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod metrics;
pub mod pca;
pub mod pipeline;
pub mod state;
pub mod ui;

pub use error::{Error, Result};
