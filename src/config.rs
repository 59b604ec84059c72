//! Literal run constants.
//!
//! There is no external configuration source: the defaults below are the
//! whole configuration surface. They derive `Serialize` only so the
//! effective values can be logged.

use serde::Serialize;

use crate::classifier::activation::Activation;
use crate::error::{Error, Result};

/// Hyper-parameters for one multi-layer perceptron.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierConfig {
    pub hidden_layer_sizes: Vec<usize>,
    pub activation: Activation,
    /// L2 penalty strength.
    pub alpha: f32,
    /// Maximum number of epochs.
    pub max_iter: usize,
    pub learning_rate: f32,
    /// `None` means `min(200, n_samples)`.
    pub batch_size: Option<usize>,
    pub tol: f32,
    pub n_iter_no_change: usize,
    pub shuffle: bool,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hidden_layer_sizes: vec![100],
            activation: Activation::Relu,
            alpha: 0.0001,
            max_iter: 200,
            learning_rate: 0.001,
            batch_size: None,
            tol: 1e-4,
            n_iter_no_change: 10,
            shuffle: true,
            seed: None,
        }
    }
}

impl ClassifierConfig {
    pub fn with_hidden_layers(mut self, sizes: &[usize]) -> Self {
        self.hidden_layer_sizes = sizes.to_vec();
        self
    }
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
    pub fn with_learning_rate(mut self, rate: f32) -> Self {
        self.learning_rate = rate;
        self
    }
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_layer_sizes.iter().any(|&s| s == 0) {
            return Err(Error::InvalidConfig(format!(
                "hidden layer sizes must be positive, got {:?}",
                self.hidden_layer_sizes
            )));
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidConfig("max_iter must be at least 1".into()));
        }
        if !self.alpha.is_finite() || self.alpha < 0. {
            return Err(Error::InvalidConfig(format!(
                "alpha must be a non-negative number, got {}",
                self.alpha
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == Some(0) {
            return Err(Error::InvalidConfig("batch size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Initial size of the viewer window, in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 800.0,
        }
    }
}

/// Everything one run of the walkthrough needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Components kept by the PCA step.
    pub components: usize,
    /// Classifier trained on the untouched features.
    pub original: ClassifierConfig,
    /// Classifier trained on the PCA features.
    pub reduced: ClassifierConfig,
    pub window: WindowConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            components: 2,
            original: ClassifierConfig::default()
                .with_hidden_layers(&[100, 100, 50, 160])
                .with_activation(Activation::Relu)
                .with_alpha(1.0)
                .with_max_iter(8000),
            reduced: ClassifierConfig::default()
                .with_hidden_layers(&[100, 50, 100, 100])
                .with_alpha(1.0)
                .with_max_iter(7500),
            window: WindowConfig::default(),
        }
    }
}
