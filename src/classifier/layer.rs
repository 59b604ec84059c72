use std::fmt::Display;

use ndarray::{Array1, Array2};

use super::activation::Activation;

/// Fully connected layer: `out = act(inp · weights + bias)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    pub(crate) weights: Array2<f32>, // inputs x outputs
    pub(crate) bias: Array1<f32>,    // outputs
    pub(crate) activation: Activation,
}

impl Dense {
    /// Glorot-uniform initialisation. Logistic layers use the narrower
    /// bound (factor 2 instead of 6).
    pub(crate) fn new(
        inputs: usize,
        outputs: usize,
        activation: Activation,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let factor = match activation {
            Activation::Logistic => 2.,
            _ => 6.,
        };
        let bound = (factor / (inputs + outputs) as f32).sqrt();
        let mut init = || (rng.f32() * 2. - 1.) * bound;

        let weights = Array2::from_shape_fn((inputs, outputs), |_| init());
        let bias = Array1::from_shape_fn(outputs, |_| init());
        Self {
            weights,
            bias,
            activation,
        }
    }

    pub(crate) fn inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub(crate) fn outputs(&self) -> usize {
        self.weights.ncols()
    }

    /// Pre-activation values for a batch (rows are samples).
    pub(crate) fn linear(&self, inputs: &Array2<f32>) -> Array2<f32> {
        inputs.dot(&self.weights) + &self.bias
    }

    pub(crate) fn squared_weight_sum(&self) -> f32 {
        self.weights.iter().map(|w| w * w).sum()
    }
}

impl Display for Dense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dense {}x{} ({})",
            self.inputs(),
            self.outputs(),
            self.activation
        )
    }
}
