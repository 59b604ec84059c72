use ndarray::{Array1, Array2};

use super::layer::Dense;

/// Gradients for one layer, same shapes as the layer's parameters.
pub(crate) struct Gradient {
    pub(crate) weights: Array2<f32>,
    pub(crate) bias: Array1<f32>,
}

/// Adam with bias-corrected moment estimates.
pub(crate) struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    step: i32,
    weight_velocity1: Vec<Array2<f32>>,
    bias_velocity1: Vec<Array1<f32>>,
    weight_velocity2: Vec<Array2<f32>>,
    bias_velocity2: Vec<Array1<f32>>,
}

impl Adam {
    ///Beta1 is the amount of the old velocity we will keep (default=0.9)
    ///Beta2 is the amount of the old squared velocity we will keep (default=0.999)
    pub(crate) fn new(learning_rate: f32, layers: &[Dense]) -> Self {
        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            step: 0,
            weight_velocity1: layers.iter().map(|l| Array2::zeros(l.weights.dim())).collect(),
            bias_velocity1: layers.iter().map(|l| Array1::zeros(l.bias.dim())).collect(),
            weight_velocity2: layers.iter().map(|l| Array2::zeros(l.weights.dim())).collect(),
            bias_velocity2: layers.iter().map(|l| Array1::zeros(l.bias.dim())).collect(),
        }
    }

    /// Apply one update to every layer. `gradients[l]` belongs to `layers[l]`.
    pub(crate) fn update(&mut self, layers: &mut [Dense], gradients: &[Gradient]) {
        self.step += 1;
        let correction1 = 1.0 - self.beta1.powi(self.step);
        let correction2 = 1.0 - self.beta2.powi(self.step);
        let (b1, b2, eps, lr) = (self.beta1, self.beta2, self.epsilon, self.learning_rate);

        for (l, (layer, grad)) in layers.iter_mut().zip(gradients).enumerate() {
            // first moment
            self.weight_velocity1[l] = &self.weight_velocity1[l] * b1 + &grad.weights * (1.0 - b1);
            self.bias_velocity1[l] = &self.bias_velocity1[l] * b1 + &grad.bias * (1.0 - b1);

            // second moment
            self.weight_velocity2[l] =
                &self.weight_velocity2[l] * b2 + &grad.weights.mapv(|x| x * x) * (1.0 - b2);
            self.bias_velocity2[l] =
                &self.bias_velocity2[l] * b2 + &grad.bias.mapv(|x| x * x) * (1.0 - b2);

            let weight_m = &self.weight_velocity1[l] / correction1;
            let weight_v = &self.weight_velocity2[l] / correction2;
            let bias_m = &self.bias_velocity1[l] / correction1;
            let bias_v = &self.bias_velocity2[l] / correction2;

            layer.weights = &layer.weights - &(weight_m / (weight_v.mapv(f32::sqrt) + eps) * lr);
            layer.bias = &layer.bias - &(bias_m / (bias_v.mapv(f32::sqrt) + eps) * lr);
        }
    }
}
