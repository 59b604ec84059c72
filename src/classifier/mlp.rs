use std::fmt::Display;

use ndarray::{Array2, Axis};
use serde::Serialize;

use super::activation::{activate, activate_der, Activation};
use super::layer::Dense;
use super::optimizer::{Adam, Gradient};
use crate::config::ClassifierConfig;
use crate::error::{ensure_rows, Error, Result};

/// Summary of one `fit` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub iterations: usize,
    pub final_loss: f32,
    pub best_loss: f32,
    pub converged: bool,
    /// Training stopped early on a NaN or infinite loss.
    pub diverged: bool,
}

/// Feed-forward classifier with a softmax output trained on cross-entropy.
///
/// ```rust
///   use iris_lens::classifier::MlpClassifier;
///   use iris_lens::config::ClassifierConfig;
///   use ndarray::array;
///
///   let x = array![[0., 0.], [0., 1.], [5., 5.], [5., 6.]];
///   let y = [0, 0, 1, 1];
///   let config = ClassifierConfig::default()
///       .with_hidden_layers(&[4])
///       .with_learning_rate(0.05)
///       .with_max_iter(300)
///       .with_seed(1);
///
///   let mut clf = MlpClassifier::new(config).unwrap();
///   clf.fit(&x, &y).unwrap();
///   assert_eq!(clf.predict(&x).unwrap().len(), 4);
/// ```
pub struct MlpClassifier {
    config: ClassifierConfig,
    layers: Vec<Dense>,
    n_classes: usize,
    loss_curve: Vec<f32>,
}

impl MlpClassifier {
    /// An untrained classifier. Fails if the config is invalid.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layers: vec![],
            n_classes: 0,
            loss_curve: vec![],
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        !self.layers.is_empty()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Mean training loss per epoch of the last `fit`.
    pub fn loss_curve(&self) -> &[f32] {
        &self.loss_curve
    }

    /// Layer sizes from input to output, e.g. `[4, 100, 3]`.
    pub fn shape(&self) -> Vec<usize> {
        match self.layers.first() {
            Some(first) => std::iter::once(first.inputs())
                .chain(self.layers.iter().map(Dense::outputs))
                .collect(),
            None => vec![],
        }
    }

    /// Train from scratch on `features` / `labels`.
    ///
    /// Running out of epochs is not an error: the best parameters seen are
    /// kept and `converged` is false in the report.
    pub fn fit(&mut self, features: &Array2<f64>, labels: &[usize]) -> Result<FitReport> {
        ensure_rows(features.nrows(), labels.len())?;
        let n = labels.len();
        if n == 0 {
            return Err(Error::NotEnoughSamples {
                required: 1,
                actual: 0,
            });
        }
        if features.ncols() == 0 {
            return Err(Error::NotEnoughColumns {
                required: 1,
                actual: 0,
            });
        }

        let n_classes = labels.iter().copied().max().map_or(0, |m| m + 1);
        let mut rng = match self.config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let mut sizes = vec![features.ncols()];
        sizes.extend(&self.config.hidden_layer_sizes);
        sizes.push(n_classes);
        let last = sizes.len() - 2;
        let mut layers: Vec<Dense> = sizes
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                // output layer is linear, softmax is applied on top
                let act = if i == last {
                    Activation::Identity
                } else {
                    self.config.activation
                };
                Dense::new(w[0], w[1], act, &mut rng)
            })
            .collect();

        let x = features.mapv(|v| v as f32);
        let targets = one_hot(labels, n_classes);
        let batch_size = self.config.batch_size.unwrap_or(200).clamp(1, n);
        let mut adam = Adam::new(self.config.learning_rate, &layers);
        let mut indices: Vec<usize> = (0..n).collect();

        let mut loss_curve = Vec::with_capacity(self.config.max_iter.min(1024));
        let mut best_loss = f32::INFINITY;
        let mut best_layers = layers.clone();
        let mut no_improvement = 0;
        let mut converged = false;
        let mut diverged = false;

        for epoch in 0..self.config.max_iter {
            if self.config.shuffle {
                rng.shuffle(&mut indices);
            }

            let mut accumulated = 0.;
            for chunk in indices.chunks(batch_size) {
                let xb = x.select(Axis(0), chunk);
                let yb = targets.select(Axis(0), chunk);
                let (loss, gradients) = backprop(&layers, self.config.alpha, &xb, &yb);
                adam.update(&mut layers, &gradients);
                accumulated += loss * chunk.len() as f32;
            }
            let loss = accumulated / n as f32;
            loss_curve.push(loss);

            if !loss.is_finite() {
                log::warn!(
                    "training loss became {loss} at epoch {}, stopping and keeping best parameters (loss {best_loss:.5})",
                    epoch + 1
                );
                diverged = true;
                break;
            }

            if loss > best_loss - self.config.tol {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            if loss < best_loss {
                best_loss = loss;
                best_layers.clone_from(&layers);
            }

            if no_improvement > self.config.n_iter_no_change {
                log::debug!(
                    "training loss did not improve more than tol={} for {} consecutive epochs, stopping at epoch {}",
                    self.config.tol,
                    self.config.n_iter_no_change,
                    epoch + 1
                );
                converged = true;
                break;
            }
        }

        let iterations = loss_curve.len();
        if !converged && !diverged {
            log::warn!(
                "maximum iterations ({}) reached without convergence, keeping best parameters (loss {best_loss:.5})",
                self.config.max_iter
            );
        }

        let report = FitReport {
            iterations,
            final_loss: loss_curve.last().copied().unwrap_or(f32::NAN),
            best_loss,
            converged,
            diverged,
        };

        self.layers = best_layers;
        self.n_classes = n_classes;
        self.loss_curve = loss_curve;
        Ok(report)
    }

    /// Class probabilities, one row per sample.
    pub fn predict_proba(&self, features: &Array2<f64>) -> Result<Array2<f32>> {
        let first = self.layers.first().ok_or(Error::NotFitted)?;
        if features.ncols() != first.inputs() {
            return Err(Error::FeatureCount {
                expected: first.inputs(),
                actual: features.ncols(),
            });
        }

        let x = features.mapv(|v| v as f32);
        let mut activations = forward(&self.layers, x);
        Ok(activations.pop().unwrap_or_default())
    }

    /// Most probable class per sample.
    pub fn predict(&self, features: &Array2<f64>) -> Result<Vec<usize>> {
        let proba = self.predict_proba(features)?;
        Ok(proba
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f32::NEG_INFINITY), |best, (i, &p)| {
                        if p > best.1 {
                            (i, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }
}

impl Display for MlpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shape = self
            .shape()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-");
        write!(
            f,
            "MLP [{shape}] {} alpha={} max_iter={}",
            self.config.activation, self.config.alpha, self.config.max_iter
        )
    }
}

fn one_hot(labels: &[usize], n_classes: usize) -> Array2<f32> {
    let mut out = Array2::zeros((labels.len(), n_classes));
    for (row, &label) in labels.iter().enumerate() {
        out[[row, label]] = 1.;
    }
    out
}

fn softmax_rows(z: &mut Array2<f32>) {
    for mut row in z.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
}

/// Values after activation for every layer, input included.
fn forward(layers: &[Dense], x: Array2<f32>) -> Vec<Array2<f32>> {
    let mut activations = Vec::with_capacity(layers.len() + 1);
    activations.push(x);
    for (i, layer) in layers.iter().enumerate() {
        let mut z = layer.linear(&activations[i]);
        if i + 1 == layers.len() {
            softmax_rows(&mut z);
        } else {
            z.mapv_inplace(|v| activate(v, layer.activation));
        }
        activations.push(z);
    }
    activations
}

/// Regularised cross-entropy of a batch and its gradients per layer.
fn backprop(
    layers: &[Dense],
    alpha: f32,
    x: &Array2<f32>,
    targets: &Array2<f32>,
) -> (f32, Vec<Gradient>) {
    let n = x.nrows() as f32;
    let activations = forward(layers, x.clone());
    let output = &activations[layers.len()];

    //E = -sum(t * ln(p)) / n + 0.5 * alpha * sum(w^2) / n
    let cross_entropy = -output
        .iter()
        .zip(targets.iter())
        .map(|(&p, &t)| t * p.clamp(1e-10, 1.).ln())
        .sum::<f32>()
        / n;
    let penalty = 0.5 * alpha * layers.iter().map(Dense::squared_weight_sum).sum::<f32>() / n;

    //softmax + cross entropy: dE/dz = p - t
    let mut delta = (output - targets) / n;
    let mut gradients = Vec::with_capacity(layers.len());

    for l in (0..layers.len()).rev() {
        let weights = activations[l].t().dot(&delta) + &layers[l].weights * (alpha / n);
        let bias = delta.sum_axis(Axis(0));

        if l > 0 {
            let act = layers[l - 1].activation;
            let mut back = delta.dot(&layers[l].weights.t());
            back.zip_mut_with(&activations[l], |d, &a| *d *= activate_der(a, act));
            delta = back;
        }
        gradients.push(Gradient { weights, bias });
    }
    gradients.reverse();

    (cross_entropy + penalty, gradients)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    /// Two well separated clusters around (-2,-2) and (2,2).
    fn blobs() -> (Array2<f64>, Vec<usize>) {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut rows = vec![];
        let mut labels = vec![];
        for class in 0..2 {
            let centre = if class == 0 { -2.0 } else { 2.0 };
            for _ in 0..40 {
                rows.push(centre + rng.f64() - 0.5);
                rows.push(centre + rng.f64() - 0.5);
                labels.push(class);
            }
        }
        (Array2::from_shape_vec((80, 2), rows).unwrap(), labels)
    }

    fn small_config() -> ClassifierConfig {
        ClassifierConfig::default()
            .with_hidden_layers(&[8])
            .with_learning_rate(0.01)
            .with_max_iter(300)
            .with_seed(1)
    }

    #[test]
    fn learns_separable_blobs() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        clf.fit(&x, &y).unwrap();

        let pred = clf.predict(&x).unwrap();
        let correct = pred.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(correct as f32 / y.len() as f32 >= 0.95, "{correct}/80");
        assert_eq!(clf.shape(), vec![2, 8, 2]);
        assert_eq!(clf.n_classes(), 2);
    }

    #[test]
    fn loss_goes_down() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        let report = clf.fit(&x, &y).unwrap();
        let curve = clf.loss_curve();
        assert_eq!(curve.len(), report.iterations);
        assert!(curve[curve.len() - 1] < curve[0]);
        assert!(report.best_loss <= report.final_loss);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config().with_max_iter(5)).unwrap();
        clf.fit(&x, &y).unwrap();
        let proba = clf.predict_proba(&x).unwrap();
        assert_eq!(proba.dim(), (80, 2));
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn same_seed_same_model() {
        let (x, y) = blobs();
        let mut a = MlpClassifier::new(small_config().with_max_iter(20)).unwrap();
        let mut b = MlpClassifier::new(small_config().with_max_iter(20)).unwrap();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.loss_curve(), b.loss_curve());
        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn running_out_of_epochs_is_not_an_error() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config().with_max_iter(1)).unwrap();
        let report = clf.fit(&x, &y).unwrap();
        assert!(!report.converged);
        assert_eq!(report.iterations, 1);
        let pred = clf.predict(&x).unwrap();
        assert_eq!(pred.len(), 80);
        assert!(pred.iter().all(|&p| p < 2));
    }

    #[test]
    fn nan_loss_stops_early_with_best_layers() {
        let x = array![[f64::NAN, 0.0], [1.0, 1.0]];
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        let report = clf.fit(&x, &[0, 1]).unwrap();

        assert!(report.diverged);
        assert!(!report.converged);
        assert!(report.iterations < clf.config().max_iter);
        assert!(!report.final_loss.is_finite());
        assert!(report.best_loss.is_finite());

        let pred = clf.predict(&x).unwrap();
        assert_eq!(pred.len(), 2);
        assert!(pred.iter().all(|&p| p < 2));
    }

    #[test]
    fn stops_when_loss_plateaus() {
        let (x, y) = blobs();
        let mut config = small_config();
        // nothing counts as an improvement after the first epoch
        config.tol = 1e6;
        let mut clf = MlpClassifier::new(config).unwrap();
        let report = clf.fit(&x, &y).unwrap();
        assert!(report.converged);
        assert!(!report.diverged);
        assert_eq!(report.iterations, 12);
    }

    #[test]
    fn mini_batches() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config().with_batch_size(16)).unwrap();
        clf.fit(&x, &y).unwrap();
        let pred = clf.predict(&x).unwrap();
        let correct = pred.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(correct >= 76, "{correct}/80");
    }

    #[test]
    fn rejects_mismatched_rows() {
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        let err = clf.fit(&array![[1.0, 2.0], [3.0, 4.0]], &[0]).unwrap_err();
        assert!(matches!(err, Error::RowMismatch { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        let err = clf.fit(&Array2::zeros((0, 2)), &[]).unwrap_err();
        assert!(matches!(err, Error::NotEnoughSamples { .. }));
    }

    #[test]
    fn predict_needs_fit_and_matching_width() {
        let (x, y) = blobs();
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        assert!(matches!(clf.predict(&x), Err(Error::NotFitted)));
        clf.fit(&x, &y).unwrap();
        assert!(matches!(
            clf.predict(&array![[1.0, 2.0, 3.0]]),
            Err(Error::FeatureCount {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ClassifierConfig::default().with_hidden_layers(&[0]);
        assert!(matches!(
            MlpClassifier::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn backprop_matches_numeric_gradient() {
        let mut rng = fastrand::Rng::with_seed(5);
        let layers = vec![
            Dense::new(2, 3, Activation::Tanh, &mut rng),
            Dense::new(3, 2, Activation::Identity, &mut rng),
        ];
        let x = array![[0.5f32, -0.2], [0.1, 0.9]];
        let t = array![[1.0f32, 0.0], [0.0, 1.0]];
        let (_, grads) = backprop(&layers, 0.1, &x, &t);

        let h = 1e-3;
        let mut plus = layers.clone();
        plus[0].weights[[1, 2]] += h;
        let mut minus = layers.clone();
        minus[0].weights[[1, 2]] -= h;
        let numeric = (backprop(&plus, 0.1, &x, &t).0 - backprop(&minus, 0.1, &x, &t).0) / (2. * h);
        assert!((numeric - grads[0].weights[[1, 2]]).abs() < 1e-2);
    }
}
