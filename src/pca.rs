//! Principal Component Analysis.
//!
//! Linear dimensionality reduction by eigen-decomposition of the sample
//! covariance matrix, with optional whitening of the projected components.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Axis};

use crate::error::{Error, Result};

/// PCA parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Pca {
    /// Number of output dimensions.
    pub n_components: usize,
    /// Scale each component to unit variance.
    pub whiten: bool,
}

impl Pca {
    /// Whitening is on by default.
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            whiten: true,
        }
    }

    pub fn with_whiten(mut self, whiten: bool) -> Self {
        self.whiten = whiten;
        self
    }

    /// Estimate the projection from `data` (rows are samples).
    pub fn fit(&self, data: &Array2<f64>) -> Result<PcaModel> {
        let (n, d) = data.dim();
        if self.n_components == 0 || self.n_components > d {
            return Err(Error::InvalidComponents {
                requested: self.n_components,
                available: d,
            });
        }
        if n < 2 {
            return Err(Error::NotEnoughSamples {
                required: 2,
                actual: n,
            });
        }

        let mean = data.mean_axis(Axis(0)).ok_or(Error::NotEnoughSamples {
            required: 2,
            actual: n,
        })?;
        let centered = data - &mean;
        let cov = centered.t().dot(&centered) / (n as f64 - 1.0);

        let eigen = DMatrix::from_fn(d, d, |i, j| cov[[i, j]]).symmetric_eigen();
        let eigenvalues: Vec<f64> = eigen.eigenvalues.iter().map(|&v| v.max(0.0)).collect();
        let total_variance: f64 = eigenvalues.iter().sum();

        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));
        order.truncate(self.n_components);

        let mut components = Array2::zeros((self.n_components, d));
        for (k, &idx) in order.iter().enumerate() {
            let column = eigen.eigenvectors.column(idx);
            // deterministic sign: largest loading is positive
            let pivot = column
                .iter()
                .copied()
                .fold(0.0f64, |best, v| if v.abs() > best.abs() { v } else { best });
            let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
            for j in 0..d {
                components[[k, j]] = column[j] * sign;
            }
        }

        let explained_variance: Array1<f64> = order.iter().map(|&i| eigenvalues[i]).collect();
        let explained_variance_ratio = if total_variance > 0.0 {
            explained_variance.mapv(|v| v / total_variance)
        } else {
            Array1::zeros(self.n_components)
        };

        Ok(PcaModel {
            mean,
            components,
            explained_variance,
            explained_variance_ratio,
            whiten: self.whiten,
        })
    }
}

/// A fitted projection.
#[derive(Debug, Clone)]
pub struct PcaModel {
    mean: Array1<f64>,
    /// n_components x n_features, one principal axis per row
    components: Array2<f64>,
    explained_variance: Array1<f64>,
    explained_variance_ratio: Array1<f64>,
    whiten: bool,
}

impl PcaModel {
    /// Project `data` onto the principal axes.
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        if data.ncols() != self.mean.len() {
            return Err(Error::FeatureCount {
                expected: self.mean.len(),
                actual: data.ncols(),
            });
        }

        let mut projected = (data - &self.mean).dot(&self.components.t());
        if self.whiten {
            for (mut column, &variance) in projected
                .axis_iter_mut(Axis(1))
                .zip(self.explained_variance.iter())
            {
                if variance > f64::EPSILON {
                    let scale = variance.sqrt();
                    column.mapv_inplace(|v| v / scale);
                }
            }
        }
        Ok(projected)
    }

    pub fn components(&self) -> &Array2<f64> {
        &self.components
    }

    pub fn explained_variance(&self) -> &Array1<f64> {
        &self.explained_variance
    }

    pub fn explained_variance_ratio(&self) -> &Array1<f64> {
        &self.explained_variance_ratio
    }

    /// Fraction of the total variance kept, in `[0, 1]`.
    pub fn retained_variance(&self) -> f64 {
        self.explained_variance_ratio.sum().clamp(0.0, 1.0)
    }
}

/// Reduced features together with the projection that produced them.
#[derive(Debug, Clone)]
pub struct Reduction {
    pub features: Array2<f64>,
    pub model: PcaModel,
}

impl Reduction {
    /// Retained variance as a percentage in `[0, 100]`.
    pub fn retained_percent(&self) -> f64 {
        self.model.retained_variance() * 100.0
    }

    pub fn report(&self) -> String {
        format!(
            "Keep {:5.2}% of data from initial dataset",
            self.retained_percent()
        )
    }
}

/// Whitened PCA down to `dimensions` columns, fitted on the data it
/// transforms. Prints the retained variance to stdout.
pub fn reduce_dimensions(features: &Array2<f64>, dimensions: usize) -> Result<Reduction> {
    let model = Pca::new(dimensions).fit(features)?;
    let reduced = model.transform(features)?;
    let reduction = Reduction {
        features: reduced,
        model,
    };

    println!("{}", reduction.report());
    log::info!(
        "PCA {} -> {} columns, explained variance ratio {:?}",
        features.ncols(),
        dimensions,
        reduction.model.explained_variance_ratio().to_vec()
    );
    Ok(reduction)
}
