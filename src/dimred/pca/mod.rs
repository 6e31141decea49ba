//! # Two-component Principal Component Analysis
//!
//! Projects N-dimensional data onto its two directions of largest variance. The
//! principal axes are found without an eigendecomposition routine:
//!
//! 1. covariance matrix of the data
//! 2. power iteration gives the first axis
//! 3. Wielandt deflation removes it, and power iteration on the deflated matrix gives
//!    an estimate of the second eigenvalue
//! 4. inverse iteration on the original covariance recovers the second axis from that
//!    eigenvalue
//!
//! [`reduce_to_2d`] runs the pipeline once; [`Pca2D`] keeps the fitted axes around so
//! new data can be projected onto them.

use anyhow::{anyhow, Context};
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::eigen::{
    deflate, eigenvalue_from_vector, eigenvector_from_value, top_eigenvector, DeflationWeights,
    IterationConfig,
};
use crate::error::{LinalgError, Result};
use crate::statistics::{center, column_mean, covariance};

struct PrincipalAxes {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    first: Array2<f64>,
    second: Array2<f64>,
}

impl PrincipalAxes {
    /// Projection matrix (D, 2) with the first axis in column 0.
    fn projection(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.first.nrows(), 2), |(i, j)| match j {
            0 => self.first[[i, 0]],
            _ => self.second[[i, 0]],
        })
    }
}

fn principal_axes<R: Rng + ?Sized>(
    data: ArrayView2<'_, f64>,
    config: &IterationConfig,
    rng: &mut R,
) -> Result<PrincipalAxes> {
    let n_features = data.ncols();
    if n_features < 2 {
        return Err(LinalgError::InsufficientDimensions {
            required: 2,
            actual: n_features,
        });
    }

    let covariance = covariance(data)?;

    let first = top_eigenvector(covariance.view(), config, rng)?;
    let deflated = deflate(covariance.view(), first.view(), config)?;
    let deflated_top = top_eigenvector(deflated.view(), config, rng)?;
    let second_eigval = eigenvalue_from_vector(deflated.view(), deflated_top.view(), config)?;
    let second = eigenvector_from_value(covariance.view(), second_eigval, config, rng)?;

    debug!(
        "Principal axes of {} features found, second eigenvalue {:e}",
        n_features, second_eigval
    );

    Ok(PrincipalAxes {
        mean: column_mean(data)?,
        covariance,
        first,
        second,
    })
}

/// Reduces `data` (N, D) to two dimensions with the default [`IterationConfig`].
///
/// Uses principal component analysis, see
/// https://en.wikipedia.org/wiki/Principal_component_analysis
///
/// # Returns
/// - `Ok(Array2<f64>)`: Centered data projected onto the first two principal axes,
///   shape (N, 2). Column 0 carries the most variance; each column's sign is arbitrary.
/// - `Err`: Fewer than two samples or dimensions, non-finite input, or a numerical
///   failure of one of the iterative solvers
pub fn reduce_to_2d<R: Rng + ?Sized>(data: ArrayView2<'_, f64>, rng: &mut R) -> Result<Array2<f64>> {
    reduce_to_2d_with(data, &IterationConfig::default(), rng)
}

/// Like [`reduce_to_2d`] with explicit solver parameters.
pub fn reduce_to_2d_with<R: Rng + ?Sized>(
    data: ArrayView2<'_, f64>,
    config: &IterationConfig,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let axes = principal_axes(data, config, rng)?;
    Ok(center(data, &axes.mean).dot(&axes.projection()))
}

/// Two-component PCA model.
///
/// Fitting finds the two principal axes of the training data; transforming projects
/// any data with the same number of features onto them.
#[derive(Debug, Clone)]
pub struct Pca2D {
    config: IterationConfig,
    random_seed: u64,
    verbose: bool,
    components: Option<Array2<f64>>,
    mean: Option<Array1<f64>>,
    eigenvalues: Option<Array1<f64>>,
    total_variance: Option<f64>,
}

impl Pca2D {
    pub fn builder() -> Pca2DBuilder {
        Pca2DBuilder::new()
    }

    /// Fits the model to `x` (samples × features).
    ///
    /// # Side Effects
    /// - Stores the principal axes in `components`, the column means in `mean`
    /// - Stores the two eigenvalues and the total variance (trace of the covariance)
    pub fn fit(&mut self, x: ArrayView2<'_, f64>) -> anyhow::Result<&mut Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.random_seed);
        let axes = principal_axes(x, &self.config, &mut rng)
            .context("Failed to find the principal axes")?;

        let first_eigval =
            eigenvalue_from_vector(axes.covariance.view(), axes.first.view(), &self.config)?;
        let second_eigval =
            eigenvalue_from_vector(axes.covariance.view(), axes.second.view(), &self.config)?;
        let total_variance = axes.covariance.diag().sum();

        if self.verbose {
            let (n_samples, n_features) = x.dim();
            info!("PCA using power and inverse iteration:");
            info!(
                "  Input shape: {} samples × {} features",
                n_samples, n_features
            );
            info!("  Eigenvalues: {:.6}, {:.6}", first_eigval, second_eigval);
            info!(
                "  Explained variance: {:.2}%",
                (first_eigval + second_eigval) / total_variance * 100.0
            );
        }

        self.components = Some(axes.projection());
        self.mean = Some(axes.mean);
        self.eigenvalues = Some(Array1::from(vec![first_eigval, second_eigval]));
        self.total_variance = Some(total_variance);

        Ok(self)
    }

    /// Projects `x` onto the fitted principal axes.
    ///
    /// # Returns
    /// - `Ok(Array2<f64>)`: Transformed data (samples × 2)
    /// - `Err`: Model not fitted, or `x` has a different number of features
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        let (components, mean) = match (&self.components, &self.mean) {
            (Some(components), Some(mean)) => (components, mean),
            _ => return Err(anyhow!("Pca2D has not been fitted yet")),
        };

        if x.ncols() != mean.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("{} features", mean.len()),
                actual: format!("{} features", x.ncols()),
            }
            .into());
        }

        Ok(center(x, mean).dot(components))
    }

    /// Convenience method that fits the model and transforms the data in one step.
    pub fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Principal axes as columns, shape (features × 2).
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.components.as_ref()
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    /// Covariance eigenvalues of the two principal axes, in descending order.
    pub fn eigenvalues(&self) -> Option<&Array1<f64>> {
        self.eigenvalues.as_ref()
    }

    pub fn total_variance(&self) -> Option<f64> {
        self.total_variance
    }

    /// Share of the total variance carried by each principal axis.
    pub fn explained_variance_ratio(&self) -> Option<Array1<f64>> {
        match (&self.eigenvalues, self.total_variance) {
            (Some(eigenvalues), Some(total)) => Some(eigenvalues.mapv(|v| v / total)),
            _ => None,
        }
    }
}

/// Builder for configuring and creating [`Pca2D`] instances.
///
/// # Example Usage
/// ```ignore
/// let mut pca = Pca2DBuilder::new()
///     .random_seed(7)
///     .deflation(DeflationWeights::Orthogonal)
///     .verbose(true)
///     .build();
/// let embedding = pca.fit_transform(data.view())?;
/// ```
#[derive(Debug, Clone)]
pub struct Pca2DBuilder {
    config: IterationConfig,
    random_seed: u64,
    verbose: bool,
}

impl Default for Pca2DBuilder {
    fn default() -> Self {
        Self {
            config: IterationConfig::default(),
            random_seed: 42,
            verbose: false,
        }
    }
}

impl Pca2DBuilder {
    /// Creates a new builder with default parameters.
    ///
    /// Default values:
    /// - `config`: [`IterationConfig::default`]
    /// - `random_seed`: 42
    /// - `verbose`: false
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: IterationConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed of the generator that draws the starting vectors of the iterative solvers.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn deflation(mut self, deflation: DeflationWeights) -> Self {
        self.config.deflation = deflation;
        self
    }

    /// Logs a fit summary at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Pca2D {
        Pca2D {
            config: self.config,
            random_seed: self.random_seed,
            verbose: self.verbose,
            components: None,
            mean: None,
            eigenvalues: None,
            total_variance: None,
        }
    }
}
