//! # Sample statistics
//!
//! Column means, centering and the sample covariance matrix used as the input of the
//! eigen solvers.

use log::debug;
use ndarray::{Array1, Array2, ArrayView2, ArrayViewD, Axis};
use rayon::prelude::*;

use crate::error::{LinalgError, Result};
use crate::utils::{ensure_finite, to_matrix};

/// Mean of every column of `data` (N, D).
pub fn column_mean(data: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    data.mean_axis(Axis(0)).ok_or(LinalgError::EmptyInput)
}

/// Subtracts `mean` from every row of `data`.
pub fn center(data: ArrayView2<'_, f64>, mean: &Array1<f64>) -> Array2<f64> {
    let mut centered = data.to_owned();
    centered
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            row -= mean;
        });
    centered
}

/// Estimates the covariance matrix of `data`.
///
/// # Parameters
/// - `data`: Data array of shape (N, D), N data points in D dimensions
///
/// # Returns
/// - `Ok(Array2<f64>)`: Sample covariance `(Cᵀ C) / (N - 1)` of the centered data `C`,
///   shape (D, D)
/// - `Err`: Fewer than two samples, no features, or non-finite input
pub fn covariance(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let (n_samples, n_features) = data.dim();
    if n_samples < 2 {
        return Err(LinalgError::InsufficientSamples {
            required: 2,
            actual: n_samples,
        });
    }
    if n_features == 0 {
        return Err(LinalgError::EmptyInput);
    }
    ensure_finite(data)?;

    let mean = column_mean(data)?;
    let centered = center(data, &mean);
    let cov = centered.t().dot(&centered) / (n_samples as f64 - 1.0);

    debug!(
        "Covariance of {} samples × {} features computed",
        n_samples, n_features
    );
    Ok(cov)
}

/// Same as [`covariance`] for arrays whose rank is only known at runtime.
pub fn covariance_dyn(data: ArrayViewD<'_, f64>) -> Result<Array2<f64>> {
    let data = to_matrix(data)?;
    covariance(data.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_covariance_small() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let cov = covariance(data.view()).unwrap();

        assert_eq!(cov.dim(), (2, 2));
        for &value in cov.iter() {
            assert_relative_eq!(value, 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_covariance_known_variances() {
        let data = array![[1.0, 0.0], [-1.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
        let cov = covariance(data.view()).unwrap();

        assert_relative_eq!(cov[[0, 0]], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov[[1, 1]], 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov[[0, 1]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_covariance_shape_and_symmetry() {
        let mut rng = StdRng::seed_from_u64(42);
        let data = Array2::from_shape_fn((100, 5), |_| rng.random_range(-10.0..10.0));
        let cov = covariance(data.view()).unwrap();

        assert_eq!(cov.dim(), (5, 5));
        for i in 0..5 {
            assert!(cov[[i, i]] >= 0.0);
            for j in 0..5 {
                assert_relative_eq!(cov[[i, j]], cov[[j, i]], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_covariance_single_sample() {
        let data = array![[1.0, 2.0, 3.0]];
        let err = covariance(data.view()).unwrap_err();
        assert_eq!(
            err,
            LinalgError::InsufficientSamples {
                required: 2,
                actual: 1
            }
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_covariance_rejects_non_finite() {
        let data = array![[1.0, 2.0], [f64::INFINITY, 4.0]];
        assert_eq!(covariance(data.view()), Err(LinalgError::NonFiniteInput));
    }

    #[test]
    fn test_covariance_dyn_rank() {
        let cube = Array3::<f64>::zeros((2, 2, 2)).into_dyn();
        assert_eq!(
            covariance_dyn(cube.view()),
            Err(LinalgError::InvalidRank {
                expected: 2,
                actual: 3
            })
        );

        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].into_dyn();
        assert_eq!(covariance_dyn(data.view()).unwrap().dim(), (2, 2));
    }

    #[test]
    fn test_center() {
        let data = array![[1.0, 2.0], [3.0, 6.0]];
        let mean = column_mean(data.view()).unwrap();
        assert_eq!(mean, array![2.0, 4.0]);

        let centered = center(data.view(), &mean);
        assert_eq!(centered, array![[-1.0, -2.0], [1.0, 2.0]]);
    }
}
