//! Inverse iteration, see https://en.wikipedia.org/wiki/Inverse_iteration

use log::{debug, trace, warn};
use nalgebra::{linalg::LU, DVector, Dyn};
use ndarray::{Array2, ArrayView2};
use nshare::IntoNalgebra;
use rand::Rng;

use crate::eigen::config::IterationConfig;
use crate::eigen::power::random_unit_vector;
use crate::error::{LinalgError, Result};
use crate::utils::{ensure_finite, ensure_square, VectorOps};

/// Estimates the eigenvector of `a` that corresponds to the eigenvalue `eigval`.
///
/// `A - λI` is factorized once and the iteration repeatedly solves against it, which
/// converges to the eigenvector whose eigenvalue lies nearest `eigval`. The stopping
/// rule is the same sign-blind check used by power iteration.
///
/// When `eigval` is (numerically) an exact eigenvalue the shifted matrix is singular.
/// The shift is then moved by `shift_perturbation · max(1, |λ|, max|Aᵢⱼ|)`, ten times
/// further on each retry, for at most `max_shift_attempts` attempts. The step scales
/// with the matrix as well as with λ, so a zero eigenvalue of a large matrix still
/// clears the singularity threshold.
///
/// # Returns
/// - `Ok(Array2<f64>)`: Unit column vector (M, 1), sign undetermined
/// - `Err`: Invalid input, a shifted matrix that stays singular, or the iteration cap
pub fn eigenvector_from_value<R: Rng + ?Sized>(
    a: ArrayView2<'_, f64>,
    eigval: f64,
    config: &IterationConfig,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let m = ensure_square(a)?;
    ensure_finite(a)?;
    if !eigval.is_finite() {
        return Err(LinalgError::NonFiniteInput);
    }

    let lu = factorize_shifted(a, eigval, config)?;

    let mut x = random_unit_vector(m, config.norm_guard, rng);
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let rhs = DVector::from_iterator(m, x.iter().copied());
        let solution = lu
            .solve(&rhs)
            .ok_or(LinalgError::SingularSystem { eigenvalue: eigval })?;
        let ax = Array2::from_shape_fn((m, 1), |(i, _)| solution[i]);
        if !ax.iter().all(|v| v.is_finite()) {
            return Err(LinalgError::SingularSystem { eigenvalue: eigval });
        }

        let norm = ax.l2_norm();
        let x_old = std::mem::replace(&mut x, ax / (norm + config.norm_guard));
        residual = x.abs_distance(&x_old);
        trace!("Inverse iteration {}: residual {:e}", iteration, residual);

        if residual < config.tolerance {
            debug!(
                "Inverse iteration for eigenvalue {:e} converged after {} iterations",
                eigval, iteration
            );
            return Ok(x);
        }
    }

    Err(LinalgError::NonConvergence {
        method: "inverse iteration",
        iterations: config.max_iterations,
        residual,
    })
}

/// LU factorization of `a - shift·I`, moving the shift off an exact eigenvalue if needed.
fn factorize_shifted(
    a: ArrayView2<'_, f64>,
    eigval: f64,
    config: &IterationConfig,
) -> Result<LU<f64, Dyn, Dyn>> {
    let m = a.nrows();
    let scale = a.iter().fold(1.0f64, |acc, x| acc.max(x.abs()));
    let mut shift = eigval;

    for attempt in 0..=config.max_shift_attempts {
        let shifted = &a - &(Array2::<f64>::eye(m) * shift);
        let lu = shifted.into_nalgebra().lu();
        let min_pivot = lu
            .u()
            .diagonal()
            .iter()
            .fold(f64::INFINITY, |acc, p| acc.min(p.abs()));

        if min_pivot > config.singular_threshold * scale {
            if attempt > 0 {
                warn!(
                    "Eigenvalue {:e} made A - λI singular, iterating with shift {:e} instead",
                    eigval, shift
                );
            }
            return Ok(lu);
        }

        let step = config.shift_perturbation * 10f64.powi(attempt as i32) * eigval.abs().max(scale);
        shift = eigval + step;
        debug!(
            "Shifted matrix singular (pivot {:e}), retrying with shift {:e}",
            min_pivot, shift
        );
    }

    Err(LinalgError::SingularSystem { eigenvalue: eigval })
}
