//! Power iteration, see https://en.wikipedia.org/wiki/Power_iteration

use log::{debug, trace, warn};
use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::eigen::config::IterationConfig;
use crate::error::{LinalgError, Result};
use crate::utils::{ensure_finite, ensure_square, VectorOps};

/// Random column vector (m, 1) of length one, drawn from entries uniform on [0, 1).
pub(crate) fn random_unit_vector<R: Rng + ?Sized>(
    m: usize,
    norm_guard: f64,
    rng: &mut R,
) -> Array2<f64> {
    Array2::from_shape_fn((m, 1), |_| rng.random::<f64>()).normalized(norm_guard)
}

/// Estimates the eigenvector of `a` whose eigenvalue has the largest magnitude.
///
/// Starts from a random unit vector drawn from `rng` and repeatedly multiplies by `a`,
/// renormalizing each time. Iteration stops once the absolute values of two successive
/// iterates differ by less than the configured tolerance, so a sign flip between steps
/// does not prevent convergence.
///
/// The sign-blind check alone cannot tell an eigenvector apart from an iterate that
/// only swaps signs between components, which is what happens when the two largest
/// eigenvalues have equal magnitude and opposite sign (`diag(1, -1)`). Once the check
/// passes, the eigen-residual `‖Ax - (xᵀAx)x‖` must also be within `√tolerance · ‖Ax‖`.
///
/// # Parameters
/// - `a`: Square matrix (M, M)
/// - `config`: Tolerance, normalization guard and iteration cap
/// - `rng`: Source of the starting vector
///
/// # Returns
/// - `Ok(Array2<f64>)`: Unit column vector (M, 1), sign undetermined
/// - `Err`: `a` is not square or not finite, or `NonConvergence` when no eigenvalue
///   strictly dominates in magnitude: the iteration cap was hit, or the converged
///   iterate is not an eigenvector
pub fn top_eigenvector<R: Rng + ?Sized>(
    a: ArrayView2<'_, f64>,
    config: &IterationConfig,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let m = ensure_square(a)?;
    ensure_finite(a)?;

    let mut x = random_unit_vector(m, config.norm_guard, rng);
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let ax = a.dot(&x);
        let norm = ax.l2_norm();
        if norm == 0.0 {
            // x spans part of the null space, so it is an eigenvector for eigenvalue 0.
            debug!(
                "Power iteration hit the null space of a {}×{} matrix after {} iterations",
                m, m, iteration
            );
            return Ok(x);
        }

        let x_old = std::mem::replace(&mut x, ax / (norm + config.norm_guard));
        residual = x.abs_distance(&x_old);
        trace!("Power iteration {}: residual {:e}", iteration, residual);

        if residual < config.tolerance {
            let ax = a.dot(&x);
            let rayleigh = x.t().dot(&ax)[[0, 0]];
            let eigen_residual = (&ax - &(&x * rayleigh)).l2_norm();
            if eigen_residual > config.tolerance.sqrt() * (ax.l2_norm() + config.norm_guard) {
                warn!(
                    "Power iteration settled on a non-eigenvector after {} iterations \
                     (eigen-residual {:e}), the top eigenvalues tie in magnitude",
                    iteration, eigen_residual
                );
                return Err(LinalgError::NonConvergence {
                    method: "power iteration",
                    iterations: iteration,
                    residual: eigen_residual,
                });
            }

            debug!(
                "Power iteration converged after {} iterations (residual {:e})",
                iteration, residual
            );
            return Ok(x);
        }
    }

    Err(LinalgError::NonConvergence {
        method: "power iteration",
        iterations: config.max_iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_diagonal_top_eigenvector() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let v = top_eigenvector(a.view(), &IterationConfig::default(), &mut rng).unwrap();

        assert_eq!(v.dim(), (2, 1));
        assert_abs_diff_eq!(v[[0, 0]].abs(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v[[1, 0]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_symmetric_top_eigenvector() {
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let v = top_eigenvector(a.view(), &IterationConfig::default(), &mut rng).unwrap();

        let expected = 1.0 / 2.0f64.sqrt();
        assert_abs_diff_eq!(v[[0, 0]].abs(), expected, epsilon = 1e-6);
        assert_abs_diff_eq!(v[[1, 0]].abs(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_eigenpair_residual() {
        let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let v = top_eigenvector(a.view(), &IterationConfig::default(), &mut rng).unwrap();

        assert_abs_diff_eq!(v.l2_norm(), 1.0, epsilon = 1e-12);
        let av = a.dot(&v);
        let rayleigh = v.t().dot(&av)[[0, 0]];
        let residual = (&av - &(&v * rayleigh)).l2_norm();
        assert!(residual < 1e-6, "residual {}", residual);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = array![[3.0, 1.0], [1.0, 1.0]];
        let config = IterationConfig::default();
        let first =
            top_eigenvector(a.view(), &config, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        let second =
            top_eigenvector(a.view(), &config, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rotation_does_not_converge() {
        // Eigenvalues ±i: the iterate rotates by a quarter turn every step.
        let a = array![[0.0, -1.0], [1.0, 0.0]];
        let config = IterationConfig::builder().max_iterations(100).build();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        match top_eigenvector(a.view(), &config, &mut rng) {
            Err(LinalgError::NonConvergence {
                method, iterations, ..
            }) => {
                assert_eq!(method, "power iteration");
                assert_eq!(iterations, 100);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_opposite_sign_tie_is_rejected() {
        // |x| is the same after every step, yet x is not an eigenvector.
        let a = array![[1.0, 0.0], [0.0, -1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        match top_eigenvector(a.view(), &IterationConfig::default(), &mut rng) {
            Err(LinalgError::NonConvergence {
                method, residual, ..
            }) => {
                assert_eq!(method, "power iteration");
                assert!(residual > 1e-4, "residual {}", residual);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_matrix_returns_unit_vector() {
        let a = Array2::<f64>::zeros((3, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = top_eigenvector(a.view(), &IterationConfig::default(), &mut rng).unwrap();
        assert_abs_diff_eq!(v.l2_norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let config = IterationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let rect = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            top_eigenvector(rect.view(), &config, &mut rng),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );

        let nan = array![[1.0, f64::NAN], [0.0, 1.0]];
        assert_eq!(
            top_eigenvector(nan.view(), &config, &mut rng),
            Err(LinalgError::NonFiniteInput)
        );
    }
}
