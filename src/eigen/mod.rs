//! # Iterative eigen solvers
//!
//! Building blocks for extracting a few eigenpairs of a square matrix without a full
//! eigendecomposition:
//! - **Power iteration** ([`top_eigenvector`]): eigenvector of the largest-magnitude
//!   eigenvalue
//! - **Eigenvalue estimation** ([`eigenvalue_from_vector`]): eigenvalue belonging to an
//!   approximate eigenvector
//! - **Wielandt deflation** ([`deflate`]): removes a known eigenpair so power iteration
//!   finds the next one
//! - **Inverse iteration** ([`eigenvector_from_value`]): eigenvector nearest an
//!   eigenvalue estimate
//!
//! Every solver draws its starting vector from a caller-supplied random number
//! generator. Results are therefore reproducible for a seeded generator, and only
//! determined up to sign.

mod config;
mod deflation;
mod eigenvalue;
mod inverse;
mod power;

pub use config::{IterationConfig, IterationConfigBuilder, MAX_ITERATIONS, NORM_GUARD, TOLERANCE};
pub use deflation::{deflate, deflate_with, DeflationWeights};
pub use eigenvalue::eigenvalue_from_vector;
pub use inverse::eigenvector_from_value;
pub use power::top_eigenvector;

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::error::Result;

/// An eigenvalue together with its unit-length column eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
    pub value: f64,
    pub vector: Array2<f64>,
}

impl Eigenpair {
    /// Norm of `A v - λ v`, zero for an exact eigenpair of `a`.
    pub fn residual(&self, a: ArrayView2<'_, f64>) -> f64 {
        let diff = a.dot(&self.vector) - &self.vector * self.value;
        diff.iter().map(|x| x * x).sum::<f64>().sqrt()
    }
}

/// Dominant eigenpair of `a`: [`top_eigenvector`] followed by [`eigenvalue_from_vector`].
pub fn dominant_eigenpair<R: Rng + ?Sized>(
    a: ArrayView2<'_, f64>,
    config: &IterationConfig,
    rng: &mut R,
) -> Result<Eigenpair> {
    let vector = top_eigenvector(a, config, rng)?;
    let value = eigenvalue_from_vector(a, vector.view(), config)?;
    Ok(Eigenpair { value, vector })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dominant_eigenpair() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pair = dominant_eigenpair(a.view(), &IterationConfig::default(), &mut rng).unwrap();

        assert_abs_diff_eq!(pair.value, 4.0, epsilon = 1e-6);
        assert!(pair.residual(a.view()) < 1e-6);
    }

    #[test]
    fn test_residual_of_exact_pair() {
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let s = 1.0 / 2.0f64.sqrt();
        let pair = Eigenpair {
            value: 3.0,
            vector: array![[s], [s]],
        };
        assert_abs_diff_eq!(pair.residual(a.view()), 0.0, epsilon = 1e-12);

        let wrong = Eigenpair {
            value: 1.0,
            vector: array![[s], [s]],
        };
        assert!(wrong.residual(a.view()) > 1.0);
    }
}
