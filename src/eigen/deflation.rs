//! Wielandt deflation, see
//! https://www.colorado.edu/engineering/cas/courses.d/IFEM.d/IFEM.AppE.d/IFEM.AppE.pdf

use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::eigen::config::IterationConfig;
use crate::eigen::eigenvalue::eigenvalue_from_vector;
use crate::error::{LinalgError, Result};
use crate::utils::{ensure_finite, ensure_square, ensure_vector, flatten_vector};

/// Choice of the vector `w` in `A - λ v wᵀ`.
///
/// Any `w` with `wᵀ v = 1` maps the eigenvalue `λ` to zero and keeps every other
/// eigenvalue of `A`; the variants differ only in numerical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeflationWeights {
    /// `w = v / (vᵀ v)`. Works for eigenvectors with zero entries, and for symmetric
    /// matrices keeps the remaining eigenvectors unchanged.
    #[default]
    Orthogonal,
    /// `w = 1 / (size(v) · v)`, entrywise. Every entry of `v` must be clearly nonzero.
    Reciprocal,
}

/// Performs Wielandt deflation on `a` to remove the influence of `eigvec`.
///
/// The eigenvalue is estimated with [`eigenvalue_from_vector`]. Power iteration on the
/// returned matrix converges to the eigenvector of the next-largest eigenvalue of `a`.
///
/// It's not feasible to check that `eigvec` really is an eigenvector of `a` under
/// floating point imprecision, so use with caution.
pub fn deflate(
    a: ArrayView2<'_, f64>,
    eigvec: ArrayView2<'_, f64>,
    config: &IterationConfig,
) -> Result<Array2<f64>> {
    let eigval = eigenvalue_from_vector(a, eigvec, config)?;
    deflate_with(a, eigvec, eigval, config)
}

/// Like [`deflate`], with the eigenvalue supplied by the caller.
pub fn deflate_with(
    a: ArrayView2<'_, f64>,
    eigvec: ArrayView2<'_, f64>,
    eigval: f64,
    config: &IterationConfig,
) -> Result<Array2<f64>> {
    let m = ensure_square(a)?;
    ensure_vector(eigvec, m)?;
    ensure_finite(a)?;
    ensure_finite(eigvec)?;
    if !eigval.is_finite() {
        return Err(LinalgError::NonFiniteInput);
    }

    let v = flatten_vector(eigvec)?;
    let w = match config.deflation {
        DeflationWeights::Orthogonal => {
            let squared_norm = v.dot(&v);
            if squared_norm == 0.0 {
                return Err(LinalgError::IllConditionedEigenvector {
                    reason: "vector is zero".to_string(),
                });
            }
            &v / squared_norm
        }
        DeflationWeights::Reciprocal => {
            let max_abs = v.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
            let cutoff = config.zero_threshold * max_abs;
            if let Some((index, value)) = v
                .iter()
                .enumerate()
                .find(|(_, x)| max_abs == 0.0 || x.abs() <= cutoff)
            {
                return Err(LinalgError::IllConditionedEigenvector {
                    reason: format!(
                        "entry {} ({:e}) is too close to zero for reciprocal weights",
                        index, value
                    ),
                });
            }
            v.mapv(|x| 1.0 / (m as f64 * x))
        }
    };

    let v_col = v.view().insert_axis(ndarray::Axis(1));
    let w_row = w.view().insert_axis(ndarray::Axis(0));
    let deflated = &a - &(v_col.dot(&w_row) * eigval);

    debug!(
        "Deflated eigenvalue {:e} from a {}×{} matrix using {:?} weights",
        eigval, m, m, config.deflation
    );
    Ok(deflated)
}
