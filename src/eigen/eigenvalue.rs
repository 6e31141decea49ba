use log::debug;
use ndarray::ArrayView2;

use crate::eigen::config::IterationConfig;
use crate::error::{LinalgError, Result};
use crate::utils::{ensure_finite, ensure_square, ensure_vector, flatten_vector};

/// Finds the eigenvalue of `a` that corresponds to the eigenvector `eigvec`.
///
/// Computed as the mean of the entrywise ratios `(A v)ᵢ / vᵢ`. Entries with
/// `|vᵢ| <= zero_threshold * max|v|` are left out of the mean: they only carry
/// rounding noise, and an exact zero would make the ratio undefined.
///
/// It's not feasible to check that `eigvec` really is an eigenvector of `a` under
/// floating point imprecision, so that remains the caller's responsibility.
///
/// # Parameters
/// - `a`: Square matrix (M, M)
/// - `eigvec`: Row or column vector of length M
/// - `config`: Supplies `zero_threshold`
///
/// # Returns
/// - `Ok(f64)`: Eigenvalue estimate
/// - `Err`: Shape mismatch, non-finite input, or a vector without any usable entry
pub fn eigenvalue_from_vector(
    a: ArrayView2<'_, f64>,
    eigvec: ArrayView2<'_, f64>,
    config: &IterationConfig,
) -> Result<f64> {
    let m = ensure_square(a)?;
    ensure_vector(eigvec, m)?;
    ensure_finite(a)?;
    ensure_finite(eigvec)?;

    let v = flatten_vector(eigvec)?;
    let max_abs = v.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if max_abs == 0.0 {
        return Err(LinalgError::IllConditionedEigenvector {
            reason: "vector is zero".to_string(),
        });
    }

    let cutoff = config.zero_threshold * max_abs;
    let av = a.dot(&v);
    let ratios: Vec<f64> = av
        .iter()
        .zip(v.iter())
        .filter(|(_, vi)| vi.abs() > cutoff)
        .map(|(avi, vi)| avi / vi)
        .collect();

    if ratios.is_empty() {
        return Err(LinalgError::IllConditionedEigenvector {
            reason: "every entry is below the zero threshold".to_string(),
        });
    }
    if ratios.len() < m {
        debug!(
            "Eigenvalue estimate skips {} of {} near-zero eigenvector entries",
            m - ratios.len(),
            m
        );
    }

    Ok(ratios.iter().sum::<f64>() / ratios.len() as f64)
}
