use ndarray::{Array1, Array2, ArrayView2, ArrayViewD, Axis, Ix2};

use crate::error::{LinalgError, Result};

/// Vector helpers shared by the iterative solvers.
///
/// Vectors are stored as two-dimensional arrays with one unit dimension, so these
/// operate on every entry regardless of row or column orientation.
pub trait VectorOps {
    /// Euclidean norm over all entries.
    fn l2_norm(&self) -> f64;

    /// Scales to unit length, adding `guard` to the norm before dividing.
    fn normalized(&self, guard: f64) -> Array2<f64>;

    /// Euclidean norm of `|self| - |other|`, the sign-blind distance used as the
    /// convergence criterion of power and inverse iteration.
    fn abs_distance(&self, other: &Self) -> f64;
}

pub fn ensure_rank(view: &ArrayViewD<'_, f64>, rank: usize) -> Result<()> {
    if view.ndim() != rank {
        return Err(LinalgError::InvalidRank {
            expected: rank,
            actual: view.ndim(),
        });
    }
    Ok(())
}

pub fn ensure_finite(view: ArrayView2<'_, f64>) -> Result<()> {
    if view.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(LinalgError::NonFiniteInput)
    }
}

/// Checks that `view` is a non-empty square matrix and returns its order.
pub fn ensure_square(view: ArrayView2<'_, f64>) -> Result<usize> {
    let (rows, cols) = view.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(LinalgError::EmptyInput);
    }
    Ok(rows)
}

/// Checks that `view` is a row (1, len) or column (len, 1) vector.
pub fn ensure_vector(view: ArrayView2<'_, f64>, len: usize) -> Result<()> {
    match view.dim() {
        (n, 1) | (1, n) if n == len => Ok(()),
        (rows, cols) => Err(LinalgError::DimensionMismatch {
            expected: format!("vector of length {}", len),
            actual: format!("shape ({}, {})", rows, cols),
        }),
    }
}

/// Entries of a row or column vector, in order.
pub fn flatten_vector(view: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    match view.dim() {
        (_, 1) => Ok(view.column(0).to_owned()),
        (1, _) => Ok(view.row(0).to_owned()),
        (rows, cols) => Err(LinalgError::DimensionMismatch {
            expected: "row or column vector".to_string(),
            actual: format!("shape ({}, {})", rows, cols),
        }),
    }
}

fn vector_entries(view: &ArrayViewD<'_, f64>) -> Result<Array1<f64>> {
    if view.is_empty() {
        return Err(LinalgError::EmptyInput);
    }
    let non_unit = view.shape().iter().filter(|&&d| d != 1).count();
    if non_unit > 1 {
        return Err(LinalgError::AmbiguousReshape {
            shape: view.shape().to_vec(),
        });
    }
    Ok(view.iter().copied().collect())
}

/// Reshapes an array with at most one non-unit dimension into a column vector (M, 1).
///
/// Accepts 1-D arrays as well as degenerate shapes such as (1, M) or (1, M, 1).
pub fn to_column(view: ArrayViewD<'_, f64>) -> Result<Array2<f64>> {
    Ok(vector_entries(&view)?.insert_axis(Axis(1)))
}

/// Reshapes an array with at most one non-unit dimension into a row vector (1, M).
pub fn to_row(view: ArrayViewD<'_, f64>) -> Result<Array2<f64>> {
    Ok(vector_entries(&view)?.insert_axis(Axis(0)))
}

/// Converts a dynamic-rank array into a matrix, failing unless it has rank 2.
pub fn to_matrix(view: ArrayViewD<'_, f64>) -> Result<Array2<f64>> {
    ensure_rank(&view, 2)?;
    let actual = view.ndim();
    let matrix = view
        .into_dimensionality::<Ix2>()
        .map_err(|_| LinalgError::InvalidRank {
            expected: 2,
            actual,
        })?;
    Ok(matrix.to_owned())
}
