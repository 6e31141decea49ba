//! # Errors
//!
//! Every routine in this crate reports failures through [`LinalgError`]. Variants fall
//! into two classes: validation failures, raised at function entry before any work is
//! done, and numerical failures, raised from inside the iterative solvers.

use thiserror::Error;

/// The error type for the eigen solvers and the PCA pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("expected an array of rank {expected}, got rank {actual}")]
    InvalidRank { expected: usize, actual: usize },

    #[error("expected a square matrix, got shape ({rows}, {cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("cannot reshape array of shape {shape:?} into a vector: more than one non-unit dimension")]
    AmbiguousReshape { shape: Vec<usize> },

    #[error("input array is empty")]
    EmptyInput,

    #[error("at least {required} samples are required, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("at least {required} dimensions are required, got {actual}")]
    InsufficientDimensions { required: usize, actual: usize },

    #[error("input contains NaN or infinite values")]
    NonFiniteInput,

    #[error("{method} did not converge after {iterations} iterations (last residual {residual:e})")]
    NonConvergence {
        method: &'static str,
        iterations: usize,
        residual: f64,
    },

    #[error("shifted matrix A - {eigenvalue}I is singular")]
    SingularSystem { eigenvalue: f64 },

    #[error("eigenvector is ill-conditioned: {reason}")]
    IllConditionedEigenvector { reason: String },
}

impl LinalgError {
    /// Returns `true` for shape, rank and input-content failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LinalgError::InvalidRank { .. }
                | LinalgError::NotSquare { .. }
                | LinalgError::DimensionMismatch { .. }
                | LinalgError::AmbiguousReshape { .. }
                | LinalgError::EmptyInput
                | LinalgError::InsufficientSamples { .. }
                | LinalgError::InsufficientDimensions { .. }
                | LinalgError::NonFiniteInput
        )
    }

    /// Returns `true` for failures detected while iterating or factorizing.
    pub fn is_numerical(&self) -> bool {
        !self.is_validation()
    }
}

pub type Result<T> = std::result::Result<T, LinalgError>;
