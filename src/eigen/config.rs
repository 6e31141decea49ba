use crate::eigen::deflation::DeflationWeights;

/// Convergence tolerance shared by power and inverse iteration.
pub const TOLERANCE: f64 = 1e-8;

/// Added to every norm before dividing by it.
pub const NORM_GUARD: f64 = 1e-16;

/// Default iteration cap of the iterative solvers.
pub const MAX_ITERATIONS: usize = 10_000;

/// Numeric parameters of the iterative eigen solvers.
///
/// Defaults match [`TOLERANCE`] and [`NORM_GUARD`]; use [`IterationConfigBuilder`] to
/// change individual values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationConfig {
    pub(crate) tolerance: f64,
    pub(crate) norm_guard: f64,
    pub(crate) max_iterations: usize,
    pub(crate) zero_threshold: f64,
    pub(crate) singular_threshold: f64,
    pub(crate) shift_perturbation: f64,
    pub(crate) max_shift_attempts: usize,
    pub(crate) deflation: DeflationWeights,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            norm_guard: NORM_GUARD,
            max_iterations: MAX_ITERATIONS,
            zero_threshold: 1e-4,
            singular_threshold: 1e-14,
            shift_perturbation: 1e-10,
            max_shift_attempts: 3,
            deflation: DeflationWeights::default(),
        }
    }
}

impl IterationConfig {
    pub fn builder() -> IterationConfigBuilder {
        IterationConfigBuilder::new()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn norm_guard(&self) -> f64 {
        self.norm_guard
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn zero_threshold(&self) -> f64 {
        self.zero_threshold
    }

    pub fn singular_threshold(&self) -> f64 {
        self.singular_threshold
    }

    pub fn shift_perturbation(&self) -> f64 {
        self.shift_perturbation
    }

    pub fn max_shift_attempts(&self) -> usize {
        self.max_shift_attempts
    }

    pub fn deflation(&self) -> DeflationWeights {
        self.deflation
    }
}

/// Builder for [`IterationConfig`].
///
/// # Example Usage
/// ```ignore
/// let config = IterationConfig::builder()
///     .tolerance(1e-10)
///     .max_iterations(500)
///     .deflation(DeflationWeights::Reciprocal)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct IterationConfigBuilder {
    config: IterationConfig,
}

impl IterationConfigBuilder {
    /// Creates a new builder with default parameters.
    ///
    /// Default values:
    /// - `tolerance`: 1e-8
    /// - `norm_guard`: 1e-16
    /// - `max_iterations`: 10 000
    /// - `zero_threshold`: 1e-4 (relative to the largest vector entry)
    /// - `singular_threshold`: 1e-14 (relative to the largest matrix entry)
    /// - `shift_perturbation`: 1e-10 (relative to the eigenvalue or the largest matrix entry)
    /// - `max_shift_attempts`: 3
    /// - `deflation`: [`DeflationWeights::Orthogonal`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stopping threshold for the sign-blind distance between successive iterates.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    pub fn norm_guard(mut self, norm_guard: f64) -> Self {
        self.config.norm_guard = norm_guard;
        self
    }

    /// Iterations after which power and inverse iteration give up with
    /// [`LinalgError::NonConvergence`](crate::LinalgError::NonConvergence).
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Vector entries at or below `zero_threshold * max|v|` are treated as zero.
    pub fn zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.config.zero_threshold = zero_threshold;
        self
    }

    /// Smallest LU pivot, relative to the largest matrix entry, for which a shifted
    /// matrix still counts as invertible.
    pub fn singular_threshold(mut self, singular_threshold: f64) -> Self {
        self.config.singular_threshold = singular_threshold;
        self
    }

    /// Relative amount by which inverse iteration moves an eigenvalue estimate that
    /// makes the shifted matrix singular. Grows tenfold with every attempt.
    pub fn shift_perturbation(mut self, shift_perturbation: f64) -> Self {
        self.config.shift_perturbation = shift_perturbation;
        self
    }

    pub fn max_shift_attempts(mut self, max_shift_attempts: usize) -> Self {
        self.config.max_shift_attempts = max_shift_attempts;
        self
    }

    pub fn deflation(mut self, deflation: DeflationWeights) -> Self {
        self.config.deflation = deflation;
        self
    }

    pub fn build(self) -> IterationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IterationConfig::default();
        assert_eq!(config.tolerance(), TOLERANCE);
        assert_eq!(config.norm_guard(), NORM_GUARD);
        assert_eq!(config.max_iterations(), MAX_ITERATIONS);
        assert_eq!(config.deflation(), DeflationWeights::Orthogonal);
        assert_eq!(IterationConfigBuilder::new().build(), config);
    }

    #[test]
    fn test_builder_overrides() {
        let config = IterationConfig::builder()
            .tolerance(1e-10)
            .max_iterations(25)
            .max_shift_attempts(0)
            .deflation(DeflationWeights::Reciprocal)
            .build();

        assert_eq!(config.tolerance(), 1e-10);
        assert_eq!(config.max_iterations(), 25);
        assert_eq!(config.max_shift_attempts(), 0);
        assert_eq!(config.deflation(), DeflationWeights::Reciprocal);
        assert_eq!(config.norm_guard(), NORM_GUARD);
    }
}
