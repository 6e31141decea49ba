pub mod dimred;
pub mod eigen;
pub mod error;
pub mod statistics;
pub mod utils;
mod dense;

pub use dimred::pca::{reduce_to_2d, reduce_to_2d_with, Pca2D, Pca2DBuilder};
pub use eigen::{
    deflate, dominant_eigenpair, eigenvalue_from_vector, eigenvector_from_value,
    top_eigenvector, DeflationWeights, Eigenpair, IterationConfig, IterationConfigBuilder,
    NORM_GUARD, TOLERANCE,
};
pub use error::LinalgError;
pub use statistics::covariance;
pub use utils::VectorOps;
