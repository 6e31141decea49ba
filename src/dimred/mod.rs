//! # Dimensionality Reduction
//!
//! This module reduces high-dimensional data to two dimensions for easy visualization,
//! e.g. via plotting.
//!
//! ## Currently Available
//! - **PCA** ([`pca`]): two-component Principal Component Analysis. The first axis comes
//!   from power iteration on the covariance matrix; the second from Wielandt deflation,
//!   a second power iteration and inverse iteration.

pub mod pca;
