//! Error types for gridscan-core.

use thiserror::Error;

/// Result type alias for gridscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when validating inputs to a clustering run.
///
/// Allocation failure is deliberately not a variant here: Rust's global
/// allocator already aborts the process on an allocation failure, which
/// matches the fatal-on-OOM policy of the algorithm this crate is based
/// on. There is no recoverable path to model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// `x`, `y`, or `z` arrays do not all have the same length as the point count.
    #[error("coordinate arrays have mismatched lengths: x={x}, y={y}, z={z:?}")]
    MismatchedLengths {
        x: usize,
        y: usize,
        z: Option<usize>,
    },

    /// Input point set is empty (`n == 0`).
    #[error("point set is empty")]
    EmptyInput,

    /// `dim` was `Three` but no `z` array was supplied.
    #[error("z coordinates required for 3D input but none were provided")]
    MissingZ,

    /// `eps` was not strictly positive.
    #[error("eps must be positive, got {0}")]
    NonPositiveEpsilon(f64),

    /// `min_points` was zero.
    #[error("min_points must be at least 1")]
    NonPositiveMinPoints,

    /// The label output slice did not match the point count.
    #[error("labels slice has length {labels} but there are {points} points")]
    LabelLengthMismatch { labels: usize, points: usize },

    /// `k` (number of requested centroids) was zero or exceeded the point count.
    #[error("k must be in 1..=n (k={k}, n={n})")]
    InvalidK { k: usize, n: usize },
}
