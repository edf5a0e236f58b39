//! Structured error types for divpart.

use thiserror::Error;

/// Unified error type for all divpart operations.
#[derive(Debug, Error)]
pub enum DivpartError {
    /// Value and weight vectors passed to a power mean differ in length.
    #[error("value and weight vectors must be the same length: {values} vs {weights}")]
    LengthMismatch {
        /// Number of values supplied.
        values: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Similarity matrix size does not match the species count.
    #[error("similarity matrix has {len} entries, expected {n_species}x{n_species}")]
    DimensionMismatch {
        /// Length of the similarity matrix slice.
        len: usize,
        /// Number of species implied by the abundance data.
        n_species: usize,
    },

    /// A measure was requested outside its mathematical domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// Every weight in a power mean was (approximately) zero, so the mean
    /// is undefined. Raised explicitly rather than returning NaN.
    #[error("power mean is undefined when all weights are zero")]
    DegenerateWeights,

    /// Invalid input (bad shapes, empty data, out-of-range values).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout divpart.
pub type Result<T> = std::result::Result<T, DivpartError>;
