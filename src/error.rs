use thiserror::Error;

/// Errors reported by the extraction stages.
///
/// Degenerate but well-defined outcomes (empty rings, isolated nodes,
/// zero-length edges) are regular results and never map to an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("grid has zero dimension ({width}x{height})")]
    ZeroDimension { width: usize, height: usize },

    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("reference array is not sorted ascending at index {index}")]
    UnsortedReference { index: usize },

    #[error("thinning did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("graph topology inconsistent: {0}")]
    Topology(String),
}

pub type Result<T> = std::result::Result<T, Error>;
