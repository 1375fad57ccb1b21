//! Error types for pixseg-cluster

use thiserror::Error;

/// Errors that can occur during pixel clustering
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixseg_core::Error),

    /// Fewer distinct sample vectors than requested clusters
    #[error("insufficient unique values: {requested} clusters requested, {available} distinct values")]
    InsufficientUniqueValues { requested: usize, available: usize },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Iteration cap reached before the centroids settled
    #[error("did not converge after {iterations} iterations (last shift {shift})")]
    DidNotConverge { iterations: usize, shift: f64 },

    /// The run was cancelled through its token
    #[error("clustering cancelled")]
    Cancelled,
}

/// Result type for clustering operations
pub type ClusterResult<T> = Result<T, ClusterError>;
