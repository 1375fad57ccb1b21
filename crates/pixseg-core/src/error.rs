//! Error types for pixseg-core
//!
//! Provides a unified error type for grid construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// pixseg-core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}x{depth}")]
    InvalidDimension { width: u32, height: u32, depth: u32 },

    /// Invalid number of bands per site
    #[error("invalid band count: {0}")]
    InvalidBands(usize),

    /// Sample buffer does not match the grid shape
    #[error("data length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Coordinate outside the grid
    #[error("coordinate out of bounds: ({x}, {y}, {z})")]
    IndexOutOfBounds { x: u32, y: u32, z: u32 },

    /// Vector length does not match the configured band count
    #[error("band mismatch: expected {expected} values, got {actual}")]
    BandMismatch { expected: usize, actual: usize },

    /// Grid shapes differ where they must agree
    #[error("shape mismatch: expected {}x{}x{}, got {}x{}x{}",
        .expected.0, .expected.1, .expected.2, .actual.0, .actual.1, .actual.2)]
    ShapeMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pixseg-core operations
pub type Result<T> = std::result::Result<T, Error>;
