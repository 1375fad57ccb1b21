//! Error types for pixseg-region

use thiserror::Error;

/// Errors that can occur during seeded region growing
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixseg_core::Error),

    /// Two regions claim the same seed site
    #[error("conflicting seed at ({x}, {y}, {z}): claimed by regions {first} and {second}")]
    ConflictingSeed {
        x: u32,
        y: u32,
        z: u32,
        first: u32,
        second: u32,
    },

    /// A declared region has no seeds
    #[error("region {region} has no seeds")]
    EmptyRegion { region: u32 },

    /// No regions were declared
    #[error("no regions declared")]
    NoRegions,

    /// Seed position outside the grid
    #[error("invalid seed position: ({x}, {y}, {z})")]
    InvalidSeed { x: u32, y: u32, z: u32 },

    /// More regions than the label type can represent
    #[error("too many regions: {count} (max {max})")]
    TooManyRegions { count: usize, max: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The run was cancelled through its token
    #[error("region growing cancelled")]
    Cancelled,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
