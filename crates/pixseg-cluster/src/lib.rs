//! pixseg-cluster - K-means pixel clustering
//!
//! This crate partitions the sample vectors of a scalar or multi-band
//! grid into K clusters:
//!
//! - **k-means++ seeding** - Spread-out initial centroids at distinct sites
//! - **Lloyd iteration** - Parallel assignment, race-free centroid update
//! - **Convergence control** - Tolerance on centroid movement plus an
//!   iteration cap
//!
//! # Examples
//!
//! ```
//! use pixseg_core::PixelGrid;
//! use pixseg_cluster::{KMeansOptions, kmeans_cluster};
//!
//! // Two well separated color groups
//! let rgb: Vec<u8> = [[250, 10, 10], [245, 12, 8], [10, 10, 250], [12, 8, 245]]
//!     .iter()
//!     .flatten()
//!     .copied()
//!     .collect();
//! let grid = PixelGrid::from_u8(2, 2, 3, &rgb).unwrap();
//!
//! let options = KMeansOptions::new(2).with_seed(7);
//! let result = kmeans_cluster(&grid, &options).unwrap();
//! assert_eq!(result.labels.get_at(0), result.labels.get_at(1));
//! assert_ne!(result.labels.get_at(0), result.labels.get_at(2));
//! ```

pub mod error;
pub mod kmeans;

// Re-export core types
pub use pixseg_core;

// Re-export error types
pub use error::{ClusterError, ClusterResult};

// Re-export k-means types and functions
pub use kmeans::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, KMeansInit, KMeansOptions, KMeansResult,
    kmeans_cluster,
};
