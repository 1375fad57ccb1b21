//! pixseg - Seeded region growing and k-means pixel clustering
//!
//! Two segmentation engines over dense 2D/3D sample grids:
//!
//! - [`region`] - Seeded region growing: regions grow outward from
//!   operator-supplied seeds, always absorbing the most similar boundary
//!   site in the whole grid next
//! - [`cluster`] - K-means clustering with k-means++ seeding
//!
//! Both read a [`PixelGrid`] and produce a [`LabelGrid`] of the same
//! shape.
//!
//! # Example
//!
//! ```
//! use pixseg::PixelGrid;
//! use pixseg::cluster::{KMeansOptions, kmeans_cluster};
//! use pixseg::region::{GrowOptions, SeedSet, seeded_region_growing};
//!
//! let grid = PixelGrid::from_data(4, 1, 1, vec![0.0, 1.0, 9.0, 10.0]).unwrap();
//!
//! let mut seeds = SeedSet::new();
//! seeds.add_region([(0, 0)]);
//! seeds.add_region([(3, 0)]);
//! let grown = seeded_region_growing(&grid, &seeds, &GrowOptions::default()).unwrap();
//!
//! let clustered = kmeans_cluster(&grid, &KMeansOptions::new(2).with_seed(1)).unwrap();
//! assert_eq!(grown.labels.get_at(0), grown.labels.get_at(1));
//! assert_eq!(clustered.labels.get_at(2), clustered.labels.get_at(3));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixseg_core::*;

// Re-export engine crates as modules to avoid name conflicts
pub use pixseg_cluster as cluster;
pub use pixseg_region as region;
