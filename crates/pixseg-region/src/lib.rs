//! pixseg-region - Seeded region growing
//!
//! This crate provides seeded region growing (SRG): every site of a
//! scalar or multi-band grid is assigned to one of several seeded regions
//! by growing all regions outward together, always absorbing the most
//! similar boundary site in the whole grid next.
//!
//! - **Seed sets** - Regions declared by seed coordinates or a seed mask
//! - **Region statistics** - Running point count and mean per region
//! - **Candidate queue** - Globally ordered boundary sites with a fixed
//!   tie-break order
//! - **Growth engine** - Deterministic, sequential, cancellable
//!
//! A candidate is scored once, against the regions bordering it when it
//! is first reached, and keeps that choice. The outcome therefore depends
//! on where the seeds sit: in the example below, moving the bright seed to
//! the block's upper-left site `(2, 2)` lets the bright region take the
//! dark sites `(2, 1)` and `(1, 2)` as well.
//!
//! # Examples
//!
//! ```
//! use pixseg_core::PixelGrid;
//! use pixseg_region::{GrowOptions, Seed, SeedSet, seeded_region_growing};
//!
//! // Dark background with a bright 2x2 block in the lower right
//! let mut data = vec![0.0f32; 16];
//! for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
//!     data[y * 4 + x] = 200.0;
//! }
//! let grid = PixelGrid::from_data(4, 4, 1, data).unwrap();
//!
//! let mut seeds = SeedSet::new();
//! let dark = seeds.add_region([Seed::new(0, 3)]);
//! let bright = seeds.add_region([Seed::new(2, 3)]);
//!
//! let result = seeded_region_growing(&grid, &seeds, &GrowOptions::default()).unwrap();
//! assert_eq!(result.labels.get(1, 2, 0).unwrap(), dark);
//! assert_eq!(result.labels.get(3, 2, 0).unwrap(), bright);
//! assert_eq!(result.labels.count(bright), 4);
//! ```

pub mod error;
pub mod grow;
pub mod queue;
pub mod seed;
pub mod stats;

// Re-export core types
pub use pixseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export growth types and functions
pub use grow::{
    GrowOptions, GrowthResult, GrowthStep, seeded_region_growing,
    seeded_region_growing_with_observer,
};

// Re-export seed types
pub use seed::{MAX_REGIONS, Seed, SeedSet};

// Re-export statistics and queue types
pub use queue::{Candidate, CandidateQueue};
pub use stats::RegionStatistic;
