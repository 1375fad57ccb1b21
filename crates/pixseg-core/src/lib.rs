//! pixseg Core - Basic data structures for pixel segmentation
//!
//! This crate provides the fundamental data structures shared by the
//! segmentation engines:
//!
//! - [`PixelGrid`] - Dense 2D/3D grid of multi-band `f32` samples
//! - [`LabelGrid`] - Integer label plane of the same shape
//! - [`GridShape`] - Spatial extent and site indexing
//! - [`ConnectivityType`] / [`Neighborhood`] - Site adjacency
//! - [`CancelToken`] - Cooperative cancellation flag
//! - [`vector`] - Band-vector distance and accumulation helpers

pub mod cancel;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod vector;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use grid::label::{LabelGrid, UNASSIGNED};
pub use grid::{GridShape, PixelGrid};
pub use neighbors::{ConnectivityType, DEFAULT_CONNECTIVITY, Neighborhood};
