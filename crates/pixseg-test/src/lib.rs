//! pixseg-test - Regression test framework for pixseg
//!
//! This crate provides a small regression test harness plus synthetic
//! grids shared by the engine crates' tests. Two modes are supported:
//!
//! - **Compare**: Check values and label grids, collecting failures
//! - **Display**: Same checks, and also print label grids for inspection
//!
//! # Usage
//!
//! ```
//! use pixseg_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
