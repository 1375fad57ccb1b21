//! Band-vector arithmetic
//!
//! Samples are stored as `f32`, while running sums, means and centroids
//! are kept in `f64` so accumulation over large grids does not drift.

use crate::error::{Error, Result};

/// Fail unless `actual` matches the configured band count
pub fn check_bands(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::BandMismatch { expected, actual });
    }
    Ok(())
}

/// Squared Euclidean distance between a sample and an `f64` vector
#[inline]
pub fn squared_distance(sample: &[f32], center: &[f64]) -> f64 {
    debug_assert_eq!(sample.len(), center.len());
    sample
        .iter()
        .zip(center)
        .map(|(&s, &c)| {
            let d = s as f64 - c;
            d * d
        })
        .sum()
}

/// Squared Euclidean distance between two `f64` vectors
#[inline]
pub fn squared_distance_f64(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between a sample and an `f64` vector
///
/// For single-band data this is the absolute difference.
#[inline]
pub fn distance(sample: &[f32], center: &[f64]) -> f64 {
    squared_distance(sample, center).sqrt()
}

/// Add a sample into a running per-band sum
#[inline]
pub fn accumulate(sum: &mut [f64], sample: &[f32]) {
    debug_assert_eq!(sum.len(), sample.len());
    for (s, &v) in sum.iter_mut().zip(sample) {
        *s += v as f64;
    }
}

/// Widen a sample to `f64`
pub fn to_f64(sample: &[f32]) -> Vec<f64> {
    sample.iter().map(|&v| v as f64).collect()
}
