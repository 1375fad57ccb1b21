//! Centroid initialization
//!
//! k-means++ seeding: the first centroid is a uniformly random site, each
//! further centroid is a site drawn with probability proportional to its
//! squared distance from the nearest centroid chosen so far. Sites that
//! coincide with a chosen centroid have weight 0, so the k initial
//! centroids always sit at distinct sites with distinct values.

use crate::error::{ClusterError, ClusterResult};
use pixseg_core::PixelGrid;
use pixseg_core::vector::{squared_distance, to_f64};
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::collections::HashSet;

/// Build the generator for one run
///
/// A fixed seed makes the run reproducible; without one the generator is
/// seeded from the thread-local RNG.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Count distinct sample vectors, stopping once `limit` have been seen
///
/// `-0.0` and `0.0` count as the same value.
pub(crate) fn count_distinct(grid: &PixelGrid, limit: usize) -> usize {
    let mut seen: HashSet<Vec<u32>> = HashSet::new();
    for sample in grid.samples() {
        let key = sample
            .iter()
            .map(|&v| if v == 0.0 { 0u32 } else { v.to_bits() })
            .collect();
        seen.insert(key);
        if seen.len() >= limit {
            break;
        }
    }
    seen.len()
}

/// Uniform index in `0..n`
fn uniform_index(rng: &mut StdRng, n: usize) -> usize {
    let u: f64 = StandardUniform.sample(rng);
    ((u * n as f64) as usize).min(n - 1)
}

/// Choose `k` initial centroids with k-means++ seeding
pub(crate) fn plus_plus(
    grid: &PixelGrid,
    k: usize,
    rng: &mut StdRng,
) -> ClusterResult<Vec<Vec<f64>>> {
    let bands = grid.bands();
    let first = uniform_index(rng, grid.len());
    let mut centroids = vec![to_f64(grid.sample_at(first))];

    let mut nearest: Vec<f64> = grid
        .as_slice()
        .par_chunks_exact(bands)
        .map(|s| squared_distance(s, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let next = weighted_pick(&nearest, rng).ok_or(ClusterError::InsufficientUniqueValues {
            requested: k,
            available: centroids.len(),
        })?;
        let centroid = to_f64(grid.sample_at(next));

        nearest
            .par_iter_mut()
            .zip(grid.as_slice().par_chunks_exact(bands))
            .for_each(|(d, s)| *d = d.min(squared_distance(s, &centroid)));

        centroids.push(centroid);
    }

    Ok(centroids)
}

/// Draw an index with probability proportional to `weights`
///
/// Returns `None` when every weight is zero.
fn weighted_pick(weights: &[f64], rng: &mut StdRng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        let u: f64 = StandardUniform.sample(rng);
        let target = u * total;
        let mut acc = 0.0;
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            acc += w;
            last = Some(i);
            if acc > target {
                return Some(i);
            }
        }
        return last;
    }
    // Degenerate weights (underflow or overflow): take the first site that
    // is not already a centroid.
    weights.iter().position(|&w| w > 0.0)
}
