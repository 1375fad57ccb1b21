//! Lloyd iteration steps
//!
//! The assignment step only reads the current centroids, so sites are
//! assigned in parallel. The update step accumulates per-block partial
//! sums in parallel and merges them in block order, which keeps the
//! floating-point result independent of the thread count.

use pixseg_core::PixelGrid;
use pixseg_core::vector::{accumulate, squared_distance, squared_distance_f64};
use rayon::prelude::*;

/// Sites per partial-sum block in the update step
const UPDATE_BLOCK: usize = 4096;

/// Nearest centroid of every site
#[derive(Debug, Clone)]
pub(crate) struct Assignment {
    /// Cluster index per site
    pub clusters: Vec<usize>,
    /// Sum of squared distances from each site to its centroid
    pub objective: f64,
}

/// Index of the nearest centroid and the squared distance to it
///
/// Ties go to the lowest index.
#[inline]
fn nearest(sample: &[f32], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(sample, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Assign every site to its nearest centroid
pub(crate) fn assign(grid: &PixelGrid, centroids: &[Vec<f64>]) -> Assignment {
    let (clusters, distances): (Vec<usize>, Vec<f64>) = grid
        .as_slice()
        .par_chunks_exact(grid.bands())
        .map(|s| nearest(s, centroids))
        .unzip();
    Assignment {
        clusters,
        objective: distances.iter().sum(),
    }
}

/// Per-cluster sums over one block of sites
struct Partial {
    sums: Vec<f64>,
    counts: Vec<u64>,
}

/// Recompute centroids as the mean of their assigned sites
///
/// A cluster with no sites keeps its previous centroid. Returns the new
/// centroids and the site count of each cluster.
pub(crate) fn update(
    grid: &PixelGrid,
    assignment: &Assignment,
    previous: &[Vec<f64>],
) -> (Vec<Vec<f64>>, Vec<usize>) {
    let k = previous.len();
    let bands = grid.bands();

    let partials: Vec<Partial> = grid
        .as_slice()
        .par_chunks(UPDATE_BLOCK * bands)
        .zip(assignment.clusters.par_chunks(UPDATE_BLOCK))
        .map(|(samples, clusters)| {
            let mut p = Partial {
                sums: vec![0.0; k * bands],
                counts: vec![0; k],
            };
            for (sample, &c) in samples.chunks_exact(bands).zip(clusters) {
                accumulate(&mut p.sums[c * bands..(c + 1) * bands], sample);
                p.counts[c] += 1;
            }
            p
        })
        .collect();

    let mut sums = vec![0.0; k * bands];
    let mut counts = vec![0u64; k];
    for p in &partials {
        for (s, v) in sums.iter_mut().zip(&p.sums) {
            *s += v;
        }
        for (n, v) in counts.iter_mut().zip(&p.counts) {
            *n += v;
        }
    }

    let centroids = (0..k)
        .map(|c| {
            if counts[c] == 0 {
                return previous[c].clone();
            }
            let n = counts[c] as f64;
            sums[c * bands..(c + 1) * bands]
                .iter()
                .map(|s| s / n)
                .collect()
        })
        .collect();

    (centroids, counts.iter().map(|&n| n as usize).collect())
}

/// Sum of squared distances between corresponding centroids
pub(crate) fn shift(old: &[Vec<f64>], new: &[Vec<f64>]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| squared_distance_f64(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[f32]) -> PixelGrid {
        PixelGrid::from_data(values.len() as u32, 1, 1, values.to_vec()).unwrap()
    }

    #[test]
    fn test_assign_ties_to_lowest_index() {
        let grid = row(&[5.0]);
        let a = assign(&grid, &[vec![4.0], vec![6.0]]);
        assert_eq!(a.clusters, vec![0]);
        assert_eq!(a.objective, 1.0);
    }

    #[test]
    fn test_assign_and_update() {
        let grid = row(&[0.0, 1.0, 2.0, 10.0, 12.0]);
        let centroids = vec![vec![0.0], vec![9.0]];
        let a = assign(&grid, &centroids);
        assert_eq!(a.clusters, vec![0, 0, 0, 1, 1]);
        assert_eq!(a.objective, 0.0 + 1.0 + 4.0 + 1.0 + 9.0);
        let (next, sizes) = update(&grid, &a, &centroids);
        assert_eq!(next, vec![vec![1.0], vec![11.0]]);
        assert_eq!(sizes, vec![3, 2]);
        assert_eq!(shift(&centroids, &next), 1.0 + 4.0);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let grid = row(&[1.0, 2.0]);
        let centroids = vec![vec![1.5], vec![100.0]];
        let a = assign(&grid, &centroids);
        let (next, sizes) = update(&grid, &a, &centroids);
        assert_eq!(sizes, vec![2, 0]);
        assert_eq!(next[1], vec![100.0]);
        assert!(next.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_update_spans_blocks() {
        let n = UPDATE_BLOCK * 2 + 17;
        let values: Vec<f32> = (0..n).map(|i| (i % 2) as f32).collect();
        let grid = PixelGrid::from_data(n as u32, 1, 1, values).unwrap();
        let centroids = vec![vec![0.0], vec![1.0]];
        let a = assign(&grid, &centroids);
        let (next, sizes) = update(&grid, &a, &centroids);
        assert_eq!(sizes[0] + sizes[1], n);
        assert_eq!(next, centroids);
    }
}
