//! K-means clustering regression test
//!
//! Checks the Lloyd loop end to end:
//! 1. Two well separated scalar groups
//! 2. Degenerate input and bad configurations
//! 3. Objective history, reproducibility and restart from a solution
//! 4. Multi-band and volumetric grids
//!
//! Run with:
//! ```
//! cargo test -p pixseg-cluster --test kmeans_reg
//! ```

use pixseg_cluster::{ClusterError, KMeansOptions, kmeans_cluster};
use pixseg_core::{CancelToken, PixelGrid};
use pixseg_test::RegParams;
use pixseg_test::fixtures::{QUADRANT_COLORS, quadrant_rgb_grid, row_grid, wave_grid};

// ============================================================================
// Separated groups
// ============================================================================

#[test]
fn kmeans_two_groups_reg() {
    let mut rp = RegParams::new("kmeans_two_groups");

    let grid = row_grid(&[10.0, 11.0, 12.0, 200.0, 201.0, 202.0]).unwrap();
    let result = kmeans_cluster(&grid, &KMeansOptions::new(2).with_seed(42)).unwrap();

    rp.compare_values(1.0, if result.iterations <= 3 { 1.0 } else { 0.0 }, 0.0);

    let low = result.labels.get_at(0);
    let high = result.labels.get_at(5);
    rp.compare_values(1.0, if low != high { 1.0 } else { 0.0 }, 0.0);
    for site in 0..3 {
        rp.compare_values(low as f64, result.labels.get_at(site) as f64, 0.0);
        rp.compare_values(high as f64, result.labels.get_at(site + 3) as f64, 0.0);
    }
    rp.compare_values(11.0, result.centroid(low).unwrap()[0], 1e-9);
    rp.compare_values(201.0, result.centroid(high).unwrap()[0], 1e-9);
    rp.compare_values(3.0, result.cluster_sizes[low as usize - 1] as f64, 0.0);
    rp.compare_values(4.0, result.inertia, 1e-9);

    assert!(rp.cleanup(), "kmeans_two_groups regression test failed");
}

// ============================================================================
// Degenerate input
// ============================================================================

#[test]
fn kmeans_errors_reg() {
    // Constant grid cannot be split in two
    let grid = PixelGrid::from_data(3, 3, 1, vec![7.0; 9]).unwrap();
    assert!(matches!(
        kmeans_cluster(&grid, &KMeansOptions::new(2).with_seed(1)),
        Err(ClusterError::InsufficientUniqueValues {
            requested: 2,
            available: 1
        })
    ));

    // A single cluster always works
    let result = kmeans_cluster(&grid, &KMeansOptions::new(1).with_seed(1)).unwrap();
    assert_eq!(result.centroids, vec![vec![7.0]]);
    assert_eq!(result.cluster_sizes, vec![9]);
    assert!(result.labels.as_slice().iter().all(|&l| l == 1));

    let grid = row_grid(&[0.0, 1.0, 2.0]).unwrap();
    for options in [
        KMeansOptions::new(0),
        KMeansOptions::new(2).with_tolerance(0.0),
        KMeansOptions::new(2).with_tolerance(f64::NAN),
        KMeansOptions::new(2).with_max_iterations(0),
        KMeansOptions::new(2).with_centroids(vec![vec![0.0]]),
        KMeansOptions::new(2).with_centroids(vec![vec![0.0], vec![f64::INFINITY]]),
    ] {
        assert!(matches!(
            kmeans_cluster(&grid, &options),
            Err(ClusterError::InvalidConfiguration(_))
        ));
    }

    // Band count of supplied centroids must match the grid
    let options = KMeansOptions::new(2).with_centroids(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
    assert!(matches!(
        kmeans_cluster(&grid, &options),
        Err(ClusterError::Core(_))
    ));

    // Iteration cap reached
    let wave = wave_grid(32, 0).unwrap();
    let options = KMeansOptions::new(4)
        .with_seed(3)
        .with_tolerance(1e-12)
        .with_max_iterations(1);
    assert!(matches!(
        kmeans_cluster(&wave, &options),
        Err(ClusterError::DidNotConverge { iterations: 1, .. })
    ));

    // Cancelled before the first iteration
    let token = CancelToken::new();
    token.cancel();
    let options = KMeansOptions::new(2).with_seed(1).with_cancel(token);
    assert!(matches!(
        kmeans_cluster(&wave, &options),
        Err(ClusterError::Cancelled)
    ));
}

// ============================================================================
// Convergence behavior
// ============================================================================

fn wave_options() -> KMeansOptions {
    KMeansOptions::new(4)
        .with_seed(11)
        .with_tolerance(1e-6)
        .with_max_iterations(500)
}

#[test]
fn kmeans_objective_reg() {
    let mut rp = RegParams::new("kmeans_objective");

    let grid = wave_grid(32, 0).unwrap();
    let result = kmeans_cluster(&grid, &wave_options()).unwrap();

    rp.compare_values(
        result.iterations as f64,
        result.objective_history.len() as f64,
        0.0,
    );
    let mut increases = 0usize;
    for pair in result.objective_history.windows(2) {
        if pair[1] > pair[0] + 1e-9 * pair[0].max(1.0) {
            increases += 1;
        }
    }
    rp.compare_values(0.0, increases as f64, 0.0);

    // Final inertia is no worse than the last recorded assignment
    let last = result.objective_history.last().copied().unwrap_or(f64::INFINITY);
    rp.compare_values(1.0, if result.inertia <= last + 1e-9 * last { 1.0 } else { 0.0 }, 0.0);

    // Sizes agree with the label plane
    let counts = result.labels.label_counts();
    for (i, &size) in result.cluster_sizes.iter().enumerate() {
        rp.compare_values(counts[i + 1] as f64, size as f64, 0.0);
    }
    rp.compare_values(grid.len() as f64, result.cluster_sizes.iter().sum::<usize>() as f64, 0.0);

    assert!(rp.cleanup(), "kmeans_objective regression test failed");
}

#[test]
fn kmeans_reproducible_reg() {
    let mut rp = RegParams::new("kmeans_reproducible");

    let grid = wave_grid(32, 1).unwrap();
    let first = kmeans_cluster(&grid, &wave_options()).unwrap();
    let second = kmeans_cluster(&grid, &wave_options()).unwrap();

    rp.compare_labels(&first.labels, &second.labels);
    rp.compare_values(first.iterations as f64, second.iterations as f64, 0.0);
    for (a, b) in first.centroids.iter().zip(&second.centroids) {
        rp.compare_values(a[0], b[0], 0.0);
    }

    assert!(rp.cleanup(), "kmeans_reproducible regression test failed");
}

#[test]
fn kmeans_restart_reg() {
    let mut rp = RegParams::new("kmeans_restart");

    // Restarting from a converged solution changes nothing
    let grid = wave_grid(32, 0).unwrap();
    let first = kmeans_cluster(&grid, &wave_options()).unwrap();
    let options = wave_options().with_centroids(first.centroids.clone());
    let second = kmeans_cluster(&grid, &options).unwrap();

    rp.compare_values(1.0, if second.iterations <= 2 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_labels(&first.labels, &second.labels);
    for (a, b) in first.centroids.iter().zip(&second.centroids) {
        rp.compare_values(a[0], b[0], 1e-6);
    }

    assert!(rp.cleanup(), "kmeans_restart regression test failed");
}

// ============================================================================
// Multi-band and volumetric grids
// ============================================================================

#[test]
fn kmeans_rgb_quadrants_reg() {
    let mut rp = RegParams::new("kmeans_rgb_quadrants");

    let (w, h) = (16u32, 16u32);
    let grid = quadrant_rgb_grid(w, h, 5.0, 7).unwrap();
    let result = kmeans_cluster(&grid, &KMeansOptions::new(4).with_seed(5)).unwrap();
    rp.show_labels("rgb quadrants", &result.labels);

    // Each quadrant maps to one cluster and no two quadrants share one
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
    let quadrant_labels: Vec<u32> = corners
        .iter()
        .map(|&(x, y)| result.labels.get(x, y, 0).unwrap())
        .collect();
    let mut distinct = quadrant_labels.clone();
    distinct.sort_unstable();
    distinct.dedup();
    rp.compare_values(4.0, distinct.len() as f64, 0.0);

    let mut mismatches = 0usize;
    for y in 0..h {
        for x in 0..w {
            let q = usize::from(x >= w / 2) + 2 * usize::from(y >= h / 2);
            if result.labels.get(x, y, 0).unwrap() != quadrant_labels[q] {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);

    // Centroids sit on the base colors
    for (q, &label) in quadrant_labels.iter().enumerate() {
        let centroid = result.centroid(label).unwrap();
        for band in 0..3 {
            rp.compare_values(QUADRANT_COLORS[q][band] as f64, centroid[band], 2.0);
        }
        rp.compare_values(64.0, result.cluster_sizes[label as usize - 1] as f64, 0.0);
    }

    assert!(rp.cleanup(), "kmeans_rgb_quadrants regression test failed");
}

#[test]
fn kmeans_volume_reg() {
    let mut rp = RegParams::new("kmeans_volume");

    // 3x3x2 volume: lower plane near 0, upper plane near 50
    let data: Vec<f32> = (0..18)
        .map(|i| if i < 9 { (i % 3) as f32 } else { 50.0 + (i % 2) as f32 })
        .collect();
    let grid = PixelGrid::from_data_3d(3, 3, 2, 1, data).unwrap();
    let result = kmeans_cluster(&grid, &KMeansOptions::new(2).with_seed(9)).unwrap();

    let lower = result.labels.get(0, 0, 0).unwrap();
    let upper = result.labels.get(0, 0, 1).unwrap();
    rp.compare_values(1.0, if lower != upper { 1.0 } else { 0.0 }, 0.0);
    for y in 0..3 {
        for x in 0..3 {
            rp.compare_values(lower as f64, result.labels.get(x, y, 0).unwrap() as f64, 0.0);
            rp.compare_values(upper as f64, result.labels.get(x, y, 1).unwrap() as f64, 0.0);
        }
    }
    rp.compare_values(1.0, result.centroid(lower).unwrap()[0], 1e-9);

    assert!(rp.cleanup(), "kmeans_volume regression test failed");
}
