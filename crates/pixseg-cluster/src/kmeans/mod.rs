//! K-means pixel clustering
//!
//! Partitions the sample vectors of a [`PixelGrid`] into K clusters with
//! Lloyd's algorithm:
//!
//! 1. **Initialize**: k-means++ seeding, or caller-supplied centroids
//! 2. **Assign**: every site goes to its nearest centroid (squared
//!    Euclidean distance in band space, lowest index on ties)
//! 3. **Update**: every centroid becomes the mean of its sites; an empty
//!    cluster keeps its previous centroid
//! 4. **Check**: stop once the summed squared centroid movement drops
//!    below the tolerance, or fail after `max_iterations`
//!
//! All sums are accumulated in `f64`.

mod init;
mod lloyd;

use crate::error::{ClusterError, ClusterResult};
use log::{debug, trace, warn};
use pixseg_core::vector::check_bands;
use pixseg_core::{CancelToken, LabelGrid, PixelGrid};

// =============================================================================
// Constants
// =============================================================================

/// Default convergence threshold on summed squared centroid movement
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

// =============================================================================
// Options
// =============================================================================

/// How the initial centroids are chosen
#[derive(Debug, Clone, Default, PartialEq)]
pub enum KMeansInit {
    /// k-means++ seeding from the grid's own samples
    #[default]
    PlusPlus,
    /// Start from these centroids (one vector of `bands` values each)
    Centroids(Vec<Vec<f64>>),
}

/// Options for k-means clustering
#[derive(Debug, Clone)]
pub struct KMeansOptions {
    /// Number of clusters (K >= 1)
    pub num_clusters: usize,

    /// Convergence threshold
    ///
    /// Iteration stops once the sum over clusters of the squared distance
    /// between old and new centroid is below this value. Must be positive.
    pub tolerance: f64,

    /// Maximum number of iterations before failing with `DidNotConverge`
    pub max_iterations: usize,

    /// Random seed for k-means++; `None` draws a fresh seed
    pub seed: Option<u64>,

    /// Initialization strategy
    pub init: KMeansInit,

    /// Polled once per iteration; cancels the run when set
    pub cancel: Option<CancelToken>,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            num_clusters: 2,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            init: KMeansInit::PlusPlus,
            cancel: None,
        }
    }
}

impl KMeansOptions {
    /// Create options for `num_clusters` clusters
    pub fn new(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            ..Default::default()
        }
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start from the given centroids instead of k-means++
    pub fn with_centroids(mut self, centroids: Vec<Vec<f64>>) -> Self {
        self.init = KMeansInit::Centroids(centroids);
        self
    }

    /// Set the cancellation token
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn validate(&self, bands: usize) -> ClusterResult<()> {
        if self.num_clusters < 1 {
            return Err(ClusterError::InvalidConfiguration(
                "num_clusters must be at least 1".into(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ClusterError::InvalidConfiguration(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ClusterError::InvalidConfiguration(
                "max_iterations must be at least 1".into(),
            ));
        }
        if let KMeansInit::Centroids(centroids) = &self.init {
            if centroids.len() != self.num_clusters {
                return Err(ClusterError::InvalidConfiguration(format!(
                    "{} initial centroids supplied for {} clusters",
                    centroids.len(),
                    self.num_clusters
                )));
            }
            for c in centroids {
                check_bands(bands, c.len())?;
                if c.iter().any(|v| !v.is_finite()) {
                    return Err(ClusterError::InvalidConfiguration(
                        "initial centroids must be finite".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Result
// =============================================================================

/// Output of a k-means run
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster label per site, `1..=K` (cluster index + 1)
    pub labels: LabelGrid,
    /// Final centroids, indexed by `label - 1`
    pub centroids: Vec<Vec<f64>>,
    /// Number of Lloyd iterations performed
    pub iterations: usize,
    /// Sum of squared assignment distances at each iteration
    pub objective_history: Vec<f64>,
    /// Sum of squared distances from each site to its final centroid
    pub inertia: f64,
    /// Number of sites per cluster, indexed by `label - 1`
    pub cluster_sizes: Vec<usize>,
}

impl KMeansResult {
    /// Number of clusters
    pub fn num_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Centroid of one cluster by label
    pub fn centroid(&self, label: u32) -> Option<&[f64]> {
        (label as usize)
            .checked_sub(1)
            .and_then(|i| self.centroids.get(i))
            .map(Vec::as_slice)
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Cluster the sites of a grid into K groups
///
/// # Arguments
///
/// * `grid` - Scalar or multi-band input
/// * `options` - Cluster count, convergence and initialization settings
///
/// # Errors
///
/// - `InvalidConfiguration` for K < 1, a non-positive tolerance, a zero
///   iteration cap, or malformed initial centroids
/// - `InsufficientUniqueValues` when the grid has fewer distinct sample
///   vectors than K
/// - `DidNotConverge` when `max_iterations` is reached
/// - `Cancelled` when the token fires
///
/// # Example
///
/// ```
/// use pixseg_core::PixelGrid;
/// use pixseg_cluster::{KMeansOptions, kmeans_cluster};
///
/// let grid = PixelGrid::from_data(6, 1, 1, vec![10.0, 11.0, 12.0, 200.0, 201.0, 202.0]).unwrap();
/// let result = kmeans_cluster(&grid, &KMeansOptions::new(2).with_seed(42)).unwrap();
///
/// let low = result.labels.get_at(0);
/// assert!((result.centroid(low).unwrap()[0] - 11.0).abs() < 1e-9);
/// assert_eq!(result.cluster_sizes, vec![3, 3]);
/// ```
pub fn kmeans_cluster(grid: &PixelGrid, options: &KMeansOptions) -> ClusterResult<KMeansResult> {
    options.validate(grid.bands())?;
    let k = options.num_clusters;

    let available = init::count_distinct(grid, k);
    if available < k {
        return Err(ClusterError::InsufficientUniqueValues {
            requested: k,
            available,
        });
    }

    debug!(
        "k-means: {}x{}x{} grid, {} bands, {} clusters, tolerance {}",
        grid.width(),
        grid.height(),
        grid.depth(),
        grid.bands(),
        k,
        options.tolerance
    );

    let mut centroids = match &options.init {
        KMeansInit::PlusPlus => {
            let mut rng = init::make_rng(options.seed);
            init::plus_plus(grid, k, &mut rng)?
        }
        KMeansInit::Centroids(centroids) => centroids.clone(),
    };

    let mut objective_history = Vec::new();
    let mut last_shift = f64::INFINITY;
    let mut converged = false;

    for iteration in 1..=options.max_iterations {
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            warn!("k-means cancelled at iteration {}", iteration);
            return Err(ClusterError::Cancelled);
        }

        let assignment = lloyd::assign(grid, &centroids);
        objective_history.push(assignment.objective);

        let (next, sizes) = lloyd::update(grid, &assignment, &centroids);
        if let Some(empty) = sizes.iter().position(|&n| n == 0) {
            warn!(
                "k-means iteration {}: cluster {} is empty, keeping its centroid",
                iteration, empty
            );
        }

        last_shift = lloyd::shift(&centroids, &next);
        centroids = next;
        trace!(
            "k-means iteration {}: objective {}, shift {}",
            iteration, assignment.objective, last_shift
        );

        if last_shift < options.tolerance {
            converged = true;
            break;
        }
    }

    let iterations = objective_history.len();
    if !converged {
        warn!(
            "k-means did not converge in {} iterations (shift {})",
            iterations, last_shift
        );
        return Err(ClusterError::DidNotConverge {
            iterations,
            shift: last_shift,
        });
    }

    let last = lloyd::assign(grid, &centroids);
    let mut cluster_sizes = vec![0usize; k];
    let mut labels = LabelGrid::new(grid.shape());
    for (site, &c) in last.clusters.iter().enumerate() {
        labels.set_at(site, c as u32 + 1);
        cluster_sizes[c] += 1;
    }

    debug!(
        "k-means converged in {} iterations, inertia {}",
        iterations, last.objective
    );

    Ok(KMeansResult {
        labels,
        centroids,
        iterations,
        objective_history,
        inertia: last.objective,
        cluster_sizes,
    })
}
