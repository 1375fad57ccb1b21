//! Seeded region growing
//!
//! Assigns sites of a [`PixelGrid`] to operator-seeded regions by growing
//! every region outward at once, always absorbing the globally most
//! similar boundary site next.
//!
//! Every site is in one of three states, and only ever moves forward:
//!
//! ```text
//! UNASSIGNED -> CANDIDATE -> ASSIGNED(region)
//! ```
//!
//! A site becomes a candidate the first time one of its neighbors is
//! assigned. Its best region and similarity are computed at that moment
//! from the regions already bordering it, and are not re-evaluated when
//! other regions arrive later. Sites no seed can reach keep label 0.
//!
//! The same [`ConnectivityType`] is used for candidate discovery and for
//! scoring.

use crate::error::{RegionError, RegionResult};
use crate::queue::{Candidate, CandidateQueue};
use crate::seed::SeedSet;
use crate::stats::RegionStatistic;
use log::{debug, warn};
use pixseg_core::{
    CancelToken, ConnectivityType, DEFAULT_CONNECTIVITY, LabelGrid, Neighborhood, PixelGrid,
    UNASSIGNED,
};

/// Options for seeded region growing
#[derive(Debug, Clone)]
pub struct GrowOptions {
    /// Connectivity used to discover and score candidates
    pub connectivity: ConnectivityType,
    /// Polled once per absorbed candidate; cancels the run when set
    pub cancel: Option<CancelToken>,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            connectivity: DEFAULT_CONNECTIVITY,
            cancel: None,
        }
    }
}

impl GrowOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the cancellation token
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// One site joining a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthStep {
    /// Linear index of the absorbed site
    pub site: usize,
    /// Label of the region that absorbed it
    pub region: u32,
    /// Region size after the absorption
    pub point_count: u64,
    /// Distance that ranked the site (0 for seeds)
    pub similarity: f64,
    /// Whether the site was a seed
    pub seed: bool,
}

/// Output of a region growing run
#[derive(Debug, Clone)]
pub struct GrowthResult {
    /// Label per site: 0 for unreachable sites, otherwise the region label
    pub labels: LabelGrid,
    /// Final statistics, indexed by `label - 1`
    pub regions: Vec<RegionStatistic>,
    /// Number of sites absorbed, seeds included
    pub steps: usize,
}

impl GrowthResult {
    /// Number of regions
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Final mean vector of every region, indexed by `label - 1`
    pub fn region_means(&self) -> Vec<Vec<f64>> {
        self.regions.iter().map(RegionStatistic::mean).collect()
    }

    /// Statistic of one region by label
    pub fn region(&self, label: u32) -> Option<&RegionStatistic> {
        (label as usize)
            .checked_sub(1)
            .and_then(|i| self.regions.get(i))
    }

    /// Number of sites left unassigned
    pub fn unassigned_count(&self) -> usize {
        self.labels.count(UNASSIGNED)
    }
}

/// Grow the seeded regions over the whole grid
///
/// # Arguments
///
/// * `grid` - Scalar or multi-band input
/// * `seeds` - Regions to grow, each with at least one seed
/// * `options` - Connectivity and cancellation
///
/// # Errors
///
/// Seed problems are reported before any site is labeled:
/// `NoRegions`, `EmptyRegion`, `InvalidSeed`, `ConflictingSeed`,
/// `TooManyRegions`. `Cancelled` is returned if the token fires mid-run.
///
/// # Example
///
/// ```
/// use pixseg_core::PixelGrid;
/// use pixseg_region::{GrowOptions, SeedSet, seeded_region_growing};
///
/// let grid = PixelGrid::from_data(4, 1, 1, vec![0.0, 1.0, 9.0, 10.0]).unwrap();
/// let mut seeds = SeedSet::new();
/// seeds.add_region([(0, 0)]);
/// seeds.add_region([(3, 0)]);
///
/// let result = seeded_region_growing(&grid, &seeds, &GrowOptions::default()).unwrap();
/// assert_eq!(result.labels.as_slice(), &[1, 1, 2, 2]);
/// ```
pub fn seeded_region_growing(
    grid: &PixelGrid,
    seeds: &SeedSet,
    options: &GrowOptions,
) -> RegionResult<GrowthResult> {
    seeded_region_growing_with_observer(grid, seeds, options, |_| {})
}

/// Grow the seeded regions, reporting every absorbed site
///
/// `observer` is called once per site in absorption order, seeds first.
pub fn seeded_region_growing_with_observer<F>(
    grid: &PixelGrid,
    seeds: &SeedSet,
    options: &GrowOptions,
    mut observer: F,
) -> RegionResult<GrowthResult>
where
    F: FnMut(&GrowthStep),
{
    let shape = grid.shape();
    let seed_sites = seeds.resolve(shape)?;

    debug!(
        "region growing: {}x{}x{} grid, {} bands, {} regions, {} seeds",
        shape.width,
        shape.height,
        shape.depth,
        grid.bands(),
        seeds.num_regions(),
        seed_sites.len()
    );

    let mut grower = Grower {
        grid,
        neighborhood: Neighborhood::new(shape, options.connectivity),
        labels: LabelGrid::new(shape),
        queued: vec![false; shape.len()],
        regions: vec![RegionStatistic::new(grid.bands()); seeds.num_regions()],
        queue: CandidateQueue::new(),
        steps: 0,
    };

    for (site, region) in seed_sites {
        grower.absorb(site, region, 0.0, true, &mut observer);
        grower.scan(site);
    }

    while let Some(candidate) = grower.queue.pop() {
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            warn!("region growing cancelled after {} steps", grower.steps);
            return Err(RegionError::Cancelled);
        }
        // A later seed may have claimed the site after it was queued.
        if !grower.labels.is_unassigned(candidate.site) {
            continue;
        }
        grower.absorb(
            candidate.site,
            candidate.region,
            candidate.similarity,
            false,
            &mut observer,
        );
        grower.scan(candidate.site);
    }

    debug!(
        "region growing done: {} steps, {} sites unreachable",
        grower.steps,
        shape.len() - grower.steps
    );

    Ok(GrowthResult {
        labels: grower.labels,
        regions: grower.regions,
        steps: grower.steps,
    })
}

/// Scratch state owned by one run
struct Grower<'a> {
    grid: &'a PixelGrid,
    neighborhood: Neighborhood,
    labels: LabelGrid,
    queued: Vec<bool>,
    regions: Vec<RegionStatistic>,
    queue: CandidateQueue,
    steps: usize,
}

impl Grower<'_> {
    fn absorb<F>(&mut self, site: usize, region: u32, similarity: f64, seed: bool, observer: &mut F)
    where
        F: FnMut(&GrowthStep),
    {
        let stat = &mut self.regions[region as usize - 1];
        stat.absorb(self.grid.sample_at(site));
        self.labels.set_at(site, region);
        self.steps += 1;
        observer(&GrowthStep {
            site,
            region,
            point_count: stat.point_count(),
            similarity,
            seed,
        });
    }

    /// Queue every neighbor of `site` that is neither assigned nor queued.
    fn scan(&mut self, site: usize) {
        let shape = self.labels.shape();
        let fresh: Vec<usize> = self
            .neighborhood
            .neighbors(site)
            .filter(|&n| self.labels.is_unassigned(n) && !self.queued[n])
            .collect();
        for n in fresh {
            let (region, similarity) = self.best_region(n);
            let (x, y, z) = shape.coords(n);
            self.queued[n] = true;
            self.queue.push(Candidate {
                similarity,
                x,
                y,
                z,
                site: n,
                region,
            });
        }
    }

    /// Closest bordering region by mean distance; lowest label on ties.
    fn best_region(&self, site: usize) -> (u32, f64) {
        let sample = self.grid.sample_at(site);
        let mut best = (UNASSIGNED, f64::INFINITY);
        for n in self.neighborhood.neighbors(site) {
            let region = self.labels.get_at(n);
            if region == UNASSIGNED {
                continue;
            }
            let d = self.regions[region as usize - 1].distance_to_mean(sample);
            if best.0 == UNASSIGNED || d < best.1 || (d == best.1 && region < best.0) {
                best = (region, d);
            }
        }
        best
    }
}
