//! Seed sets
//!
//! A [`SeedSet`] declares the regions to grow. Region `k` (1-based, equal
//! to its output label) owns one or more seed sites; several seeds let
//! disconnected components feed a single label.

use crate::error::{RegionError, RegionResult};
use pixseg_core::{GridShape, LabelGrid, UNASSIGNED};
use std::collections::{BTreeSet, HashMap};

/// Largest number of regions a seed set may declare
///
/// Labels are `u32` and 0 is reserved for unassigned sites.
pub const MAX_REGIONS: usize = (u32::MAX - 1) as usize;

/// A seed site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    /// X coordinate
    pub x: u32,
    /// Y coordinate
    pub y: u32,
    /// Plane index (0 for 2D grids)
    pub z: u32,
}

impl Seed {
    /// Create a 2D seed
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Create a 3D seed
    pub fn new_3d(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl From<(u32, u32)> for Seed {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(u32, u32, u32)> for Seed {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self::new_3d(x, y, z)
    }
}

/// Regions and their seeds, in declaration order
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
    regions: Vec<Vec<Seed>>,
}

impl SeedSet {
    /// Create an empty seed set
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new region with the given seeds
    ///
    /// Returns the region's label (1 for the first region).
    pub fn add_region<I, S>(&mut self, seeds: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: Into<Seed>,
    {
        self.regions.push(seeds.into_iter().map(Into::into).collect());
        self.regions.len() as u32
    }

    /// Add a seed to an already declared region
    pub fn add_seed(&mut self, region: u32, seed: impl Into<Seed>) -> RegionResult<()> {
        let slot = (region as usize)
            .checked_sub(1)
            .and_then(|i| self.regions.get_mut(i))
            .ok_or_else(|| RegionError::InvalidParameters(format!("unknown region {region}")))?;
        slot.push(seed.into());
        Ok(())
    }

    /// Build a seed set from a seed mask
    ///
    /// Every site with nonzero value `k` becomes a seed of region `k`.
    /// The mask must have the extent of the grid it seeds, and its labels
    /// must form the sequence `1..=n` without gaps.
    ///
    /// # Errors
    ///
    /// - `Core(ShapeMismatch)` when the mask and `shape` differ
    /// - `NoRegions` when the mask holds no seed
    /// - `TooManyRegions` when a label exceeds [`MAX_REGIONS`]
    /// - `EmptyRegion` for the first label missing below the largest one
    pub fn from_label_grid(mask: &LabelGrid, shape: GridShape) -> RegionResult<Self> {
        shape.ensure_same(&mask.shape())?;

        let labels: BTreeSet<u32> = mask
            .as_slice()
            .iter()
            .copied()
            .filter(|&l| l != UNASSIGNED)
            .collect();
        let Some(&max) = labels.last() else {
            return Err(RegionError::NoRegions);
        };
        if max as usize > MAX_REGIONS {
            return Err(RegionError::TooManyRegions {
                count: max as usize,
                max: MAX_REGIONS,
            });
        }
        if labels.len() != max as usize {
            // Labels are distinct and at most `max`, so one below it is missing.
            let region = (1..max).find(|l| !labels.contains(l)).unwrap_or(max);
            return Err(RegionError::EmptyRegion { region });
        }

        let mut regions = vec![Vec::new(); labels.len()];
        for (index, &label) in mask.as_slice().iter().enumerate() {
            if label == UNASSIGNED {
                continue;
            }
            let (x, y, z) = shape.coords(index);
            regions[label as usize - 1].push(Seed::new_3d(x, y, z));
        }
        Ok(Self { regions })
    }

    /// Number of declared regions
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region has been declared
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Seeds of a region, by label
    pub fn seeds(&self, region: u32) -> Option<&[Seed]> {
        (region as usize)
            .checked_sub(1)
            .and_then(|i| self.regions.get(i))
            .map(Vec::as_slice)
    }

    /// Check the seed set against a grid and flatten it into
    /// `(site index, label)` pairs in declaration order.
    ///
    /// A seed repeated within one region is kept once.
    pub(crate) fn resolve(&self, shape: GridShape) -> RegionResult<Vec<(usize, u32)>> {
        if self.regions.is_empty() {
            return Err(RegionError::NoRegions);
        }
        if self.regions.len() > MAX_REGIONS {
            return Err(RegionError::TooManyRegions {
                count: self.regions.len(),
                max: MAX_REGIONS,
            });
        }
        if let Some(i) = self.regions.iter().position(Vec::is_empty) {
            return Err(RegionError::EmptyRegion {
                region: i as u32 + 1,
            });
        }

        let mut owner: HashMap<usize, u32> = HashMap::new();
        let mut sites = Vec::new();
        for (i, seeds) in self.regions.iter().enumerate() {
            let label = i as u32 + 1;
            for seed in seeds {
                let index = shape
                    .checked_index(seed.x, seed.y, seed.z)
                    .map_err(|_| RegionError::InvalidSeed {
                        x: seed.x,
                        y: seed.y,
                        z: seed.z,
                    })?;
                match owner.get(&index) {
                    Some(&first) if first == label => {}
                    Some(&first) => {
                        return Err(RegionError::ConflictingSeed {
                            x: seed.x,
                            y: seed.y,
                            z: seed.z,
                            first,
                            second: label,
                        });
                    }
                    None => {
                        owner.insert(index, label);
                        sites.push((index, label));
                    }
                }
            }
        }
        Ok(sites)
    }
}
