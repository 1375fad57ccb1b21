//! Site adjacency
//!
//! Neighbor enumeration for 2D and 3D grids. The same connectivity is
//! used everywhere a site's neighbors are visited, so candidate discovery
//! and promotion can never disagree about which sites touch.

use crate::grid::GridShape;

/// Connectivity type for neighbor enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// Face neighbors only: 4 in 2D (up, down, left, right), 6 in 3D
    #[default]
    FourWay,
    /// Face, edge and corner neighbors: 8 in 2D, 26 in 3D
    EightWay,
}

/// Connectivity used when none is configured
pub const DEFAULT_CONNECTIVITY: ConnectivityType = ConnectivityType::FourWay;

/// Precomputed neighbor offsets for one grid shape
///
/// Offsets are visited in site order (z, then y, then x), so iteration
/// order is deterministic.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    shape: GridShape,
    offsets: Vec<(i64, i64, i64)>,
}

impl Neighborhood {
    /// Build the neighborhood for `shape`
    ///
    /// Out-of-plane offsets are only generated for volumes.
    pub fn new(shape: GridShape, connectivity: ConnectivityType) -> Self {
        let dz_range = if shape.is_volume() { -1i64..=1 } else { 0i64..=0 };
        let mut offsets = Vec::with_capacity(26);
        for dz in dz_range {
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let manhattan = dx.abs() + dy.abs() + dz.abs();
                    if manhattan == 0 {
                        continue;
                    }
                    if connectivity == ConnectivityType::FourWay && manhattan != 1 {
                        continue;
                    }
                    offsets.push((dx, dy, dz));
                }
            }
        }
        Self { shape, offsets }
    }

    /// Maximum number of neighbors of any site
    pub fn max_neighbors(&self) -> usize {
        self.offsets.len()
    }

    /// Linear indices of the in-bounds neighbors of `index`
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y, z) = self.shape.coords(index);
        self.offsets.iter().filter_map(move |&(dx, dy, dz)| {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let nz = z as i64 + dz;
            if nx < 0
                || ny < 0
                || nz < 0
                || nx >= self.shape.width as i64
                || ny >= self.shape.height as i64
                || nz >= self.shape.depth as i64
            {
                return None;
            }
            Some(self.shape.index(nx as u32, ny as u32, nz as u32))
        })
    }
}
