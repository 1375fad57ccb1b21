//! LabelGrid - Integer label plane
//!
//! A `LabelGrid` has the same spatial shape as the `PixelGrid` it was
//! computed from and stores one `u32` per site. Label 0 means
//! unassigned/background; labels `1..=n` identify regions or clusters.

use super::GridShape;
use crate::error::{Error, Result};

/// Label value of a site that belongs to no region
pub const UNASSIGNED: u32 = 0;

/// Dense grid of region/cluster labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    shape: GridShape,
    data: Vec<u32>,
}

impl LabelGrid {
    /// Create a label grid with every site unassigned
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            data: vec![UNASSIGNED; shape.len()],
        }
    }

    /// Create a 2D label grid from row-major labels
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        Self::from_data_3d(width, height, 1, data)
    }

    /// Create a 3D label grid from labels in site order
    pub fn from_data_3d(width: u32, height: u32, depth: u32, data: Vec<u32>) -> Result<Self> {
        let shape = GridShape::new(width, height, depth)?;
        if data.len() != shape.len() {
            return Err(Error::DataLength {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Get the spatial extent
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Get the grid width in sites
    #[inline]
    pub fn width(&self) -> u32 {
        self.shape.width
    }

    /// Get the grid height in sites
    #[inline]
    pub fn height(&self) -> u32 {
        self.shape.height
    }

    /// Get the number of planes
    #[inline]
    pub fn depth(&self) -> u32 {
        self.shape.depth
    }

    /// Get the number of sites
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: grids are never empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the label at `(x, y, z)`
    pub fn get(&self, x: u32, y: u32, z: u32) -> Result<u32> {
        let index = self.shape.checked_index(x, y, z)?;
        Ok(self.data[index])
    }

    /// Get the label of a site by linear index
    #[inline]
    pub fn get_at(&self, index: usize) -> u32 {
        self.data[index]
    }

    /// Set the label at `(x, y, z)`
    pub fn set(&mut self, x: u32, y: u32, z: u32, label: u32) -> Result<()> {
        let index = self.shape.checked_index(x, y, z)?;
        self.data[index] = label;
        Ok(())
    }

    /// Set the label of a site by linear index
    #[inline]
    pub fn set_at(&mut self, index: usize, label: u32) {
        self.data[index] = label;
    }

    /// Whether the site has not been given a label
    #[inline]
    pub fn is_unassigned(&self, index: usize) -> bool {
        self.data[index] == UNASSIGNED
    }

    /// Get the labels in site order
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Largest label present (0 if every site is unassigned)
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(UNASSIGNED)
    }

    /// Number of sites carrying `label`
    pub fn count(&self, label: u32) -> usize {
        self.data.iter().filter(|&&l| l == label).count()
    }

    /// Site counts indexed by label, from 0 up to `max_label()`
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.max_label() as usize + 1];
        for &label in &self.data {
            counts[label as usize] += 1;
        }
        counts
    }

    /// Serialize the labels as little-endian bytes in site order
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|l| l.to_le_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unassigned() {
        let grid = LabelGrid::new(GridShape::new(3, 2, 1).unwrap());
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.max_label(), 0);
        assert_eq!(grid.count(UNASSIGNED), 6);
    }

    #[test]
    fn test_label_counts() {
        let grid = LabelGrid::from_data(3, 2, vec![1, 1, 0, 2, 2, 2]).unwrap();
        assert_eq!(grid.label_counts(), vec![1, 2, 3]);
        assert_eq!(grid.get(0, 1, 0).unwrap(), 2);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = LabelGrid::new(GridShape::new(2, 2, 1).unwrap());
        assert!(grid.set(2, 0, 0, 1).is_err());
        grid.set(1, 1, 0, 7).unwrap();
        assert_eq!(grid.get_at(3), 7);
    }

    #[test]
    fn test_to_le_bytes() {
        let grid = LabelGrid::from_data(2, 1, vec![1, 258]).unwrap();
        assert_eq!(grid.to_le_bytes(), vec![1, 0, 0, 0, 2, 1, 0, 0]);
    }
}
