//! PixelGrid - Dense multi-band sample grid
//!
//! `PixelGrid` is a 2D or 3D array of fixed-length `f32` vectors. A grid
//! with one band holds grayscale/scalar data; three or more bands hold
//! color or multi-spectral data. The segmentation engines only read it.
//!
//! See [`label`] for the integer label plane the engines produce.
//!
//! # Examples
//!
//! ```
//! use pixseg_core::PixelGrid;
//!
//! // A 4x3 RGB grid built from packed 8-bit samples
//! let rgb = vec![0u8; 4 * 3 * 3];
//! let grid = PixelGrid::from_u8(4, 3, 3, &rgb).unwrap();
//! assert_eq!(grid.bands(), 3);
//! assert_eq!(grid.sample(3, 2, 0).unwrap(), &[0.0, 0.0, 0.0]);
//! ```

pub mod label;

use crate::error::{Error, Result};

/// Spatial extent of a grid
///
/// Sites are stored in row-major order, plane by plane: the site at
/// `(x, y, z)` has index `(z * height + y) * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Width in sites
    pub width: u32,
    /// Height in sites
    pub height: u32,
    /// Number of planes (1 for 2D grids)
    pub depth: u32,
}

impl GridShape {
    /// Create a shape, rejecting empty extents
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::InvalidDimension {
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Number of sites
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Always false for a validated shape
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the shape has more than one plane
    #[inline]
    pub fn is_volume(&self) -> bool {
        self.depth > 1
    }

    /// Whether `(x, y, z)` lies inside the shape
    #[inline]
    pub fn contains(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Linear index of `(x, y, z)` without bounds checking
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        (z as usize * self.height as usize + y as usize) * self.width as usize + x as usize
    }

    /// Linear index of `(x, y, z)`, or an error if it is outside the shape
    pub fn checked_index(&self, x: u32, y: u32, z: u32) -> Result<usize> {
        if !self.contains(x, y, z) {
            return Err(Error::IndexOutOfBounds { x, y, z });
        }
        Ok(self.index(x, y, z))
    }

    /// Coordinates of a linear index
    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32, u32) {
        let w = self.width as usize;
        let plane = w * self.height as usize;
        let z = index / plane;
        let rem = index % plane;
        ((rem % w) as u32, (rem / w) as u32, z as u32)
    }

    fn as_tuple(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    /// Fail unless `other` has the same extent
    pub fn ensure_same(&self, other: &GridShape) -> Result<()> {
        if self != other {
            return Err(Error::ShapeMismatch {
                expected: self.as_tuple(),
                actual: other.as_tuple(),
            });
        }
        Ok(())
    }
}

/// Fail if any sample is NaN or infinite
fn check_finite(data: &[f32]) -> Result<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(Error::InvalidParameter(format!(
            "non-finite sample {} at offset {}",
            data[i], i
        ))),
        None => Ok(()),
    }
}

/// Dense grid of multi-band samples
///
/// # Memory Layout
///
/// Sample vectors are interleaved: the `bands` values of site `i` occupy
/// `data[i * bands .. (i + 1) * bands]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    shape: GridShape,
    bands: usize,
    data: Vec<f32>,
}

impl PixelGrid {
    /// Create a 2D grid with every sample set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for an empty extent and
    /// `Error::InvalidBands` when `bands` is 0.
    pub fn new(width: u32, height: u32, bands: usize) -> Result<Self> {
        Self::new_3d(width, height, 1, bands)
    }

    /// Create a 3D grid with every sample set to zero
    pub fn new_3d(width: u32, height: u32, depth: u32, bands: usize) -> Result<Self> {
        let shape = GridShape::new(width, height, depth)?;
        if bands == 0 {
            return Err(Error::InvalidBands(bands));
        }
        Ok(Self {
            shape,
            bands,
            data: vec![0.0; shape.len() * bands],
        })
    }

    /// Create a 2D grid from interleaved samples
    ///
    /// # Arguments
    ///
    /// * `width` - Width in sites
    /// * `height` - Height in sites
    /// * `bands` - Values per site
    /// * `data` - `width * height * bands` samples, row-major, bands interleaved
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the data length
    /// doesn't match, and `Error::InvalidParameter` if a sample is NaN or
    /// infinite.
    pub fn from_data(width: u32, height: u32, bands: usize, data: Vec<f32>) -> Result<Self> {
        Self::from_data_3d(width, height, 1, bands, data)
    }

    /// Create a 3D grid from interleaved samples
    pub fn from_data_3d(
        width: u32,
        height: u32,
        depth: u32,
        bands: usize,
        data: Vec<f32>,
    ) -> Result<Self> {
        let shape = GridShape::new(width, height, depth)?;
        if bands == 0 {
            return Err(Error::InvalidBands(bands));
        }
        let expected = shape.len() * bands;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        check_finite(&data)?;
        Ok(Self { shape, bands, data })
    }

    /// Create a 2D grid from interleaved 8-bit samples (e.g. packed RGB)
    pub fn from_u8(width: u32, height: u32, bands: usize, data: &[u8]) -> Result<Self> {
        let samples = data.iter().map(|&v| v as f32).collect();
        Self::from_data(width, height, bands, samples)
    }

    /// Create a 2D grid from one plane per band
    ///
    /// Each plane holds `width * height` values in row-major order.
    pub fn from_planes(width: u32, height: u32, planes: &[Vec<f32>]) -> Result<Self> {
        let mut grid = Self::new(width, height, planes.len())?;
        let sites = grid.shape.len();
        for plane in planes {
            if plane.len() != sites {
                return Err(Error::DataLength {
                    expected: sites,
                    actual: plane.len(),
                });
            }
            check_finite(plane)?;
        }
        let bands = grid.bands;
        for (band, plane) in planes.iter().enumerate() {
            for (site, &value) in plane.iter().enumerate() {
                grid.data[site * bands + band] = value;
            }
        }
        Ok(grid)
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

    /// Get the number of planes (1 for 2D grids)
    #[inline]
    pub fn depth(&self) -> u32 {
        self.shape.depth
    }

    /// Get the number of values per site
    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Get the spatial extent
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Get the number of sites
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Always false: grids are never empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample vector at `(x, y, z)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinate is outside the grid.
    pub fn sample(&self, x: u32, y: u32, z: u32) -> Result<&[f32]> {
        let index = self.shape.checked_index(x, y, z)?;
        Ok(self.sample_at(index))
    }

    /// Get the sample vector of a site by linear index
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn sample_at(&self, index: usize) -> &[f32] {
        &self.data[index * self.bands..(index + 1) * self.bands]
    }

    /// Overwrite the sample vector at `(x, y, z)`
    pub fn set_sample(&mut self, x: u32, y: u32, z: u32, value: &[f32]) -> Result<()> {
        if value.len() != self.bands {
            return Err(Error::BandMismatch {
                expected: self.bands,
                actual: value.len(),
            });
        }
        check_finite(value)?;
        let index = self.shape.checked_index(x, y, z)?;
        let bands = self.bands;
        self.data[index * bands..(index + 1) * bands].copy_from_slice(value);
        Ok(())
    }

    /// Iterate over all sample vectors in site order
    pub fn samples(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.bands)
    }

    /// Get the raw interleaved sample buffer
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_index_roundtrip() {
        let shape = GridShape::new(5, 4, 3).unwrap();
        for i in 0..shape.len() {
            let (x, y, z) = shape.coords(i);
            assert_eq!(shape.index(x, y, z), i);
        }
        assert_eq!(shape.index(1, 2, 0), 11);
        assert_eq!(shape.coords(27), (2, 1, 1));
    }

    #[test]
    fn test_shape_rejects_empty() {
        assert!(GridShape::new(0, 4, 1).is_err());
        assert!(GridShape::new(4, 4, 0).is_err());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = PixelGrid::from_data(3, 3, 1, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            Error::DataLength {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_zero_bands_rejected() {
        assert_eq!(PixelGrid::new(2, 2, 0).unwrap_err(), Error::InvalidBands(0));
    }

    #[test]
    fn test_sample_access() {
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let grid = PixelGrid::from_data(2, 2, 3, data).unwrap();
        assert_eq!(grid.sample(1, 0, 0).unwrap(), &[3.0, 4.0, 5.0]);
        assert_eq!(grid.sample(1, 1, 0).unwrap(), &[9.0, 10.0, 11.0]);
        assert!(grid.sample(2, 0, 0).is_err());
        assert!(grid.sample(0, 0, 1).is_err());
    }

    #[test]
    fn test_from_planes_interleaves() {
        let planes = vec![vec![1.0, 2.0], vec![10.0, 20.0]];
        let grid = PixelGrid::from_planes(2, 1, &planes).unwrap();
        assert_eq!(grid.as_slice(), &[1.0, 10.0, 2.0, 20.0]);
    }

    #[test]
    fn test_set_sample_band_mismatch() {
        let mut grid = PixelGrid::new(2, 2, 3).unwrap();
        assert!(grid.set_sample(0, 0, 0, &[1.0]).is_err());
        grid.set_sample(1, 1, 0, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.sample_at(3), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = PixelGrid::from_data(2, 1, 1, vec![0.0, bad]).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)));
            let err = PixelGrid::from_data_3d(1, 1, 2, 1, vec![bad, 0.0]).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)));
            assert!(PixelGrid::from_planes(1, 1, &[vec![bad]]).is_err());
        }
        let mut grid = PixelGrid::new(1, 1, 2).unwrap();
        assert!(matches!(
            grid.set_sample(0, 0, 0, &[1.0, f32::NAN]),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(grid.sample_at(0), &[0.0, 0.0]);
    }

    #[test]
    fn test_ensure_same() {
        let a = GridShape::new(4, 3, 1).unwrap();
        let b = GridShape::new(3, 4, 1).unwrap();
        assert!(a.ensure_same(&a).is_ok());
        assert_eq!(
            a.ensure_same(&b).unwrap_err(),
            Error::ShapeMismatch {
                expected: (4, 3, 1),
                actual: (3, 4, 1)
            }
        );
    }

    #[test]
    fn test_volume_grid() {
        let grid = PixelGrid::new_3d(3, 3, 2, 1).unwrap();
        assert!(grid.shape().is_volume());
        assert_eq!(grid.len(), 18);
        assert_eq!(grid.samples().count(), 18);
    }
}
