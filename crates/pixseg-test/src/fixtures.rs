//! Synthetic test grids
//!
//! Deterministic inputs shared by the regression tests. Nothing here
//! reads files; every grid is generated from its parameters.

use crate::error::TestResult;
use pixseg_core::PixelGrid;

/// Scalar grid of `background` with an axis-aligned block of `foreground`
///
/// `block` is `(x0, y0, w, h)`.
pub fn block_grid(
    width: u32,
    height: u32,
    block: (u32, u32, u32, u32),
    background: f32,
    foreground: f32,
) -> TestResult<PixelGrid> {
    let (x0, y0, bw, bh) = block;
    let mut data = vec![background; (width * height) as usize];
    for y in y0..(y0 + bh).min(height) {
        for x in x0..(x0 + bw).min(width) {
            data[(y * width + x) as usize] = foreground;
        }
    }
    Ok(PixelGrid::from_data(width, height, 1, data)?)
}

/// Single-row scalar grid holding `values`
pub fn row_grid(values: &[f32]) -> TestResult<PixelGrid> {
    Ok(PixelGrid::from_data(
        values.len() as u32,
        1,
        1,
        values.to_vec(),
    )?)
}

/// Smooth 8-bit-range wave pattern
///
/// Sums of sines and cosines with fixed frequencies; `variant` selects
/// one of two frequency sets.
pub fn wave_grid(size: u32, variant: u32) -> TestResult<PixelGrid> {
    let mut data = Vec::with_capacity((size * size) as usize);
    for i in 0..size {
        for j in 0..size {
            let fi = i as f32;
            let fj = j as f32;
            let f = if variant == 0 {
                128.0
                    + 26.3 * (0.0438 * fi).sin()
                    + 33.4 * (0.0712 * fi).cos()
                    + 18.6 * (0.0561 * fj).sin()
                    + 23.6 * (0.0327 * fj).cos()
            } else {
                128.0
                    + 26.3 * (0.0238 * fi).sin()
                    + 33.4 * (0.0312 * fi).cos()
                    + 18.6 * (0.0261 * fj).sin()
                    + 23.6 * (0.0207 * fj).cos()
            };
            data.push(f.floor());
        }
    }
    Ok(PixelGrid::from_data(size, size, 1, data)?)
}

/// RGB grid split into four quadrants of distinct colors, with
/// deterministic per-site jitter of at most `jitter` per band
///
/// Quadrant colors, in (top-left, top-right, bottom-left, bottom-right)
/// order, are returned by [`QUADRANT_COLORS`].
pub fn quadrant_rgb_grid(width: u32, height: u32, jitter: f32, seed: u32) -> TestResult<PixelGrid> {
    let mut lcg = Lcg::new(seed);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let q = usize::from(x >= width / 2) + 2 * usize::from(y >= height / 2);
            for band in 0..3 {
                let noise = (lcg.next_unit() * 2.0 - 1.0) * jitter;
                data.push(QUADRANT_COLORS[q][band] + noise);
            }
        }
    }
    Ok(PixelGrid::from_data(width, height, 3, data)?)
}

/// Base colors of [`quadrant_rgb_grid`]
pub const QUADRANT_COLORS: [[f32; 3]; 4] = [
    [220.0, 30.0, 30.0],
    [30.0, 200.0, 40.0],
    [40.0, 50.0, 210.0],
    [230.0, 230.0, 60.0],
];

/// Simple linear congruential generator for reproducible jitter
struct Lcg {
    state: u32,
}

impl Lcg {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform value in [0, 1)
    fn next_unit(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((self.state >> 8) & 0xFFFF) as f32 / 65_536.0
    }
}
