//! Per-region running statistics
//!
//! Each region keeps its point count and per-band sum, so its current
//! mean is available in O(1) while the region grows.

/// Running aggregate for one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStatistic {
    point_count: u64,
    sum: Vec<f64>,
}

impl RegionStatistic {
    /// Create an empty statistic for `bands`-valued samples
    pub fn new(bands: usize) -> Self {
        Self {
            point_count: 0,
            sum: vec![0.0; bands],
        }
    }

    /// Fold one sample into the region
    pub fn absorb(&mut self, sample: &[f32]) {
        pixseg_core::vector::accumulate(&mut self.sum, sample);
        self.point_count += 1;
    }

    /// Number of sites absorbed so far
    #[inline]
    pub fn point_count(&self) -> u64 {
        self.point_count
    }

    /// Per-band sum of absorbed samples
    #[inline]
    pub fn sum(&self) -> &[f64] {
        &self.sum
    }

    /// Current mean vector (all zeros for an empty region)
    pub fn mean(&self) -> Vec<f64> {
        if self.point_count == 0 {
            return vec![0.0; self.sum.len()];
        }
        let n = self.point_count as f64;
        self.sum.iter().map(|s| s / n).collect()
    }

    /// Euclidean distance from `sample` to the current mean
    ///
    /// Absolute difference for single-band samples.
    pub fn distance_to_mean(&self, sample: &[f32]) -> f64 {
        debug_assert_eq!(sample.len(), self.sum.len());
        let n = self.point_count.max(1) as f64;
        sample
            .iter()
            .zip(&self.sum)
            .map(|(&v, &s)| {
                let d = v as f64 - s / n;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}
