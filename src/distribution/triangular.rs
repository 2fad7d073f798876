//! Triangular distribution
//!
//! Density rises linearly from `low` to a peak at `mode` and falls back to
//! zero at `high`.

use super::Sampler;
use crate::error::TraceError;
use rand::Rng;
use rand_distr::Triangular;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Triangular sampler over `[low, high]` peaking at `mode`
pub struct TriangularSampler {
    dist: Triangular<f64>,
    rng: Xoshiro256PlusPlus,
}

impl TriangularSampler {
    /// Create a triangular sampler
    ///
    /// Fails if `mode` lies outside `[low, high]`.
    pub fn new(
        low: f64,
        high: f64,
        mode: f64,
        rng: Xoshiro256PlusPlus,
    ) -> Result<Self, TraceError> {
        let dist = Triangular::new(low, high, mode)
            .map_err(|e| TraceError::invalid("triangular", e.to_string()))?;

        Ok(Self { dist, rng })
    }
}

impl Sampler for TriangularSampler {
    fn sample(&mut self, _index: u64) -> f64 {
        self.rng.sample(&self.dist)
    }
}
