//! Constant distribution
//!
//! Every sample has the same value. Useful for traces whose exact mean is
//! known in advance.

use super::Sampler;

/// Sampler that always returns one value
#[derive(Debug, Clone, Copy)]
pub struct ConstantSampler {
    value: f64,
}

impl ConstantSampler {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Sampler for ConstantSampler {
    #[inline(always)]
    fn sample(&mut self, _index: u64) -> f64 {
        self.value
    }
}
