//! Uniform random distribution
//!
//! Values are drawn with equal probability from the half-open range
//! `[low, high)`. This is the default distribution; the bare `uniform` tag
//! selects `[0, 1)`.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use tracegen::distribution::{Sampler, uniform::UniformSampler};
//!
//! let mut sampler = UniformSampler::new(-1.0, 1.0, Xoshiro256PlusPlus::seed_from_u64(3));
//! for index in 0..10 {
//!     let value = sampler.sample(index);
//!     assert!((-1.0..1.0).contains(&value));
//! }
//! ```

use super::Sampler;
use rand::Rng;
use rand_distr::Uniform;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform sampler over `[low, high)`
///
/// Uses xoshiro256++ for fast, reproducible draws.
pub struct UniformSampler {
    dist: Uniform<f64>,
    rng: Xoshiro256PlusPlus,
}

impl UniformSampler {
    /// Create a uniform sampler
    ///
    /// # Panics
    ///
    /// Panics if `low >= high` or either bound is not finite. Use
    /// [`DistributionSpec::sampler`](super::DistributionSpec::sampler) for a
    /// checked constructor.
    pub fn new(low: f64, high: f64, rng: Xoshiro256PlusPlus) -> Self {
        Self {
            dist: Uniform::new(low, high),
            rng,
        }
    }
}

impl Sampler for UniformSampler {
    #[inline(always)]
    fn sample(&mut self, _index: u64) -> f64 {
        self.rng.sample(&self.dist)
    }
}
