//! Gaussian (normal) distribution
//!
//! Values cluster around `mean` with spread `stddev`. A zero `stddev`
//! degenerates to a constant trace.
//!
//! # Performance
//!
//! Uses the Box-Muller transform, which yields two independent normal
//! variables per pair of uniform draws. The second is cached for the next
//! sample, so on average one uniform draw is spent per value.

use super::Sampler;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::f64::consts::PI;

/// Normal sampler with configurable mean and standard deviation
pub struct GaussianSampler {
    /// Center of the distribution
    mean: f64,

    /// Standard deviation (spread)
    stddev: f64,

    /// Random number generator
    rng: Xoshiro256PlusPlus,

    /// Cached spare value from Box-Muller transform
    spare: Option<f64>,
}

impl GaussianSampler {
    /// Create a Gaussian sampler
    ///
    /// # Panics
    ///
    /// Panics if `stddev` is negative.
    pub fn new(mean: f64, stddev: f64, rng: Xoshiro256PlusPlus) -> Self {
        assert!(stddev >= 0.0, "Standard deviation must be non-negative");

        Self {
            mean,
            stddev,
            rng,
            spare: None,
        }
    }

    /// Generate a standard normal random variable using Box-Muller transform
    fn generate_standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }

        // u1 in (0, 1] so ln(u1) stays finite
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.spare = Some(r * theta.sin());

        r * theta.cos()
    }
}

impl Sampler for GaussianSampler {
    fn sample(&mut self, _index: u64) -> f64 {
        let z = self.generate_standard_normal();
        self.mean + z * self.stddev
    }
}
