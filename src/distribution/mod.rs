//! Sampling distributions for synthetic traces
//!
//! This module maps a distribution specification to a [`Sampler`], a function
//! from sample index to value. Random distributions draw from a seeded PRNG and
//! ignore the index; periodic ones are pure functions of the index.
//!
//! # Distributions
//!
//! - **Uniform**: `uniform(low, high)`, values in `[low, high)` (default `[0, 1)`)
//! - **Gaussian**: `gaussian(mean, stddev)`
//! - **Triangular**: `triangular(low, high, mode)`
//! - **Sine**: `sine(freq, phase, amp, shift)` = `amp * sin(index * freq + phase) + shift`
//! - **Tangent**: `tangent(freq, phase, amp, shift)`, same shape using `tan`
//! - **Constant**: `constant(value)`
//!
//! # Example
//!
//! ```
//! use tracegen::distribution::{DistributionSpec, Sampler};
//!
//! let spec = DistributionSpec::parse("uniform(2, 4)").unwrap();
//! let mut sampler = spec.sampler(Some(7)).unwrap();
//! let value = sampler.sample(0);
//! assert!((2.0..4.0).contains(&value));
//! ```

use crate::error::TraceError;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod constant;
pub mod gaussian;
pub mod periodic;
pub mod triangular;
pub mod uniform;

/// A sampling function from sample index to value
///
/// Samplers must be `Send` so a generation run can be moved to another
/// thread, but each instance is used by one writer at a time.
pub trait Sampler: Send {
    /// Produce the value for sample `index`
    fn sample(&mut self, index: u64) -> f64;
}

/// Distribution and its parameters
///
/// In TOML the variant is selected by a `type` key:
///
/// ```toml
/// [trace.distribution]
/// type = "sine"
/// freq = 0.1
/// phase = 0.0
/// amp = 2.0
/// shift = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DistributionSpec {
    Uniform { low: f64, high: f64 },
    Gaussian { mean: f64, stddev: f64 },
    Triangular { low: f64, high: f64, mode: f64 },
    Sine { freq: f64, phase: f64, amp: f64, shift: f64 },
    Tangent { freq: f64, phase: f64, amp: f64, shift: f64 },
    Constant { value: f64 },
}

impl Default for DistributionSpec {
    fn default() -> Self {
        Self::Uniform { low: 0.0, high: 1.0 }
    }
}

impl DistributionSpec {
    /// Resolve a distribution tag and its positional parameters
    ///
    /// Tags are case-insensitive. `uniform` without parameters means `[0, 1)`.
    /// An unrecognised tag is an error rather than a silent fallback.
    pub fn from_tag(tag: &str, params: &[f64]) -> Result<Self, TraceError> {
        let spec = match tag.trim().to_ascii_lowercase().as_str() {
            "uniform" => match *params {
                [] => Self::default(),
                [low, high] => Self::Uniform { low, high },
                _ => return Err(arity("uniform", "0 or 2", params)),
            },
            "gaussian" | "normal" => match *params {
                [mean, stddev] => Self::Gaussian { mean, stddev },
                _ => return Err(arity("gaussian", "2", params)),
            },
            "triangular" => match *params {
                [low, high, mode] => Self::Triangular { low, high, mode },
                _ => return Err(arity("triangular", "3", params)),
            },
            "sine" | "sin" => match *params {
                [freq, phase, amp, shift] => Self::Sine { freq, phase, amp, shift },
                _ => return Err(arity("sine", "4", params)),
            },
            "tangent" | "tan" => match *params {
                [freq, phase, amp, shift] => Self::Tangent { freq, phase, amp, shift },
                _ => return Err(arity("tangent", "4", params)),
            },
            "constant" => match *params {
                [value] => Self::Constant { value },
                _ => return Err(arity("constant", "1", params)),
            },
            _ => return Err(TraceError::UnknownDistribution(tag.trim().to_string())),
        };

        spec.validate()?;
        Ok(spec)
    }

    /// Parse the compact `tag(p1, p2, ...)` form, or a bare tag
    pub fn parse(expr: &str) -> Result<Self, TraceError> {
        let expr = expr.trim();
        let Some(open) = expr.find('(') else {
            return Self::from_tag(expr, &[]);
        };

        let tag = &expr[..open];
        let inner = expr[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| {
                TraceError::invalid("distribution", format!("missing ')' in '{}'", expr))
            })?;

        let params = parse_params(inner)?;
        Self::from_tag(tag, &params)
    }

    /// Distribution name as used in tags
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Gaussian { .. } => "gaussian",
            Self::Triangular { .. } => "triangular",
            Self::Sine { .. } => "sine",
            Self::Tangent { .. } => "tangent",
            Self::Constant { .. } => "constant",
        }
    }

    /// Check parameters against the distribution's domain
    pub fn validate(&self) -> Result<(), TraceError> {
        let name = self.name();
        let finite = |values: &[f64]| -> Result<(), TraceError> {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(TraceError::invalid(name, "parameters must be finite"))
            }
        };

        match *self {
            Self::Uniform { low, high } => {
                finite(&[low, high])?;
                check_range(name, low, high)?;
            }
            Self::Gaussian { mean, stddev } => {
                finite(&[mean, stddev])?;
                if stddev < 0.0 {
                    let reason = format!("stddev must be non-negative, got {}", stddev);
                    return Err(TraceError::invalid(name, reason));
                }
            }
            Self::Triangular { low, high, mode } => {
                finite(&[low, high, mode])?;
                check_range(name, low, high)?;
                if mode < low || mode > high {
                    let reason = format!("mode ({}) must lie in [{}, {}]", mode, low, high);
                    return Err(TraceError::invalid(name, reason));
                }
            }
            Self::Sine { freq, phase, amp, shift } | Self::Tangent { freq, phase, amp, shift } => {
                finite(&[freq, phase, amp, shift])?;
            }
            Self::Constant { value } => finite(&[value])?,
        }

        Ok(())
    }

    /// Build a sampler for this distribution
    ///
    /// `seed` makes random distributions reproducible; `None` seeds from
    /// system entropy. Periodic and constant samplers ignore it.
    pub fn sampler(&self, seed: Option<u64>) -> Result<Box<dyn Sampler>, TraceError> {
        self.validate()?;

        let sampler: Box<dyn Sampler> = match *self {
            Self::Uniform { low, high } => {
                Box::new(uniform::UniformSampler::new(low, high, make_rng(seed)))
            }
            Self::Gaussian { mean, stddev } => {
                Box::new(gaussian::GaussianSampler::new(mean, stddev, make_rng(seed)))
            }
            Self::Triangular { low, high, mode } => {
                Box::new(triangular::TriangularSampler::new(low, high, mode, make_rng(seed))?)
            }
            Self::Sine { freq, phase, amp, shift } => Box::new(periodic::PeriodicSampler::new(
                periodic::Waveform::Sine,
                freq,
                phase,
                amp,
                shift,
            )),
            Self::Tangent { freq, phase, amp, shift } => Box::new(periodic::PeriodicSampler::new(
                periodic::Waveform::Tangent,
                freq,
                phase,
                amp,
                shift,
            )),
            Self::Constant { value } => Box::new(constant::ConstantSampler::new(value)),
        };

        Ok(sampler)
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform { low, high } => write!(f, "uniform(low={}, high={})", low, high),
            Self::Gaussian { mean, stddev } => {
                write!(f, "gaussian(mean={}, stddev={})", mean, stddev)
            }
            Self::Triangular { low, high, mode } => {
                write!(f, "triangular(low={}, high={}, mode={})", low, high, mode)
            }
            Self::Sine { freq, phase, amp, shift } => {
                write!(f, "sine(freq={}, phase={}, amp={}, shift={})", freq, phase, amp, shift)
            }
            Self::Tangent { freq, phase, amp, shift } => {
                write!(f, "tangent(freq={}, phase={}, amp={}, shift={})", freq, phase, amp, shift)
            }
            Self::Constant { value } => write!(f, "constant(value={})", value),
        }
    }
}

/// Parse a comma-separated parameter list; an empty list yields no parameters
pub fn parse_params(s: &str) -> Result<Vec<f64>, TraceError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|p| {
            let p = p.trim();
            p.parse::<f64>().map_err(|_| {
                TraceError::invalid("distribution", format!("'{}' is not a number", p))
            })
        })
        .collect()
}

fn arity(name: &'static str, expected: &'static str, params: &[f64]) -> TraceError {
    TraceError::ParameterCount {
        name,
        expected,
        got: params.len(),
    }
}

/// `high` must exceed `low` and the width `high - low` must be representable
fn check_range(name: &'static str, low: f64, high: f64) -> Result<(), TraceError> {
    if high <= low {
        let reason = format!("high ({}) must exceed low ({})", high, low);
        return Err(TraceError::invalid(name, reason));
    }
    if !(high - low).is_finite() {
        let reason = format!("range [{}, {}] is wider than the largest f64", low, high);
        return Err(TraceError::invalid(name, reason));
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_all_distributions() {
        assert_eq!(
            DistributionSpec::from_tag("uniform", &[1.0, 2.0]).unwrap(),
            DistributionSpec::Uniform { low: 1.0, high: 2.0 }
        );
        assert_eq!(
            DistributionSpec::from_tag("Gaussian", &[0.0, 1.0]).unwrap(),
            DistributionSpec::Gaussian { mean: 0.0, stddev: 1.0 }
        );
        assert_eq!(
            DistributionSpec::from_tag("triangular", &[0.0, 10.0, 2.0]).unwrap(),
            DistributionSpec::Triangular { low: 0.0, high: 10.0, mode: 2.0 }
        );
        assert_eq!(
            DistributionSpec::from_tag("SINE", &[1.0, 0.0, 1.0, 0.0]).unwrap(),
            DistributionSpec::Sine { freq: 1.0, phase: 0.0, amp: 1.0, shift: 0.0 }
        );
        assert_eq!(
            DistributionSpec::from_tag("tan", &[0.5, 0.0, 1.0, 3.0]).unwrap(),
            DistributionSpec::Tangent { freq: 0.5, phase: 0.0, amp: 1.0, shift: 3.0 }
        );
        assert_eq!(
            DistributionSpec::from_tag("constant", &[5.0]).unwrap(),
            DistributionSpec::Constant { value: 5.0 }
        );
    }

    #[test]
    fn test_bare_uniform_defaults_to_unit_interval() {
        assert_eq!(
            DistributionSpec::from_tag("uniform", &[]).unwrap(),
            DistributionSpec::Uniform { low: 0.0, high: 1.0 }
        );
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let err = DistributionSpec::from_tag("poisson", &[1.0]).unwrap_err();
        assert!(matches!(err, TraceError::UnknownDistribution(ref t) if t == "poisson"));
    }

    #[test]
    fn test_wrong_parameter_count() {
        let err = DistributionSpec::from_tag("sine", &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, TraceError::ParameterCount { name: "sine", got: 2, .. }));

        let err = DistributionSpec::from_tag("gaussian", &[]).unwrap_err();
        assert!(matches!(err, TraceError::ParameterCount { name: "gaussian", got: 0, .. }));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            DistributionSpec::from_tag("uniform", &[2.0, 2.0]),
            Err(TraceError::InvalidParameters { .. })
        ));
        assert!(matches!(
            DistributionSpec::from_tag("gaussian", &[0.0, -1.0]),
            Err(TraceError::InvalidParameters { .. })
        ));
        assert!(matches!(
            DistributionSpec::from_tag("triangular", &[0.0, 1.0, 2.0]),
            Err(TraceError::InvalidParameters { .. })
        ));
        assert!(matches!(
            DistributionSpec::from_tag("constant", &[f64::NAN]),
            Err(TraceError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let err = DistributionSpec::from_tag("uniform", &[-1e308, 1e308]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidParameters { name: "uniform", .. }));

        let err = DistributionSpec::from_tag("triangular", &[-1e308, 1e308, 0.0]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidParameters { name: "triangular", .. }));

        // Built directly, the spec is still checked before a sampler exists
        let spec = DistributionSpec::Uniform { low: -f64::MAX, high: f64::MAX };
        assert!(matches!(spec.sampler(Some(1)), Err(TraceError::InvalidParameters { .. })));
    }

    #[test]
    fn test_wide_but_finite_range_samples() {
        let spec = DistributionSpec::from_tag("uniform", &[-1e307, 1e307]).unwrap();
        let mut sampler = spec.sampler(Some(1)).unwrap();
        for index in 0..100 {
            let value = sampler.sample(index);
            assert!((-1e307..=1e307).contains(&value));
        }
    }

    #[test]
    fn test_parse_compact_form() {
        assert_eq!(
            DistributionSpec::parse("sine(1, 0, 1, 0)").unwrap(),
            DistributionSpec::Sine { freq: 1.0, phase: 0.0, amp: 1.0, shift: 0.0 }
        );
        assert_eq!(DistributionSpec::parse(" uniform ").unwrap(), DistributionSpec::default());
        assert_eq!(DistributionSpec::parse("uniform()").unwrap(), DistributionSpec::default());
        assert!(DistributionSpec::parse("sine(1,0,1,0").is_err());
        assert!(DistributionSpec::parse("sine(1,x,1,0)").is_err());
    }

    #[test]
    fn test_display() {
        let spec = DistributionSpec::Gaussian { mean: 1.5, stddev: 0.25 };
        assert_eq!(spec.to_string(), "gaussian(mean=1.5, stddev=0.25)");
    }

    #[test]
    fn test_sampler_rejects_unvalidated_spec() {
        let spec = DistributionSpec::Uniform { low: 5.0, high: 1.0 };
        assert!(spec.sampler(Some(1)).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            distribution: DistributionSpec,
        }

        let parsed: Wrapper = ::toml::from_str(
            "[distribution]\ntype = \"triangular\"\nlow = 0.0\nhigh = 4.0\nmode = 1.0\n",
        )
        .unwrap();
        assert_eq!(
            parsed.distribution,
            DistributionSpec::Triangular { low: 0.0, high: 4.0, mode: 1.0 }
        );
    }
}
