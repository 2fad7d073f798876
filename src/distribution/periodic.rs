//! Periodic waveforms
//!
//! Deterministic samplers of the form `amp * f(index * freq + phase) + shift`
//! where `f` is `sin` or `tan`. They use no randomness, so the same index
//! always yields the same value.

use super::Sampler;

/// Waveform applied to the scaled index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Tangent,
}

/// Sampler for `amp * waveform(index * freq + phase) + shift`
#[derive(Debug, Clone)]
pub struct PeriodicSampler {
    waveform: Waveform,
    freq: f64,
    phase: f64,
    amp: f64,
    shift: f64,
}

impl PeriodicSampler {
    pub fn new(waveform: Waveform, freq: f64, phase: f64, amp: f64, shift: f64) -> Self {
        Self {
            waveform,
            freq,
            phase,
            amp,
            shift,
        }
    }

    /// Evaluate the waveform at a (possibly fractional) position
    pub fn evaluate(&self, x: f64) -> f64 {
        let angle = x * self.freq + self.phase;
        let y = match self.waveform {
            Waveform::Sine => angle.sin(),
            Waveform::Tangent => angle.tan(),
        };
        self.amp * y + self.shift
    }
}

impl Sampler for PeriodicSampler {
    fn sample(&mut self, index: u64) -> f64 {
        self.evaluate(index as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_sine_at_zero() {
        let mut sampler = PeriodicSampler::new(Waveform::Sine, 1.0, 0.0, 1.0, 0.0);
        assert_eq!(sampler.sample(0), 0.0);
    }

    #[test]
    fn test_sine_quarter_period() {
        let sampler = PeriodicSampler::new(Waveform::Sine, 1.0, 0.0, 1.0, 0.0);
        assert!((sampler.evaluate(FRAC_PI_2) - 1.0).abs() < 1e-12);

        // Scaled frequency puts the peak on an integer index
        let mut scaled = PeriodicSampler::new(Waveform::Sine, FRAC_PI_2, 0.0, 1.0, 0.0);
        assert!((scaled.sample(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_amp_and_shift() {
        let mut sampler = PeriodicSampler::new(Waveform::Sine, FRAC_PI_2, 0.0, 3.0, 10.0);
        assert!((sampler.sample(1) - 13.0).abs() < 1e-12);
        assert!((sampler.sample(3) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_tangent() {
        let mut sampler = PeriodicSampler::new(Waveform::Tangent, FRAC_PI_4, 0.0, 2.0, 1.0);
        assert_eq!(sampler.sample(0), 1.0);
        assert!((sampler.sample(1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_phase_offset() {
        let mut sampler = PeriodicSampler::new(Waveform::Sine, 1.0, FRAC_PI_2, 1.0, 0.0);
        assert!((sampler.sample(0) - 1.0).abs() < 1e-12);
    }
}
