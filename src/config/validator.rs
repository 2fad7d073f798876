//! Configuration validation

use super::*;
use anyhow::{Context, Result};
use log::warn;
use std::f64::consts::{FRAC_PI_2, PI};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_trace(&config.trace)?;
    validate_aggregate(&config.aggregate, &config.trace)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate trace generation settings
pub fn validate_trace(trace: &TraceConfig) -> Result<()> {
    if trace.path.as_os_str().is_empty() {
        anyhow::bail!("Trace path must not be empty");
    }

    if trace.path.is_dir() {
        anyhow::bail!("Trace path is a directory: {}", trace.path.display());
    }

    trace
        .distribution
        .validate()
        .with_context(|| format!("Invalid distribution {}", trace.distribution))?;

    if let Some(weight) = trace.weight {
        if !weight.is_finite() {
            anyhow::bail!("weight must be finite, got {}", weight);
        }
    }

    if let DistributionSpec::Tangent { freq, phase, .. } = trace.distribution {
        if tangent_crosses_pole(freq, phase, trace.count) {
            warn!(
                "tangent trace crosses a pole; \
                 expect very large values near odd multiples of pi/2"
            );
        }
    }

    Ok(())
}

/// Whether the angles `phase + i * freq` for `i` in `0..count` span a pole
/// of `tan` (an odd multiple of pi/2)
pub(crate) fn tangent_crosses_pole(freq: f64, phase: f64, count: u64) -> bool {
    if count == 0 {
        return false;
    }

    let last = phase + (count - 1) as f64 * freq;
    let (low, high) = if last < phase { (last, phase) } else { (phase, last) };

    let k = ((low - FRAC_PI_2) / PI).ceil();
    FRAC_PI_2 + k * PI <= high
}

/// Validate aggregation settings against the trace they will read
fn validate_aggregate(aggregate: &AggregateConfig, trace: &TraceConfig) -> Result<()> {
    if !aggregate.enabled {
        return Ok(());
    }

    if trace.count == 0 {
        anyhow::bail!("Cannot aggregate an empty trace (count = 0)");
    }

    if trace.weight == Some(0.0) {
        anyhow::bail!("Cannot aggregate a trace whose weights are all zero");
    }

    Ok(())
}

/// Validate output settings
fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.is_dir() {
            anyhow::bail!("JSON output path is a directory: {}", path.display());
        }
    }

    Ok(())
}
