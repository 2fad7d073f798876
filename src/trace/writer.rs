//! Writing generated traces

use crate::distribution::Sampler;
use crate::error::TraceError;
use crate::Result;
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a trace to any writer
///
/// Emits the blank separator line, then one line per index in `0..count`.
/// When `weight` is set every line becomes `value,weight`. Values use the
/// shortest representation that reads back to the same `f64`.
///
/// Stops with [`TraceError::NonFiniteSample`] at the first infinite or NaN
/// sample; rows before it have already been written.
///
/// Returns the number of rows written.
pub fn write_trace<W, S>(
    out: &mut W,
    sampler: &mut S,
    count: u64,
    weight: Option<f64>,
) -> Result<u64>
where
    W: Write,
    S: Sampler + ?Sized,
{
    writeln!(out)?;

    for index in 0..count {
        let value = sampler.sample(index);
        if !value.is_finite() {
            return Err(TraceError::NonFiniteSample { index, value });
        }
        match weight {
            Some(w) => writeln!(out, "{},{}", value, w)?,
            None => writeln!(out, "{}", value)?,
        }
    }

    Ok(count)
}

/// Generate a trace file at `path`
///
/// Missing parent directories are created. The file is truncated if it
/// already exists.
pub fn generate_trace<S>(
    path: &Path,
    sampler: &mut S,
    count: u64,
    weight: Option<f64>,
) -> Result<u64>
where
    S: Sampler + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TraceError::io(parent, e))?;
    }

    debug!("Writing {} samples to {}", count, path.display());

    let file = File::create(path).map_err(|e| TraceError::io(path, e))?;
    let mut out = BufWriter::new(file);

    let written = write_trace(&mut out, sampler, count, weight).map_err(|e| match e {
        TraceError::Stream(source) => TraceError::io(path, source),
        other => other,
    })?;
    out.flush().map_err(|e| TraceError::io(path, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::constant::ConstantSampler;
    use crate::distribution::periodic::{PeriodicSampler, Waveform};
    use crate::distribution::DistributionSpec;
    use crate::trace::read_trace_file;
    use tempfile::TempDir;

    #[test]
    fn test_write_trace_format() {
        let mut out = Vec::new();
        let mut sampler = ConstantSampler::new(1.5);

        let written = write_trace(&mut out, &mut sampler, 3, None).unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "\n1.5\n1.5\n1.5\n");
    }

    #[test]
    fn test_write_trace_with_weight() {
        let mut out = Vec::new();
        let mut sampler = ConstantSampler::new(-2.0);

        write_trace(&mut out, &mut sampler, 2, Some(0.5)).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\n-2,0.5\n-2,0.5\n");
    }

    #[test]
    fn test_write_trace_zero_count() {
        let mut out = Vec::new();
        let mut sampler = ConstantSampler::new(1.0);

        assert_eq!(write_trace(&mut out, &mut sampler, 0, None).unwrap(), 0);
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_overflowing_sample_rejected() {
        let mut out = Vec::new();
        // 1e308 * sin(1) + 1e308 overflows to +inf
        let mut sampler = PeriodicSampler::new(Waveform::Sine, 1.0, 1.0, 1e308, 1e308);

        let err = write_trace(&mut out, &mut sampler, 5, None).unwrap_err();

        match err {
            TraceError::NonFiniteSample { index, value } => {
                assert_eq!(index, 0);
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_nan_sample_rejected() {
        let mut out = Vec::new();
        let mut sampler = ConstantSampler::new(f64::NAN);

        let err = write_trace(&mut out, &mut sampler, 3, Some(1.0)).unwrap_err();
        assert!(matches!(err, TraceError::NonFiniteSample { index: 0, .. }));
    }

    #[test]
    fn test_generated_file_always_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.csv");
        let mut sampler = PeriodicSampler::new(Waveform::Sine, 1.0, 1.0, 1e308, 1e308);

        let err = generate_trace(&path, &mut sampler, 5, None).unwrap_err();
        assert!(matches!(err, TraceError::NonFiniteSample { .. }));

        // Nothing unparseable reached the file
        assert!(matches!(read_trace_file(&path), Ok(rows) if rows.is_empty()));
    }

    #[test]
    fn test_generate_trace_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/traces/test.csv");
        let mut sampler = ConstantSampler::new(5.0);

        generate_trace(&path, &mut sampler, 10, None).unwrap();

        let rows = read_trace_file(&path).unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_generated_values_read_back_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gaussian.csv");
        let spec = DistributionSpec::Gaussian { mean: 0.0, stddev: 1.0 };

        let mut sampler = spec.sampler(Some(11)).unwrap();
        generate_trace(&path, sampler.as_mut(), 50, None).unwrap();

        let mut replay = spec.sampler(Some(11)).unwrap();
        let rows = read_trace_file(&path).unwrap();
        for (index, row) in rows.iter().enumerate() {
            let expected = replay.sample(index as u64);
            let parsed: f64 = row.value.to_string().parse().unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_same_seed_same_trace() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let spec = DistributionSpec::Triangular { low: 0.0, high: 1.0, mode: 0.3 };

        generate_trace(&a, spec.sampler(Some(99)).unwrap().as_mut(), 100, None).unwrap();
        generate_trace(&b, spec.sampler(Some(99)).unwrap().as_mut(), 100, None).unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }
}
