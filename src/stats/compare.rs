//! Exact-versus-float comparison over a directory of traces
//!
//! Each trace is aggregated exactly and averaged with one [`AverageMethod`].
//! The relative error of the float result shows how much precision the
//! method loses on that data.

use super::aggregator::{Precision, WeightedAccumulator};
use super::decimal_to_f64;
use super::float_avg::{float_mean, AverageMethod, SortOrder};
use crate::error::TraceError;
use crate::trace::read_trace_file;
use crate::Result;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result for one trace file
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub file: String,
    pub rows: u64,
    /// Exact mean rounded to the nearest `f64`
    pub exact_mean: f64,
    pub float_mean: f64,
    /// `(exact - float) / exact`, or the absolute difference when the exact mean is zero
    pub error: f64,
}

/// Results for a directory of traces
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub method: AverageMethod,
    pub order: SortOrder,
    pub files: Vec<ComparisonRow>,
    pub runtime: Duration,
}

impl ComparisonReport {
    /// Mean absolute relative error across files; zero when no file was compared
    pub fn average_error(&self) -> f64 {
        if self.files.is_empty() {
            return 0.0;
        }
        self.files.iter().map(|r| r.error.abs()).sum::<f64>() / self.files.len() as f64
    }
}

/// Compare one trace file
pub fn compare_file(
    path: &Path,
    method: AverageMethod,
    order: SortOrder,
    precision: Precision,
) -> Result<ComparisonRow> {
    let rows = read_trace_file(path)?;

    let mut acc = WeightedAccumulator::new();
    for row in &rows {
        acc.push(row);
    }
    let summary = acc.finish(precision)?;

    let exact_mean = decimal_to_f64(&summary.mean);
    let float_mean = float_mean(&rows, method, order);

    let error = if exact_mean == 0.0 {
        (exact_mean - float_mean).abs()
    } else {
        (exact_mean - float_mean) / exact_mean
    };

    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ComparisonRow {
        file,
        rows: summary.rows,
        exact_mean,
        float_mean,
        error,
    })
}

/// Compare every file in `dir` with the given extension, in name order
///
/// Files that fail to read or aggregate are logged and skipped.
pub fn compare_directory(
    dir: &Path,
    extension: &str,
    method: AverageMethod,
    order: SortOrder,
    precision: Precision,
) -> Result<ComparisonReport> {
    let start = Instant::now();
    let paths = list_traces(dir, extension)?;
    debug!("Comparing {} traces in {}", paths.len(), dir.display());

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        match compare_file(path, method, order, precision) {
            Ok(row) => files.push(row),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    Ok(ComparisonReport {
        method,
        order,
        files,
        runtime: start.elapsed(),
    })
}

fn list_traces(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let entries = fs::read_dir(dir).map_err(|e| TraceError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TraceError::io(dir, e))?.path();
        let matches = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if path.is_file() && matches {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_compare_file_exact_data() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", "\n1\n2\n3\n");

        let row = compare_file(
            &dir.path().join("a.csv"),
            AverageMethod::Naive,
            SortOrder::None,
            Precision::default(),
        )
        .unwrap();

        assert_eq!(row.file, "a.csv");
        assert_eq!(row.rows, 3);
        assert_eq!(row.exact_mean, 2.0);
        assert_eq!(row.float_mean, 2.0);
        assert_eq!(row.error, 0.0);
    }

    #[test]
    fn test_compare_file_detects_float_loss() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "loss.csv", "\n10000000000000000\n1\n-10000000000000000\n1\n");
        let path = dir.path().join("loss.csv");

        let precision = Precision::default();
        let naive = compare_file(&path, AverageMethod::Naive, SortOrder::None, precision).unwrap();
        assert_eq!(naive.exact_mean, 0.5);
        assert_eq!(naive.float_mean, 0.25);
        assert_eq!(naive.error, 0.5);

        let bucketed =
            compare_file(&path, AverageMethod::Bucketed, SortOrder::None, precision).unwrap();
        assert_eq!(bucketed.error, 0.0);
    }

    #[test]
    fn test_compare_directory_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.csv", "\n4\n");
        write(dir.path(), "a.CSV", "\n2\n");
        write(dir.path(), "notes.txt", "\n1\n");
        write(dir.path(), "empty.csv", "\n");
        fs::create_dir(dir.path().join("sub.csv")).unwrap();

        let report = compare_directory(
            dir.path(),
            ".csv",
            AverageMethod::Naive,
            SortOrder::None,
            Precision::default(),
        )
        .unwrap();

        // empty.csv fails to aggregate and is skipped
        let names: Vec<&str> = report.files.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
        assert_eq!(report.average_error(), 0.0);
    }

    #[test]
    fn test_compare_directory_missing() {
        let err = compare_directory(
            Path::new("/nonexistent/traces"),
            "csv",
            AverageMethod::Naive,
            SortOrder::None,
            Precision::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }

    #[test]
    fn test_average_error() {
        let row = |error| ComparisonRow {
            file: String::new(),
            rows: 1,
            exact_mean: 1.0,
            float_mean: 1.0,
            error,
        };
        let report = ComparisonReport {
            method: AverageMethod::Naive,
            order: SortOrder::None,
            files: vec![row(0.5), row(-0.25)],
            runtime: Duration::ZERO,
        };

        assert_eq!(report.average_error(), 0.375);
    }
}
