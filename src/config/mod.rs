//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::distribution::DistributionSpec;
use crate::stats::Precision;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub trace: TraceConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to generate and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Trace file to write
    pub path: PathBuf,
    /// Number of samples
    #[serde(default = "default_count")]
    pub count: u64,
    /// Sampling distribution
    #[serde(default)]
    pub distribution: DistributionSpec,
    /// PRNG seed for reproducible traces (random if unset)
    pub seed: Option<u64>,
    /// Weight written next to every value (no weight column if unset)
    pub weight: Option<f64>,
}

pub(crate) fn default_count() -> u64 {
    1000
}

/// Aggregation of the generated trace
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Aggregate the trace right after writing it
    #[serde(default)]
    pub enabled: bool,
    /// Significant digits of the mean
    #[serde(default)]
    pub precision: Precision,
}

/// How results are reported
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also write the summary as JSON to this file
    pub json_output: Option<PathBuf>,
}

/// Console output format for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
