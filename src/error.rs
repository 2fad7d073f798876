//! Error types for trace generation and aggregation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the trace library
#[derive(Debug, Error)]
pub enum TraceError {
    /// Reading or writing a trace file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a stream with no known path failed
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// A field could not be parsed as a decimal number
    #[error("line {line}: invalid {field} '{text}'")]
    Parse {
        line: usize,
        field: &'static str,
        text: String,
    },

    /// The trace had no data rows after the header line
    #[error("trace contains no data rows")]
    EmptyTrace,

    /// The weights of all rows summed to zero
    #[error("trace weights sum to zero ({rows} rows)")]
    ZeroWeight { rows: u64 },

    /// Distribution tag is not one of the supported distributions
    #[error(
        "unknown distribution '{0}' \
         (expected uniform, gaussian, triangular, sine, tangent or constant)"
    )]
    UnknownDistribution(String),

    /// Wrong number of parameters for a distribution
    #[error("{name} takes {expected} parameter(s), got {got}")]
    ParameterCount {
        name: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// Parameters are outside the distribution's domain
    #[error("invalid {name} parameters: {reason}")]
    InvalidParameters { name: &'static str, reason: String },

    /// A sampler produced an infinite or NaN value
    #[error("sample {index} is not finite ({value})")]
    NonFiniteSample { index: u64, value: f64 },

    /// Precision must be at least one significant digit
    #[error("precision must be at least 1 digit, got {0}")]
    InvalidPrecision(u32),
}

impl TraceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TraceError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TraceError::InvalidParameters {
            name,
            reason: reason.into(),
        }
    }
}
