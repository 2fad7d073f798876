//! tracegen - synthetic numeric traces and exact trace statistics
//!
//! tracegen writes traces of values sampled from configurable distributions
//! and reads them back to compute weighted count, sum and mean with
//! arbitrary-precision decimal arithmetic.
//!
//! # Architecture
//!
//! - **Distributions**: uniform, gaussian, triangular, sine, tangent, constant
//! - **Trace files**: plain text, one `value[,weight]` per line after a separator line
//! - **Exact statistics**: decimal accumulation, mean to a chosen number of digits
//! - **Float comparison**: how far `f64` averaging drifts from the exact mean
//!
//! # Example
//!
//! ```
//! use tracegen::distribution::DistributionSpec;
//! use tracegen::stats::{aggregate, Precision};
//! use tracegen::trace::write_trace;
//! use std::io::Cursor;
//!
//! let mut sampler = DistributionSpec::Constant { value: 5.0 }.sampler(None).unwrap();
//! let mut buf = Vec::new();
//! write_trace(&mut buf, sampler.as_mut(), 100, None).unwrap();
//!
//! let summary = aggregate(Cursor::new(buf), Precision::default()).unwrap();
//! assert_eq!(summary.to_string(), "100,500,5");
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod output;
pub mod stats;
pub mod trace;

// Re-export commonly used types
pub use config::Config;
pub use distribution::{DistributionSpec, Sampler};
pub use error::TraceError;
pub use stats::{Precision, TraceSummary};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TraceError>;
