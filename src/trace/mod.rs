//! Trace file format
//!
//! A trace is plain text. The first line is a separator and is ignored by
//! readers; the generator writes it blank. Every following line holds one
//! sample, optionally followed by a comma and a weight:
//!
//! ```text
//!
//! 0.25
//! 1.5,3
//! -2e-3,0.5
//! ```
//!
//! A missing weight counts as 1. Blank lines are skipped. Values are decimal
//! strings and are read back as arbitrary-precision decimals, so nothing is
//! lost between writing an `f64` and aggregating it.

pub mod reader;
pub mod writer;

pub use reader::{parse_row, read_trace, read_trace_file};
pub use writer::{generate_trace, write_trace};

use bigdecimal::BigDecimal;

/// One data line of a trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub value: BigDecimal,
    pub weight: BigDecimal,
}

impl TraceRow {
    /// Row with weight 1
    pub fn unweighted(value: BigDecimal) -> Self {
        Self {
            value,
            weight: BigDecimal::from(1),
        }
    }
}
