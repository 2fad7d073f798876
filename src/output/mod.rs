//! Result reporting
//!
//! - [`text`]: human-readable console output
//! - [`json`]: machine-readable summaries
//!
//! The `csv` format is the single `count,sum,mean` line produced by
//! [`TraceSummary`]'s `Display` impl.

pub mod json;
pub mod text;

use crate::config::OutputFormat;
use crate::stats::{Precision, TraceSummary};
use anyhow::Result;
use std::path::Path;

/// Print a summary to stdout in the requested format
pub fn print_summary(
    path: &Path,
    summary: &TraceSummary,
    precision: Precision,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => text::print_summary(path, summary, precision),
        OutputFormat::Csv => println!("{}", summary),
        OutputFormat::Json => {
            let report = json::JsonSummary::new(path, summary, precision);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
