//! Reading trace files back into rows

use super::TraceRow;
use crate::error::TraceError;
use crate::Result;
use bigdecimal::BigDecimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Parse one data line
///
/// `line_no` is the 1-based line number in the file, used for error
/// messages. Returns `None` for blank lines. Fields past the second are
/// ignored.
pub fn parse_row(line: &str, line_no: usize) -> Result<Option<TraceRow>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(',');
    let value = parse_decimal(fields.next().unwrap_or_default(), line_no, "value")?;
    let weight = match fields.next() {
        Some(text) => parse_decimal(text, line_no, "weight")?,
        None => BigDecimal::from(1),
    };

    Ok(Some(TraceRow { value, weight }))
}

/// Read every data row, skipping the first line
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRow>> {
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if let Some(row) = parse_row(&line, idx + 1)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Read a trace file from disk
pub fn read_trace_file(path: &Path) -> Result<Vec<TraceRow>> {
    let file = File::open(path).map_err(|e| TraceError::io(path, e))?;
    read_trace(BufReader::new(file)).map_err(|e| match e {
        TraceError::Stream(source) => TraceError::io(path, source),
        other => other,
    })
}

fn parse_decimal(text: &str, line: usize, field: &'static str) -> Result<BigDecimal> {
    let text = text.trim();
    BigDecimal::from_str(text).map_err(|_| TraceError::Parse {
        line,
        field,
        text: text.to_string(),
    })
}
