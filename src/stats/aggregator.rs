//! Exact weighted aggregation
//!
//! Every row contributes `count += weight` and `sum += value * weight`.
//! Additions and multiplications of decimals are exact, so the only rounding
//! in the whole pipeline is the final division for the mean, which is carried
//! out to a caller-chosen number of significant digits.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tracegen::stats::{aggregate, Precision};
//!
//! let summary = aggregate(Cursor::new("\n2,3\n4,1\n"), Precision::default()).unwrap();
//! assert_eq!(summary.to_string(), "4,10,2.5");
//! ```

use super::canonical;
use crate::error::TraceError;
use crate::trace::{parse_row, TraceRow};
use crate::Result;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default number of significant digits for the mean
pub const DEFAULT_PRECISION: u32 = 2000;

/// Significant decimal digits kept in the mean
///
/// Only the mean is rounded; count and sum are always exact. There is no
/// upper bound beyond available memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    pub fn new(digits: u32) -> Result<Self> {
        if digits == 0 {
            return Err(TraceError::InvalidPrecision(digits));
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

impl TryFrom<u32> for Precision {
    type Error = TraceError;

    fn try_from(digits: u32) -> Result<Self> {
        Self::new(digits)
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> u32 {
        p.0
    }
}

/// Weighted statistics of one trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    /// Number of data rows read
    pub rows: u64,
    /// Sum of weights
    pub count: BigDecimal,
    /// Sum of value * weight
    pub sum: BigDecimal,
    /// sum / count, rounded to the requested precision
    pub mean: BigDecimal,
}

impl fmt::Display for TraceSummary {
    /// `count,sum,mean` on one line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            canonical(&self.count),
            canonical(&self.sum),
            canonical(&self.mean)
        )
    }
}

/// Running weighted count and sum
#[derive(Debug, Clone)]
pub struct WeightedAccumulator {
    rows: u64,
    count: BigDecimal,
    sum: BigDecimal,
}

impl WeightedAccumulator {
    pub fn new() -> Self {
        Self {
            rows: 0,
            count: BigDecimal::zero(),
            sum: BigDecimal::zero(),
        }
    }

    /// Add one row
    pub fn push(&mut self, row: &TraceRow) {
        self.rows += 1;
        self.count += &row.weight;
        self.sum += &row.value * &row.weight;
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Compute the summary
    ///
    /// Fails with [`TraceError::EmptyTrace`] when no rows were pushed and with
    /// [`TraceError::ZeroWeight`] when the weights cancel out.
    pub fn finish(self, precision: Precision) -> Result<TraceSummary> {
        if self.rows == 0 {
            return Err(TraceError::EmptyTrace);
        }
        if self.count.is_zero() {
            return Err(TraceError::ZeroWeight { rows: self.rows });
        }

        let mean = divide(&self.sum, &self.count, precision);

        Ok(TraceSummary {
            rows: self.rows,
            count: self.count,
            sum: self.sum,
            mean,
        })
    }
}

impl Default for WeightedAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<TraceRow> for WeightedAccumulator {
    fn extend<I: IntoIterator<Item = TraceRow>>(&mut self, iter: I) {
        for row in iter {
            self.push(&row);
        }
    }
}

/// Aggregate a trace from any reader, skipping its first line
pub fn aggregate<R: BufRead>(reader: R, precision: Precision) -> Result<TraceSummary> {
    let mut acc = WeightedAccumulator::new();

    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if let Some(row) = parse_row(&line, idx + 1)? {
            acc.push(&row);
        }
    }

    acc.finish(precision)
}

/// Aggregate a trace file
pub fn aggregate_file(path: &Path, precision: Precision) -> Result<TraceSummary> {
    let file = File::open(path).map_err(|e| TraceError::io(path, e))?;
    aggregate(BufReader::new(file), precision).map_err(|e| match e {
        TraceError::Stream(source) => TraceError::io(path, source),
        other => other,
    })
}

/// `num / den` to `precision` significant digits
///
/// Both operands are unpacked to `digits * 10^-scale`. The numerator is
/// scaled up so the integer quotient carries at least one digit past the
/// requested precision. Those trailing digits and the division remainder
/// decide the rounding, which is half-to-even.
fn divide(num: &BigDecimal, den: &BigDecimal, precision: Precision) -> BigDecimal {
    if num.is_zero() {
        return BigDecimal::zero();
    }

    let (num_digits, num_scale) = num.as_bigint_and_exponent();
    let (den_digits, den_scale) = den.as_bigint_and_exponent();
    let sign = if num_digits.sign() == den_digits.sign() {
        Sign::Plus
    } else {
        Sign::Minus
    };

    let digits = i64::from(precision.digits());
    let extra =
        digits + digit_count(den_digits.magnitude()) - digit_count(num_digits.magnitude()) + 1;
    let extra = u32::try_from(extra.max(0)).unwrap_or(u32::MAX);

    let scaled = num_digits.magnitude() * BigUint::from(10u8).pow(extra);
    let quotient = &scaled / den_digits.magnitude();
    let inexact = !(&scaled % den_digits.magnitude()).is_zero();

    let excess = u32::try_from(digit_count(&quotient) - digits).unwrap_or(0);
    let unit = BigUint::from(10u8).pow(excess);
    let mut kept = &quotient / &unit;
    let dropped = &quotient % &unit;
    let half = &unit / 2u8;

    let round_up = match dropped.cmp(&half) {
        Ordering::Greater => true,
        Ordering::Equal => inexact || kept.bit(0),
        Ordering::Less => false,
    };
    if round_up {
        kept += 1u8;
    }

    let scale = num_scale - den_scale + i64::from(extra) - i64::from(excess);
    BigDecimal::new(BigInt::from_biguint(sign, kept), scale)
}

fn digit_count(n: &BigUint) -> i64 {
    n.to_string().len() as i64
}
