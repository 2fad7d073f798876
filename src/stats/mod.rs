//! Trace statistics
//!
//! - [`aggregator`]: exact weighted count, sum and mean using arbitrary-precision decimals
//! - [`float_avg`]: `f64` averaging strategies with different rounding behaviour
//! - [`compare`]: measures how far each `f64` strategy drifts from the exact mean

pub mod aggregator;
pub mod compare;
pub mod float_avg;

pub use aggregator::{aggregate, aggregate_file, Precision, TraceSummary, WeightedAccumulator};
pub use compare::{compare_directory, compare_file, ComparisonReport, ComparisonRow};
pub use float_avg::{float_mean, AverageMethod, SortOrder};

use bigdecimal::BigDecimal;

/// Nearest `f64` to a decimal
///
/// Goes through the decimal string so long expansions round correctly.
/// Values beyond the `f64` range become infinite.
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    canonical(value).to_string().parse().unwrap_or(f64::NAN)
}

/// Strip trailing fractional zeros without switching to exponent notation
///
/// `2.500` becomes `2.5` and `5.00E+2` becomes `500`.
pub fn canonical(value: &BigDecimal) -> BigDecimal {
    let value = value.normalized();
    if value.as_bigint_and_exponent().1 < 0 {
        value.with_scale(0)
    } else {
        value
    }
}
