//! Floating-point averaging strategies
//!
//! These exist to measure how much `f64` arithmetic loses against the exact
//! decimal mean, and how much the input order matters.
//!
//! - **Naive**: sum left to right, then divide
//! - **OverflowSafe**: like naive, but when the running sum would overflow the
//!   larger operand is divided out early
//! - **Bucketed**: every value is split into its 53-bit mantissa and binary
//!   exponent, mantissas are summed exactly per exponent in `i128`, and only
//!   the per-bucket quotients are combined in floating point

use super::decimal_to_f64;
use crate::trace::TraceRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of distinct biased exponents in an IEEE 754 double
const EXPONENT_BUCKETS: usize = 1 << 11;

/// Exponent bias plus mantissa width: value = mantissa * 2^(exp - 1075)
const MANTISSA_BIAS: i32 = 1075;

const FRAC_MASK: u64 = (1 << 52) - 1;
const IMPLIED_ONE: i128 = 1 << 52;

/// How to average a slice of `f64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AverageMethod {
    #[default]
    Naive,
    OverflowSafe,
    Bucketed,
}

impl AverageMethod {
    /// Average `values` with `divisor` as the denominator
    pub fn mean(self, values: &[f64], divisor: f64) -> f64 {
        match self {
            AverageMethod::Naive => naive_mean(values, divisor),
            AverageMethod::OverflowSafe => overflow_safe_mean(values, divisor),
            AverageMethod::Bucketed => bucketed_mean(values, divisor),
        }
    }
}

impl fmt::Display for AverageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageMethod::Naive => write!(f, "naive"),
            AverageMethod::OverflowSafe => write!(f, "overflow-safe"),
            AverageMethod::Bucketed => write!(f, "bucketed"),
        }
    }
}

/// Order applied to values before averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep file order
    #[default]
    None,
    Ascending,
    Descending,
    /// Ascending by absolute value
    Magnitude,
}

impl SortOrder {
    pub fn apply(self, values: &mut [f64]) {
        let cmp: fn(&f64, &f64) -> Ordering = match self {
            SortOrder::None => return,
            SortOrder::Ascending => |a: &f64, b: &f64| a.total_cmp(b),
            SortOrder::Descending => |a: &f64, b: &f64| b.total_cmp(a),
            SortOrder::Magnitude => |a: &f64, b: &f64| a.abs().total_cmp(&b.abs()),
        };
        values.sort_by(cmp);
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::None => write!(f, "none"),
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
            SortOrder::Magnitude => write!(f, "magnitude"),
        }
    }
}

/// Weighted `f64` mean of trace rows
///
/// Averages the products `value * weight` over the sum of weights, after
/// reordering the products with `order`.
pub fn float_mean(rows: &[TraceRow], method: AverageMethod, order: SortOrder) -> f64 {
    let mut products = Vec::with_capacity(rows.len());
    let mut divisor = 0.0;

    for row in rows {
        let weight = decimal_to_f64(&row.weight);
        products.push(decimal_to_f64(&row.value) * weight);
        divisor += weight;
    }

    order.apply(&mut products);
    method.mean(&products, divisor)
}

pub fn naive_mean(values: &[f64], divisor: f64) -> f64 {
    values.iter().sum::<f64>() / divisor
}

pub fn overflow_safe_mean(values: &[f64], divisor: f64) -> f64 {
    let mut avg = 0.0;
    let mut sum = 0.0;

    for &val in values {
        let (min, max) = if sum < val { (sum, val) } else { (val, sum) };

        if (min + max).is_infinite() {
            // Move the part of `max` divisible by `divisor` into the average
            let mut rem = max % divisor;
            avg += (max - rem) / divisor;

            if (rem + min).is_infinite() {
                let min_rem = min % divisor;
                avg += (min - min_rem) / divisor;
                rem += min_rem;
                sum = rem;
                continue;
            }

            sum = min + rem;
            continue;
        }

        sum = min + max;
    }

    avg + sum / divisor
}

pub fn bucketed_mean(values: &[f64], divisor: f64) -> f64 {
    if values.iter().any(|v| !v.is_finite()) {
        return naive_mean(values, divisor);
    }

    let mut buckets = vec![0i128; EXPONENT_BUCKETS];

    for &val in values {
        let bits = val.to_bits();
        let exp = ((bits >> 52) & 0x7ff) as usize;
        let frac = (bits & FRAC_MASK) as i128;

        // Subnormals have no implied leading one
        let mantissa = if exp == 0 { frac } else { frac | IMPLIED_ONE };
        buckets[exp] += if val.is_sign_negative() { -mantissa } else { mantissa };
    }

    // Smallest magnitudes first
    let mut total = 0.0;
    for (exp, &sum) in buckets.iter().enumerate() {
        if sum == 0 {
            continue;
        }
        let scale = exp.max(1) as i32 - MANTISSA_BIAS;
        total += ldexp(sum as f64 / divisor, scale);
    }

    total
}

/// `x * 2^exp` without overflowing the intermediate power of two
fn ldexp(mut x: f64, mut exp: i32) -> f64 {
    while exp > 1000 {
        x *= 2f64.powi(1000);
        exp -= 1000;
    }
    while exp < -1000 {
        x *= 2f64.powi(-1000);
        exp += 1000;
    }
    x * 2f64.powi(exp)
}
