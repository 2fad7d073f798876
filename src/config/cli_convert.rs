//! CLI to Config conversion utilities

use crate::config::cli::{self, GenerateArgs};
use crate::config::{
    default_count, AggregateConfig, Config, OutputConfig, OutputFormat, TraceConfig,
};
use crate::distribution::DistributionSpec;
use crate::stats::{AverageMethod, Precision, SortOrder};
use anyhow::{Context, Result};

/// Resolve `--distribution` and `--param` into a distribution
///
/// Returns `None` when no distribution was given on the command line.
pub fn parse_distribution(expr: Option<&str>, params: &[f64]) -> Result<Option<DistributionSpec>> {
    let Some(expr) = expr else {
        if !params.is_empty() {
            anyhow::bail!("--param requires --distribution");
        }
        return Ok(None);
    };

    let parsed = if expr.contains('(') {
        if !params.is_empty() {
            anyhow::bail!("Parameters given both inline and with --param: {}", expr);
        }
        DistributionSpec::parse(expr)
    } else {
        DistributionSpec::from_tag(expr, params)
    };
    let spec = parsed.with_context(|| format!("Invalid distribution: {}", expr))?;

    Ok(Some(spec))
}

/// Convert a CLI precision to a checked precision
pub fn parse_precision(digits: u32) -> Result<Precision> {
    Precision::new(digits).context("Invalid precision")
}

/// Convert CLI FormatArg to OutputFormat
pub fn convert_format(arg: cli::FormatArg) -> OutputFormat {
    match arg {
        cli::FormatArg::Text => OutputFormat::Text,
        cli::FormatArg::Csv => OutputFormat::Csv,
        cli::FormatArg::Json => OutputFormat::Json,
    }
}

/// Convert CLI MethodArg to AverageMethod
pub fn convert_method(arg: cli::MethodArg) -> AverageMethod {
    match arg {
        cli::MethodArg::Naive => AverageMethod::Naive,
        cli::MethodArg::OverflowSafe => AverageMethod::OverflowSafe,
        cli::MethodArg::Bucketed => AverageMethod::Bucketed,
    }
}

/// Convert CLI OrderArg to SortOrder
pub fn convert_order(arg: cli::OrderArg) -> SortOrder {
    match arg {
        cli::OrderArg::None => SortOrder::None,
        cli::OrderArg::Ascending => SortOrder::Ascending,
        cli::OrderArg::Descending => SortOrder::Descending,
        cli::OrderArg::Magnitude => SortOrder::Magnitude,
    }
}

/// Build a configuration from CLI arguments alone
pub fn build_config_from_cli(args: &GenerateArgs) -> Result<Config> {
    let path = args
        .output
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Output path required"))?;

    let distribution =
        parse_distribution(args.distribution.as_deref(), &args.params)?.unwrap_or_default();

    let precision = match args.precision {
        Some(digits) => parse_precision(digits)?,
        None => Precision::default(),
    };

    Ok(Config {
        trace: TraceConfig {
            path,
            count: args.count.unwrap_or_else(default_count),
            distribution,
            seed: args.seed,
            weight: args.weight,
        },
        aggregate: AggregateConfig {
            enabled: args.aggregate,
            precision,
        },
        output: OutputConfig {
            format: args.format.map(convert_format).unwrap_or_default(),
            json_output: args.json_output.clone(),
        },
    })
}
