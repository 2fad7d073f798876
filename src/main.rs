//! tracegen CLI entry point

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, info};
use std::path::Path;
use tracegen::config::cli::{AggregateArgs, Cli, Command, CompareArgs, GenerateArgs};
use tracegen::config::{cli_convert, toml, validator, OutputConfig, OutputFormat};
use tracegen::output::{self, json::JsonSummary, text};
use tracegen::stats::{self, Precision};
use tracegen::trace;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    cli.validate()?;

    match cli.command {
        Command::Generate(args) => run_generate(&args),
        Command::Aggregate(args) => run_aggregate(&args),
        Command::Compare(args) => run_compare(&args),
    }
}

/// Generate a trace, then aggregate it if requested
fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = toml::load_config(args)?;

    validator::validate_config(&config).context("Configuration validation failed")?;

    if config.output.format == OutputFormat::Text {
        text::print_configuration(&config);
    }

    if args.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let mut sampler = config
        .trace
        .distribution
        .sampler(config.trace.seed)
        .context("Failed to build sampler")?;

    let written = trace::generate_trace(
        &config.trace.path,
        sampler.as_mut(),
        config.trace.count,
        config.trace.weight,
    )
    .context("Failed to write trace")?;
    info!("Wrote {} samples to {}", written, config.trace.path.display());

    if config.aggregate.enabled {
        if config.output.format == OutputFormat::Text {
            println!();
        }
        summarize(&config.trace.path, config.aggregate.precision, &config.output)?;
    }

    Ok(())
}

fn run_aggregate(args: &AggregateArgs) -> Result<()> {
    let precision = cli_convert::parse_precision(args.precision)?;
    let output = OutputConfig {
        format: cli_convert::convert_format(args.format),
        json_output: args.json_output.clone(),
    };

    summarize(&args.path, precision, &output)
}

fn run_compare(args: &CompareArgs) -> Result<()> {
    let precision = cli_convert::parse_precision(args.precision)?;

    let report = stats::compare_directory(
        &args.dir,
        &args.extension,
        cli_convert::convert_method(args.method),
        cli_convert::convert_order(args.order),
        precision,
    )
    .with_context(|| format!("Failed to compare traces in {}", args.dir.display()))?;

    if report.files.is_empty() {
        anyhow::bail!(
            "No .{} traces could be compared in {}",
            args.extension.trim_start_matches('.'),
            args.dir.display()
        );
    }

    text::print_comparison(&report);
    Ok(())
}

/// Aggregate a trace file and report the summary
fn summarize(path: &Path, precision: Precision, output: &OutputConfig) -> Result<()> {
    debug!("Aggregating {} with {} digits", path.display(), precision.digits());

    let summary = stats::aggregate_file(path, precision)
        .with_context(|| format!("Failed to aggregate {}", path.display()))?;

    output::print_summary(path, &summary, precision, output.format)?;

    if let Some(ref json_path) = output.json_output {
        let report = JsonSummary::new(path, &summary, precision);
        output::json::write_json_output(json_path, &report)?;
        info!("Wrote JSON summary to {}", json_path.display());
    }

    Ok(())
}
