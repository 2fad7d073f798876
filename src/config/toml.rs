//! TOML configuration file parsing
//!
//! ```toml
//! [trace]
//! path = "traces/sine.csv"
//! count = 500
//! seed = 42
//!
//! [trace.distribution]
//! type = "sine"
//! freq = 0.05
//! phase = 0.0
//! amp = 10.0
//! shift = 100.0
//!
//! [aggregate]
//! enabled = true
//! precision = 200
//!
//! [output]
//! format = "json"
//! ```

use super::cli::GenerateArgs;
use super::cli_convert::{
    build_config_from_cli, convert_format, parse_distribution, parse_precision,
};
use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(args: &GenerateArgs, mut config: Config) -> Result<Config> {
    if let Some(ref path) = args.output {
        config.trace.path = path.clone();
    }
    if let Some(spec) = parse_distribution(args.distribution.as_deref(), &args.params)? {
        config.trace.distribution = spec;
    }
    if let Some(count) = args.count {
        config.trace.count = count;
    }
    if args.seed.is_some() {
        config.trace.seed = args.seed;
    }
    if args.weight.is_some() {
        config.trace.weight = args.weight;
    }

    if args.aggregate {
        config.aggregate.enabled = true;
    }
    if let Some(digits) = args.precision {
        config.aggregate.precision = parse_precision(digits)?;
    }

    if let Some(format) = args.format {
        config.output.format = convert_format(format);
    }
    if let Some(ref path) = args.json_output {
        config.output.json_output = Some(path.clone());
    }

    Ok(config)
}

/// Build the run configuration from a config file (if given) and CLI flags
pub fn load_config(args: &GenerateArgs) -> Result<Config> {
    match args.config {
        Some(ref path) => merge_cli_with_config(args, parse_toml_file(path)?),
        None => build_config_from_cli(args),
    }
}
