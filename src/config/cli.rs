//! CLI argument parsing using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tracegen - synthetic numeric traces and exact trace statistics
#[derive(Parser, Debug)]
#[command(name = "tracegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a trace file, optionally aggregating it afterwards
    Generate(GenerateArgs),
    /// Compute weighted count, sum and mean of a trace file
    Aggregate(AggregateArgs),
    /// Compare exact and floating-point means over a directory of traces
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Trace file to write (overrides the config file)
    #[arg(value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Distribution Options ===
    /// Distribution tag (uniform, gaussian, triangular, sine, tangent, constant)
    /// or compact form such as "sine(0.1,0,1,0)"
    #[arg(short = 'd', long)]
    pub distribution: Option<String>,

    /// Distribution parameters, comma-separated, in tag order
    #[arg(short = 'p', long = "param", value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Vec<f64>,

    /// Number of samples
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// PRNG seed for reproducible traces
    #[arg(long)]
    pub seed: Option<u64>,

    /// Weight written next to every value
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,

    // === Aggregation Options ===
    /// Aggregate the trace after writing it
    #[arg(short = 'a', long)]
    pub aggregate: bool,

    /// Significant digits of the mean
    #[arg(long)]
    pub precision: Option<u32>,

    // === Output Options ===
    /// Summary output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Also write the summary as JSON to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Validate and print the configuration without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Trace file to read
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Significant digits of the mean
    #[arg(long, default_value = "2000")]
    pub precision: u32,

    /// Summary output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Also write the summary as JSON to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Directory containing trace files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Extension of trace files to include
    #[arg(long, default_value = "csv")]
    pub extension: String,

    /// Floating-point averaging method
    #[arg(long, value_enum, default_value = "naive")]
    pub method: MethodArg,

    /// Order applied to values before averaging
    #[arg(long, value_enum, default_value = "none")]
    pub order: OrderArg,

    /// Significant digits of the exact mean
    #[arg(long, default_value = "2000")]
    pub precision: u32,
}

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Labelled text block
    Text,
    /// Single count,sum,mean line
    Csv,
    /// JSON document
    Json,
}

/// Floating-point averaging method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Sum then divide
    Naive,
    /// Divide early when the running sum would overflow
    OverflowSafe,
    /// Exact per-exponent mantissa sums
    Bucketed,
}

/// Value ordering before averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    None,
    Ascending,
    Descending,
    Magnitude,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Generate(args) => args.validate(),
            Command::Aggregate(args) => validate_precision(args.precision),
            Command::Compare(args) => {
                if args.extension.trim_start_matches('.').is_empty() {
                    anyhow::bail!("--extension must not be empty");
                }
                validate_precision(args.precision)
            }
        }
    }
}

impl GenerateArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.config.is_none() && self.output.is_none() {
            anyhow::bail!("Output path required (or use --config)");
        }

        if !self.params.is_empty() {
            match self.distribution.as_deref() {
                None => anyhow::bail!("--param requires --distribution"),
                Some(expr) if expr.contains('(') => {
                    anyhow::bail!(
                        "Give parameters either inline in --distribution or with --param, not both"
                    )
                }
                Some(_) => {}
            }
        }

        if let Some(precision) = self.precision {
            validate_precision(precision)?;
        }

        Ok(())
    }
}

fn validate_precision(precision: u32) -> anyhow::Result<()> {
    if precision == 0 {
        anyhow::bail!("--precision must be at least 1");
    }
    Ok(())
}
