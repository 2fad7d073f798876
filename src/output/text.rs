//! Human-readable text output

use crate::config::Config;
use crate::stats::{canonical, ComparisonReport, Precision, TraceSummary};
use std::path::Path;

/// Print the generation settings before a run
pub fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Output:       {}", config.trace.path.display());
    println!("  Distribution: {}", config.trace.distribution);
    println!("  Samples:      {}", format_number(config.trace.count));
    match config.trace.seed {
        Some(seed) => println!("  Seed:         {}", seed),
        None => println!("  Seed:         random"),
    }
    if let Some(weight) = config.trace.weight {
        println!("  Weight:       {}", weight);
    }
    if config.aggregate.enabled {
        println!("  Aggregate:    yes ({} digits)", config.aggregate.precision.digits());
    }
}

/// Print one trace summary
pub fn print_summary(path: &Path, summary: &TraceSummary, precision: Precision) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    TRACE SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("File:      {}", path.display());
    println!("Rows:      {}", format_number(summary.rows));
    println!("Count:     {}", canonical(&summary.count));
    println!("Sum:       {}", canonical(&summary.sum));
    println!("Mean:      {}", canonical(&summary.mean));
    println!("Precision: {} significant digits", precision.digits());
}

/// Print a comparison table followed by runtime and average error
pub fn print_comparison(report: &ComparisonReport) {
    println!("Method: {}, order: {}", report.method, report.order);
    println!();
    println!(
        "{:<30} {:>8} {:>21} {:>21} {:>15}",
        "Filename", "Rows", "Avg(Exact)", "Avg(Float)", "Error"
    );

    for row in &report.files {
        println!(
            "{:<30} {:>8} {:>21.10e} {:>21.10e} {:>15.5e}",
            row.file, row.rows, row.exact_mean, row.float_mean, row.error
        );
    }

    println!();
    println!("Files:         {}", report.files.len());
    println!("Runtime:       {:.6} seconds", report.runtime.as_secs_f64());
    println!("Average error: {:.10e}", report.average_error());
}

/// Format number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
