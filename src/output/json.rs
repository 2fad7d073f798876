//! JSON output formatting
//!
//! Decimal statistics are serialized as strings so no digits are lost to a
//! JSON number parser.

use crate::stats::{canonical, Precision, TraceSummary};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Serializable trace summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSummary {
    pub file: String,
    /// RFC 3339 timestamp of when the summary was produced
    pub generated_at: String,
    pub rows: u64,
    pub count: String,
    pub sum: String,
    pub mean: String,
    pub precision: u32,
}

impl JsonSummary {
    pub fn new(path: &Path, summary: &TraceSummary, precision: Precision) -> Self {
        Self {
            file: path.display().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            rows: summary.rows,
            count: canonical(&summary.count).to_string(),
            sum: canonical(&summary.sum).to_string(),
            mean: canonical(&summary.mean).to_string(),
            precision: precision.digits(),
        }
    }
}

/// Write a summary as pretty-printed JSON
pub fn write_json_output(output_path: &Path, summary: &JsonSummary) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("Failed to write JSON output: {}", output_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_json_summary_fields() {
        let summary = aggregate(Cursor::new("\n2,3\n4,1\n"), Precision::default()).unwrap();
        let json = JsonSummary::new(Path::new("traces/test.csv"), &summary, Precision::default());

        assert_eq!(json.file, "traces/test.csv");
        assert_eq!(json.rows, 2);
        assert_eq!(json.count, "4");
        assert_eq!(json.sum, "10");
        assert_eq!(json.mean, "2.5");
        assert_eq!(json.precision, 2000);
    }

    #[test]
    fn test_write_json_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = aggregate(Cursor::new("\n5\n5\n"), Precision::default()).unwrap();
        let json = JsonSummary::new(Path::new("t.csv"), &summary, Precision::default());

        write_json_output(&path, &json).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let read: JsonSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(read, json);
        assert_eq!(read.mean, "5");
    }
}
