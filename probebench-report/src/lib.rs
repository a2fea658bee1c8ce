#![warn(missing_docs)]
//! probebench report - Report Rendering
//!
//! Renders a finished [`ResultSet`] to text:
//! - CSV: shared header derived from the first row, one value line per row
//! - JSON: a single well-formed array, streamed one row object per line
//!
//! Rendering is decoupled from collection; the chosen format never affects
//! execution semantics. All value ordering derives from the first row's key
//! order — rows that disagree fail rendering instead of silently misaligning
//! columns.

mod csv;
mod json;

use probebench_core::ResultSet;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// Reporting-time failures. These surface after execution; the run's side
/// effects, if any, already happened and are not rolled back.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested format string is not a known report format.
    #[error("unsupported report format: {0:?} (expected \"csv\" or \"json\")")]
    UnsupportedFormat(String),

    /// A row's metric keys diverge from the header row, which would misalign
    /// CSV columns.
    #[error("iteration {row}: metric keys {found:?} do not match the header {expected:?}")]
    InconsistentSchema {
        /// Zero-based index of the offending row.
        row: usize,
        /// Header key order, derived from the first row.
        expected: Vec<String>,
        /// The offending row's key order.
        found: Vec<String>,
    },

    /// A row failed to serialize to JSON.
    #[error("failed to serialize row: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output sink rejected a write.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Report output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a single shared header line.
    Csv,
    /// One JSON array of row objects.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Renders the result set to output lines.
///
/// An empty result set renders to no lines for CSV (there is no first row to
/// derive a header from) and to a bare `[` `]` pair for JSON.
pub fn render(results: &ResultSet, format: OutputFormat) -> Result<Vec<String>, ReportError> {
    match format {
        OutputFormat::Csv => csv::render_csv(results),
        OutputFormat::Json => json::render_json(results),
    }
}

/// Renders and streams the report to `sink`, one line at a time.
///
/// The final line is a plain row (or the JSON closing bracket) terminated by
/// a single newline.
pub fn write_report<W: Write>(
    results: &ResultSet,
    format: OutputFormat,
    sink: &mut W,
) -> Result<(), ReportError> {
    for line in render(results, format)? {
        writeln!(sink, "{line}")?;
    }
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use probebench_core::MetricRow;

    fn row(pairs: &[(&str, i64)]) -> MetricRow {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFormat(s) if s == "xml"));
    }

    #[test]
    fn write_report_terminates_every_line() {
        let results: ResultSet = vec![row(&[("a", 1)]), row(&[("a", 2)])]
            .into_iter()
            .collect();
        let mut sink = Vec::new();
        write_report(&results, OutputFormat::Csv, &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "a\n1\n2\n");
    }
}
