//! Per-metric summary statistics for human output.
//!
//! When no report format is selected the run still needs to tell the
//! operator something useful; this module condenses the result set into one
//! line per metric column.

use probebench_core::ResultSet;

/// Condensed statistics for one metric column, all in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    /// Metric name, in first-row column order.
    pub metric: String,
    /// Number of rows carrying this metric.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest observed value.
    pub min: i64,
    /// Median (nearest-rank).
    pub p50: i64,
    /// 95th percentile (nearest-rank).
    pub p95: i64,
    /// Largest observed value.
    pub max: i64,
}

/// Summarizes every metric column, in the first row's key order.
pub fn summarize(results: &ResultSet) -> Vec<MetricSummary> {
    let Some(first) = results.first() else {
        return Vec::new();
    };
    first
        .keys()
        .map(|key| {
            let mut values: Vec<i64> = results.iter().filter_map(|row| row.get(key)).collect();
            values.sort_unstable();
            let count = values.len();
            let sum: i64 = values.iter().sum();
            MetricSummary {
                metric: key.to_string(),
                count,
                mean: sum as f64 / count as f64,
                min: values[0],
                p50: percentile(&values, 50.0),
                p95: percentile(&values, 95.0),
                max: values[count - 1],
            }
        })
        .collect()
}

/// Nearest-rank percentile over an ascending-sorted slice.
fn percentile(sorted: &[i64], p: f64) -> i64 {
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Format summaries for human-readable terminal display
pub fn format_summary(summaries: &[MetricSummary]) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("probebench results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    if summaries.is_empty() {
        output.push_str("No results collected.\n");
        return output;
    }

    let name_width = summaries
        .iter()
        .map(|s| s.metric.len())
        .max()
        .unwrap_or(6)
        .max(6);

    output.push_str(&format!(
        "  {:<name_width$}  {:>6}  {:>9}  {:>7}  {:>7}  {:>7}  {:>7}\n",
        "metric", "count", "mean ms", "min", "p50", "p95", "max"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(name_width + 52)));

    for s in summaries {
        output.push_str(&format!(
            "  {:<name_width$}  {:>6}  {:>9.1}  {:>7}  {:>7}  {:>7}  {:>7}\n",
            s.metric, s.count, s.mean, s.min, s.p50, s.p95, s.max
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use probebench_core::MetricRow;

    fn results(rows: &[&[(&str, i64)]]) -> ResultSet {
        rows.iter()
            .map(|pairs| pairs.iter().map(|&(k, v)| (k, v)).collect::<MetricRow>())
            .collect()
    }

    #[test]
    fn summarizes_in_column_order() {
        let set = results(&[
            &[("create", 10), ("fetch", 5)],
            &[("create", 20), ("fetch", 15)],
        ]);
        let summaries = summarize(&set);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].metric, "create");
        assert_eq!(summaries[0].count, 2);
        assert!((summaries[0].mean - 15.0).abs() < f64::EPSILON);
        assert_eq!(summaries[0].min, 10);
        assert_eq!(summaries[0].max, 20);
        assert_eq!(summaries[1].metric, "fetch");
    }

    #[test]
    fn percentiles_use_nearest_rank() {
        let values: Vec<i64> = (1..=100).collect();
        assert_eq!(percentile(&values, 50.0), 50);
        assert_eq!(percentile(&values, 95.0), 95);
        assert_eq!(percentile(&[7], 95.0), 7);
    }

    #[test]
    fn empty_results_have_no_summaries() {
        assert!(summarize(&ResultSet::new()).is_empty());
        let text = format_summary(&[]);
        assert!(text.contains("No results collected."));
    }

    #[test]
    fn table_lines_up_headers_and_values() {
        let set = results(&[&[("acquire", 100)]]);
        let text = format_summary(&summarize(&set));
        assert!(text.contains("acquire"));
        assert!(text.contains("count"));
    }
}
