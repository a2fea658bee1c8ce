//! CSV Output

use crate::ReportError;
use probebench_core::{MetricRow, ResultSet};

/// Renders one header line plus one value line per row.
///
/// The header is the first row's keys in insertion order. Every value line
/// is emitted in the *header's* key order, never a row's own order, so a row
/// whose keys differ in content or order fails with
/// [`ReportError::InconsistentSchema`] before any misaligned line escapes.
pub(crate) fn render_csv(results: &ResultSet) -> Result<Vec<String>, ReportError> {
    let Some(first) = results.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = first.keys().map(str::to_string).collect();

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(header.join(","));

    for (index, row) in results.iter().enumerate() {
        if !row.keys().eq(header.iter().map(String::as_str)) {
            return Err(schema_mismatch(index, &header, row));
        }
        let mut values = Vec::with_capacity(header.len());
        for key in &header {
            let Some(value) = row.get(key) else {
                return Err(schema_mismatch(index, &header, row));
            };
            values.push(value.to_string());
        }
        lines.push(values.join(","));
    }
    Ok(lines)
}

fn schema_mismatch(row_index: usize, header: &[String], row: &MetricRow) -> ReportError {
    ReportError::InconsistentSchema {
        row: row_index,
        expected: header.to_vec(),
        found: row.keys().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probebench_core::MetricRow;

    fn row(pairs: &[(&str, i64)]) -> MetricRow {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn header_comes_from_the_first_row() {
        let results: ResultSet = vec![row(&[("a", 1), ("b", 2)]), row(&[("a", 3), ("b", 4)])]
            .into_iter()
            .collect();
        let lines = render_csv(&results).unwrap();
        assert_eq!(lines, ["a,b", "1,2", "3,4"]);
    }

    #[test]
    fn empty_result_set_renders_nothing() {
        assert!(render_csv(&ResultSet::new()).unwrap().is_empty());
    }

    #[test]
    fn missing_key_fails() {
        let results: ResultSet = vec![row(&[("a", 1), ("b", 2)]), row(&[("a", 1)])]
            .into_iter()
            .collect();
        let err = render_csv(&results).unwrap_err();
        match err {
            ReportError::InconsistentSchema { row, expected, found } => {
                assert_eq!(row, 1);
                assert_eq!(expected, ["a", "b"]);
                assert_eq!(found, ["a"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn reordered_keys_fail() {
        let results: ResultSet = vec![row(&[("a", 1), ("b", 2)]), row(&[("b", 2), ("a", 1)])]
            .into_iter()
            .collect();
        assert!(matches!(
            render_csv(&results),
            Err(ReportError::InconsistentSchema { row: 1, .. })
        ));
    }

    #[test]
    fn extra_key_fails() {
        let results: ResultSet = vec![row(&[("a", 1)]), row(&[("a", 1), ("b", 2)])]
            .into_iter()
            .collect();
        assert!(matches!(
            render_csv(&results),
            Err(ReportError::InconsistentSchema { row: 1, .. })
        ));
    }

    #[test]
    fn negative_values_render_plainly() {
        let results: ResultSet = vec![row(&[("delta", -12)])].into_iter().collect();
        assert_eq!(render_csv(&results).unwrap(), ["delta", "-12"]);
    }
}
