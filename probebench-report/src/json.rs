//! JSON Output

use crate::ReportError;
use probebench_core::ResultSet;

/// Renders a single JSON array, streamed one row object per line.
///
/// The opening `[` and closing `]` get their own lines; every row object but
/// the last carries a trailing comma. Concatenating the lines yields one
/// syntactically valid JSON array, and each object's member order is its
/// row's insertion order.
pub(crate) fn render_json(results: &ResultSet) -> Result<Vec<String>, ReportError> {
    let mut lines = Vec::with_capacity(results.len() + 2);
    lines.push("[".to_string());
    let last = results.len().saturating_sub(1);
    for (index, row) in results.iter().enumerate() {
        let mut line = serde_json::to_string(row)?;
        if index < last {
            line.push(',');
        }
        lines.push(line);
    }
    lines.push("]".to_string());
    Ok(lines)
}
