//! Per-iteration metric rows and the ordered result collection.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::time::Duration;

/// Ordered mapping from metric name to a signed 64-bit value.
///
/// One row is produced by a single probe invocation. Insertion order is
/// preserved and drives the column order of rendered reports, so a probe that
/// records `create` before `fetch` always reports them in that order.
/// Re-inserting an existing name overwrites its value in place without moving
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricRow {
    entries: Vec<(String, i64)>,
}

impl MetricRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, keeping the name's original position if it was
    /// already present.
    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Records an elapsed duration under `name`, in whole milliseconds.
    pub fn record(&mut self, name: impl Into<String>, elapsed: Duration) {
        self.insert(name, elapsed.as_millis() as i64);
    }

    /// Looks up a metric by name.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    /// Metric names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of metrics in the row.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row holds no metrics.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, i64)> for MetricRow {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

impl<'a> FromIterator<(&'a str, i64)> for MetricRow {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

impl Serialize for MetricRow {
    /// Serializes as a map whose member order is the row's insertion order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered sequence of [`MetricRow`], one per executed iteration.
///
/// Rows are indexed by submission order, never by completion order; the
/// collector appends them as it resolves handles in issue order. Once all
/// iterations have resolved the set is handed to reporting as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<MetricRow>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set that can hold `capacity` rows without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Appends the next iteration's row.
    pub fn push(&mut self, row: MetricRow) {
        self.rows.push(row);
    }

    /// Row for iteration `index`, if that iteration produced one.
    pub fn get(&self, index: usize) -> Option<&MetricRow> {
        self.rows.get(index)
    }

    /// First row, which defines the report schema.
    pub fn first(&self) -> Option<&MetricRow> {
        self.rows.first()
    }

    /// Rows in iteration order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricRow> {
        self.rows.iter()
    }

    /// Number of collected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<MetricRow> for ResultSet {
    fn from_iter<I: IntoIterator<Item = MetricRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MetricRow;
    type IntoIter = std::slice::Iter<'a, MetricRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut row = MetricRow::new();
        row.insert("zulu", 1);
        row.insert("alpha", 2);
        row.insert("mike", 3);

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut row = MetricRow::new();
        row.insert("create", 10);
        row.insert("fetch", 20);
        row.insert("create", 11);

        let pairs: Vec<(&str, i64)> = row.iter().collect();
        assert_eq!(pairs, [("create", 11), ("fetch", 20)]);
    }

    #[test]
    fn record_stores_whole_milliseconds() {
        let mut row = MetricRow::new();
        row.record("create", Duration::from_micros(2500));
        assert_eq!(row.get("create"), Some(2));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let row: MetricRow = [("b", 2), ("a", 1)].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn result_set_keeps_push_order() {
        let mut set = ResultSet::new();
        set.push([("a", 1)].into_iter().collect());
        set.push([("a", 2)].into_iter().collect());

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).and_then(|r| r.get("a")), Some(1));
        assert_eq!(set.get(1).and_then(|r| r.get("a")), Some(2));
    }
}
