//! Turning script output lines into metric identifiers.

use serde::{Deserialize, Serialize};

/// Separator between the script prefix and the metric leaf name.
pub const SEPARATOR: char = '`';

/// Builds the identifier for one output line of a script with `prefix`.
///
/// Only the first whitespace-delimited field is used. A blank line, or one that
/// starts with whitespace, has an empty first field and still yields
/// `prefix` followed by the separator.
pub fn metric_identifier(prefix: &str, line: &str) -> String {
    let leaf = line.split(char::is_whitespace).next().unwrap_or_default();

    let mut id = String::with_capacity(prefix.len() + 1 + leaf.len());
    id.push_str(prefix);
    id.push(SEPARATOR);
    id.push_str(leaf);
    id
}

/// Ordered, append-only list of discovered metric identifiers.
///
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricCollection {
    metrics: Vec<String>,
}

impl MetricCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metric: String) {
        self.metrics.push(metric);
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.metrics
    }
}

impl From<Vec<String>> for MetricCollection {
    fn from(metrics: Vec<String>) -> Self {
        Self { metrics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_field_only() {
        assert_eq!(metric_identifier("cpu", "idle`steal L 42"), "cpu`idle`steal");
        assert_eq!(metric_identifier("vm", "memory`total\t1024"), "vm`memory`total");
    }

    #[test]
    fn test_name_without_value() {
        assert_eq!(metric_identifier("if", "em0`in_bytes"), "if`em0`in_bytes");
    }

    #[test]
    fn test_degenerate_identifiers_pass_through() {
        // Blank and whitespace-led lines are not sanitized.
        assert_eq!(metric_identifier("fs", ""), "fs`");
        assert_eq!(metric_identifier("fs", "   used_percent 3"), "fs`");
        assert_eq!(metric_identifier("fs", "`used_inode_percent 7"), "fs``used_inode_percent");
    }

    #[test]
    fn test_collection_keeps_order_and_duplicates() {
        let mut metrics = MetricCollection::new();
        metrics.push("cpu`user".to_string());
        metrics.push("cpu`kernel".to_string());
        metrics.push("cpu`user".to_string());

        assert_eq!(metrics.len(), 3);
        assert_eq!(
            metrics.iter().collect::<Vec<_>>(),
            vec!["cpu`user", "cpu`kernel", "cpu`user"]
        );
    }

    #[test]
    fn test_collection_serializes_as_array() {
        let metrics = MetricCollection::from(vec!["vm`swap`free".to_string()]);
        let json = serde_json::to_string(&metrics).expect("serialize");
        assert_eq!(json, r#"["vm`swap`free"]"#);
    }
}
