//! Default metrics and graphs offered for the nad bundle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the only bundle this component provides.
pub const NAD_BUNDLE: &str = "nad";

/// Metrics selected by default when the operator does not choose any.
pub const DEFAULT_METRICS: &[&str] = &[
    "cpu`idle`steal",
    "cpu`kernel",
    "cpu`user",
    "cpu`wait_io",
    "disk`vtbd0`nread",
    "disk`vtbd0`nwritten",
    "disk`vtbd0`reads",
    "disk`vtbd0`writes",
    "fs`/`df_used_inode_percent",
    "fs`/`df_used_percent",
    "fs``used_inode_percent",
    "fs`/`used_percent",
    "if`em0`in_bytes",
    "if`em0`in_errors",
    "if`em0`out_bytes",
    "if`em0`out_errors",
    "vm`memory`total",
    "vm`memory`used",
    "vm`swap`free",
    "vm`swap`used",
];

/// One line on a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datapoint {
    pub bundle: String,
    pub metric_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub title: String,
    pub datapoints: Vec<Datapoint>,
}

/// (metric, display name, derive)
type GraphLine = (&'static str, &'static str, Option<&'static str>);

const COUNTER: Option<&str> = Some("counter");

const GRAPHS: &[(&str, &[GraphLine])] = &[
    (
        "CPU Usage - ",
        &[
            ("cpu`idle`steal", "Idle Steal", COUNTER),
            ("cpu`kernel", "Kernel", COUNTER),
            ("cpu`user", "User", COUNTER),
            ("cpu`wait_io", "I/O Wait", COUNTER),
        ],
    ),
    (
        "Memory - ",
        &[
            ("vm`memory`total", "Memory Total", None),
            ("vm`memory`used", "Memory Used", None),
            ("vm`swap`free", "Swap Free", None),
            ("vm`swap`used", "Swap Used", None),
        ],
    ),
    (
        "Disks - ",
        &[
            ("disk`vtbd0`nread", "Disk Nread", None),
            ("disk`vtbd0`nwritten", "Disk Nwritten", None),
            ("disk`vtbd0`reads", "Disk Reads", None),
            ("disk`vtbd0`writes", "Disk Writes", None),
        ],
    ),
    (
        "Network - ",
        &[
            ("if`em0`in_bytes", "Em In Bytes", COUNTER),
            ("if`em0`in_errors", "Em In Errors", COUNTER),
            ("if`em0`out_bytes", "Em Out Bytes", COUNTER),
            ("if`em0`out_errors", "Em Out Errors", COUNTER),
        ],
    ),
    (
        "File Systems -",
        &[
            ("fs`/`used_inode_percent", "Fs '/' Used Inode Percent", None),
            ("fs`/`df_used_inode_percent", "Fs '/' df Used Inode Percent", None),
            ("fs`/`used_percent", "Fs '/' Used Percent", None),
            ("fs`/`df_used_percent", "Fs '/' df Used Percent", None),
        ],
    ),
];

/// Default metric selection keyed by bundle.
pub fn default_metrics() -> BTreeMap<String, Vec<String>> {
    let mut metrics = BTreeMap::new();
    metrics.insert(
        NAD_BUNDLE.to_string(),
        DEFAULT_METRICS.iter().map(|m| m.to_string()).collect(),
    );
    metrics
}

/// Default graphs, all drawn from the nad bundle.
pub fn default_graphs() -> Vec<Graph> {
    GRAPHS
        .iter()
        .map(|(title, lines)| Graph {
            title: title.to_string(),
            datapoints: lines
                .iter()
                .map(|(metric, name, derive)| Datapoint {
                    bundle: NAD_BUNDLE.to_string(),
                    metric_name: metric.to_string(),
                    derive: derive.map(str::to_string),
                    name: name.to_string(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let metrics = default_metrics();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[NAD_BUNDLE].len(), 20);
        assert!(metrics[NAD_BUNDLE].iter().all(|m| m.contains('`')));
    }

    #[test]
    fn test_default_graphs() {
        let graphs = default_graphs();
        let titles: Vec<_> = graphs.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["CPU Usage - ", "Memory - ", "Disks - ", "Network - ", "File Systems -"]
        );
        assert!(graphs.iter().all(|g| g.datapoints.len() == 4));
        assert!(graphs
            .iter()
            .flat_map(|g| &g.datapoints)
            .all(|d| d.bundle == NAD_BUNDLE));
    }

    #[test]
    fn test_counters_only_on_cpu_and_network() {
        for graph in default_graphs() {
            let counters = graph
                .datapoints
                .iter()
                .filter(|d| d.derive.as_deref() == Some("counter"))
                .count();
            let expected = match graph.title.as_str() {
                "CPU Usage - " | "Network - " => 4,
                _ => 0,
            };
            assert_eq!(counters, expected, "graph {}", graph.title);
        }
    }

    #[test]
    fn test_datapoint_without_derive_omits_field() {
        let graphs = default_graphs();
        let json = serde_json::to_value(&graphs[1].datapoints[0]).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "bundle": "nad",
                "metric_name": "vm`memory`total",
                "name": "Memory Total"
            })
        );
    }
}
