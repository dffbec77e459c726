//! Benchmark record model and the numeric metrics charted from it.

use serde::Deserialize;
use tracing::warn;

/// Outcome column of a benchmark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PathFound {
    Yes,
    No,
}

impl PathFound {
    pub fn is_yes(self) -> bool {
        self == PathFound::Yes
    }
}

/// Heuristic settings encoded in the `Parameters` column, e.g.
/// `{"metric":"manhattan","weight":2}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlgorithmParams {
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl AlgorithmParams {
    /// Decode the raw column text. Blank or malformed JSON yields empty params.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(raw) {
            Ok(params) => params,
            Err(e) => {
                warn!(raw, error = %e, "ignoring undecodable Parameters value");
                Self::default()
            }
        }
    }

    /// `w=1, manhattan` when both settings are known.
    pub fn describe(&self) -> Option<String> {
        match (self.weight, self.metric.as_deref()) {
            (Some(weight), Some(metric)) => Some(format!("w={}, {}", weight, metric)),
            _ => None,
        }
    }
}

/// One benchmark trial (algorithm × map).
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub map_type: String,
    pub map_id: Option<String>,
    pub map_number: Option<u32>,
    pub params: AlgorithmParams,
    pub path_found: PathFound,
    pub nodes_visited: u64,
    pub execution_time_ms: f64,
    pub path_length: f64,
    pub memory_usage_nodes: f64,
}

impl BenchmarkRecord {
    /// A* variants are recognised by name, as the benchmark runner labels them.
    pub fn is_astar(&self) -> bool {
        self.algorithm.contains("A*")
    }

    /// Map identity: `Map_ID` when exported, otherwise type and number.
    pub fn map_key(&self) -> String {
        match (&self.map_id, self.map_number) {
            (Some(id), _) => id.clone(),
            (None, Some(number)) => format!("{}_{}", self.map_type, number),
            (None, None) => self.map_type.clone(),
        }
    }
}

/// Numeric columns that get aggregated and charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    NodesVisited,
    ExecutionTime,
    PathLength,
    MemoryUsage,
}

impl Metric {
    /// Header name in the benchmark CSV.
    pub fn column(self) -> &'static str {
        match self {
            Metric::NodesVisited => "Nodes_Visited",
            Metric::ExecutionTime => "Execution_Time_ms",
            Metric::PathLength => "Path_Length",
            Metric::MemoryUsage => "Memory_Usage_Nodes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::NodesVisited => "Nodes Visited",
            Metric::ExecutionTime => "Execution Time (ms)",
            Metric::PathLength => "Path Length",
            Metric::MemoryUsage => "Memory Usage (nodes)",
        }
    }

    /// Integer-valued in the source data.
    pub fn is_integral(self) -> bool {
        matches!(self, Metric::NodesVisited)
    }

    pub fn value(self, record: &BenchmarkRecord) -> f64 {
        match self {
            Metric::NodesVisited => record.nodes_visited as f64,
            Metric::ExecutionTime => record.execution_time_ms,
            Metric::PathLength => record.path_length,
            Metric::MemoryUsage => record.memory_usage_nodes,
        }
    }
}

#[cfg(test)]
pub(crate) fn record(
    algorithm: &str,
    map_type: &str,
    found: bool,
    nodes: u64,
    time_ms: f64,
    path: f64,
    memory: f64,
) -> BenchmarkRecord {
    BenchmarkRecord {
        algorithm: algorithm.to_string(),
        map_type: map_type.to_string(),
        map_id: None,
        map_number: None,
        params: AlgorithmParams::default(),
        path_found: if found { PathFound::Yes } else { PathFound::No },
        nodes_visited: nodes,
        execution_time_ms: time_ms,
        path_length: path,
        memory_usage_nodes: memory,
    }
}
