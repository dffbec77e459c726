//! Loading benchmark rows from the exporter's CSV.

use crate::record::{AlgorithmParams, BenchmarkRecord, PathFound};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Row layout as written by the benchmark exporter. Columns are matched by
/// header name; anything not listed here is ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Algorithm_Name")]
    algorithm: String,
    #[serde(rename = "Map_Type")]
    map_type: String,
    #[serde(rename = "Map_ID", default)]
    map_id: Option<String>,
    #[serde(rename = "Map_Number", default, deserialize_with = "csv::invalid_option")]
    map_number: Option<u32>,
    #[serde(rename = "Parameters", default)]
    parameters: Option<String>,
    #[serde(rename = "Path_Found")]
    path_found: PathFound,
    #[serde(rename = "Nodes_Visited")]
    nodes_visited: u64,
    #[serde(rename = "Execution_Time_ms")]
    execution_time_ms: f64,
    #[serde(rename = "Path_Length")]
    path_length: f64,
    #[serde(rename = "Memory_Usage_Nodes")]
    memory_usage_nodes: f64,
}

impl From<CsvRow> for BenchmarkRecord {
    fn from(row: CsvRow) -> Self {
        let params = row
            .parameters
            .as_deref()
            .map(AlgorithmParams::parse)
            .unwrap_or_default();

        Self {
            algorithm: row.algorithm,
            map_type: row.map_type,
            map_id: row.map_id.filter(|id| !id.is_empty()),
            map_number: row.map_number,
            params,
            path_found: row.path_found,
            nodes_visited: row.nodes_visited,
            execution_time_ms: row.execution_time_ms,
            path_length: row.path_length,
            memory_usage_nodes: row.memory_usage_nodes,
        }
    }
}

/// Load every benchmark record from a CSV file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<BenchmarkRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open benchmark file: {}", path.display()))?;

    let records = read_records(file)
        .with_context(|| format!("Failed to parse benchmark file: {}", path.display()))?;

    if records.is_empty() {
        anyhow::bail!("No benchmark records found in {}", path.display());
    }

    debug!(rows = records.len(), path = %path.display(), "loaded benchmark records");
    Ok(records)
}

/// Parse records from any reader carrying the exporter's header row.
pub fn read_records<R: std::io::Read>(reader: R) -> Result<Vec<BenchmarkRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("Invalid benchmark row {}", idx + 1))?;
        records.push(row.into());
    }

    Ok(records)
}

/// Rows where the algorithm reached the goal.
pub fn successful(records: &[BenchmarkRecord]) -> Vec<BenchmarkRecord> {
    records
        .iter()
        .filter(|r| r.path_found.is_yes())
        .cloned()
        .collect()
}
