//! Per-algorithm summary statistics table, written as CSV and console text.

use crate::record::{BenchmarkRecord, Metric};
use crate::stats::{group_by, Aggregate};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Statistic shown in one summary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Mean,
    Std,
    Min,
    Max,
}

impl Stat {
    pub fn name(self) -> &'static str {
        match self {
            Stat::Mean => "mean",
            Stat::Std => "std",
            Stat::Min => "min",
            Stat::Max => "max",
        }
    }

    fn pick(self, agg: &Aggregate) -> f64 {
        match self {
            Stat::Mean => agg.mean,
            Stat::Std => agg.std,
            Stat::Min => agg.min,
            Stat::Max => agg.max,
        }
    }
}

/// Column layout of the summary: metric, then the statistics reported for it.
pub const SUMMARY_LAYOUT: &[(Metric, &[Stat])] = &[
    (Metric::NodesVisited, &[Stat::Mean, Stat::Std, Stat::Min, Stat::Max]),
    (Metric::ExecutionTime, &[Stat::Mean, Stat::Std]),
    (Metric::PathLength, &[Stat::Mean, Stat::Std]),
    (Metric::MemoryUsage, &[Stat::Mean, Stat::Std]),
];

const INDEX_NAME: &str = "Algorithm_Name";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub algorithm: String,
    /// Rounded to two decimals, in [`SummaryTable::columns`] order.
    pub values: Vec<f64>,
}

/// Aggregates of every summary column, one row per algorithm in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub columns: Vec<(Metric, Stat)>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build from the filtered (path found) records.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BenchmarkRecord>,
    {
        let columns: Vec<(Metric, Stat)> = SUMMARY_LAYOUT
            .iter()
            .flat_map(|(metric, stats)| stats.iter().map(move |stat| (*metric, *stat)))
            .collect();

        let rows = group_by(records, |r| r.algorithm.as_str())
            .into_iter()
            .map(|(algorithm, group)| {
                let values = columns
                    .iter()
                    .map(|(metric, stat)| {
                        let agg = Aggregate::of(group.iter().map(|r| metric.value(r)));
                        round2(stat.pick(&agg))
                    })
                    .collect();
                SummaryRow {
                    algorithm: algorithm.to_string(),
                    values,
                }
            })
            .collect();

        Self { columns, rows }
    }

    /// Header lines: metric names, statistic names, then the index name.
    fn header_rows(&self) -> [Vec<String>; 3] {
        let mut metrics = vec![String::new()];
        let mut stats = vec![String::new()];
        let mut index = vec![INDEX_NAME.to_string()];
        for (metric, stat) in &self.columns {
            metrics.push(metric.column().to_string());
            stats.push(stat.name().to_string());
            index.push(String::new());
        }
        [metrics, stats, index]
    }

    /// Body cells, with `nan` standing in for missing statistics.
    fn body_rows(&self, nan: &str) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.algorithm.clone()];
                cells.extend(
                    self.columns
                        .iter()
                        .zip(&row.values)
                        .map(|((metric, stat), value)| format_cell(*metric, *stat, *value, nan)),
                );
                cells
            })
            .collect()
    }

    /// Write the table as CSV to any writer.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for header in self.header_rows() {
            wtr.write_record(&header)?;
        }
        for row in self.body_rows("") {
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table as CSV to a file, replacing any previous one.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        self.write_csv_to(BufWriter::new(file))
            .with_context(|| format!("Failed to write summary file: {}", path.display()))
    }

    /// Aligned plain-text rendering for the console.
    pub fn render_text(&self) -> String {
        let [metrics, stats, index] = self.header_rows();
        let body = self.body_rows("NaN");

        let ncols = self.columns.len() + 1;
        let mut widths = vec![0usize; ncols];
        for row in [&stats, &index].into_iter().chain(body.iter()) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        // Metric names sit over the first column of their group only.
        let mut metric_line = vec![String::new(); ncols];
        let mut previous = "";
        for (i, name) in metrics.iter().enumerate().skip(1) {
            if name != previous {
                metric_line[i] = name.clone();
                widths[i] = widths[i].max(name.chars().count());
            }
            previous = name.as_str();
        }

        let mut out = String::new();
        for (line_no, row) in [&metric_line, &stats, &index]
            .into_iter()
            .chain(body.iter())
            .enumerate()
        {
            let mut line = String::new();
            for (i, (cell, width)) in row.iter().zip(widths.iter().copied()).enumerate() {
                if i == 0 {
                    line.push_str(&format!("{:<width$}", cell, width = width));
                } else if line_no == 0 {
                    line.push_str(&format!("  {:<width$}", cell, width = width));
                } else {
                    line.push_str(&format!("  {:>width$}", cell, width = width));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Two decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Integer columns keep integer min/max.
fn format_cell(metric: Metric, stat: Stat, value: f64, nan: &str) -> String {
    if value.is_nan() {
        return nan.to_string();
    }
    if metric.is_integral() && matches!(stat, Stat::Min | Stat::Max) {
        return format!("{}", value as i64);
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
