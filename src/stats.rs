//! Grouping and descriptive statistics over benchmark records.

use crate::record::{BenchmarkRecord, Metric};
use std::collections::BTreeMap;

/// Descriptive statistics for one group of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); NaN for groups of one.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Aggregate {
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sq / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: values.iter().cloned().fold(f64::INFINITY, f64::min),
            max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Categorical columns records can be partitioned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Algorithm,
    MapType,
}

impl GroupKey {
    pub fn of(self, record: &BenchmarkRecord) -> &str {
        match self {
            GroupKey::Algorithm => &record.algorithm,
            GroupKey::MapType => &record.map_type,
        }
    }
}

/// Partition records by a key. Groups come back in key order.
pub fn group_by<'a, I, K, F>(records: I, key: F) -> BTreeMap<K, Vec<&'a BenchmarkRecord>>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
    K: Ord,
    F: Fn(&'a BenchmarkRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a BenchmarkRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

/// Distinct values of a column in order of first appearance.
pub fn distinct<'a, I>(records: I, key: GroupKey) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let mut seen: Vec<&'a str> = Vec::new();
    for record in records {
        let value = key.of(record);
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// One aggregate of `metric` per algorithm, in name order.
pub fn by_algorithm<'a, I>(records: I, metric: Metric) -> Vec<(&'a str, Aggregate)>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    group_by(records, |r| r.algorithm.as_str())
        .into_iter()
        .map(|(name, rows)| (name, Aggregate::of(rows.iter().map(|r| metric.value(r)))))
        .collect()
}

/// Same as [`by_algorithm`], sorted ascending by mean.
pub fn by_algorithm_ascending<'a, I>(records: I, metric: Metric) -> Vec<(&'a str, Aggregate)>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let mut groups = by_algorithm(records, metric);
    groups.sort_by(|a, b| a.1.mean.total_cmp(&b.1.mean));
    groups
}

/// The `n` algorithms with the smallest mean of `metric`.
pub fn lowest_by_mean<'a, I>(records: I, metric: Metric, n: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    by_algorithm_ascending(records, metric)
        .into_iter()
        .take(n)
        .map(|(name, _)| name)
        .collect()
}

/// Percentage of trials per algorithm that found a path. Expects the
/// unfiltered table. Sorted by descending rate.
pub fn success_rates<'a, I>(records: I) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let mut rates: Vec<(&'a str, f64)> = group_by(records, |r| r.algorithm.as_str())
        .into_iter()
        .map(|(name, rows)| {
            let found = rows.iter().filter(|r| r.path_found.is_yes()).count();
            (name, found as f64 / rows.len() as f64 * 100.0)
        })
        .collect();
    rates.sort_by(|a, b| b.1.total_cmp(&a.1));
    rates
}

/// Dense table of means with sorted row and column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    /// `cells[row][col]`, `None` where no record falls in the cell.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Pivot {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Smallest and largest populated cell.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = self.cells.iter().flatten().filter_map(|v| *v).collect();
        if values.is_empty() {
            return None;
        }
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((lo, hi))
    }
}

/// Mean of `metric` for every (row key, column key) pair.
pub fn pivot_mean<'a, I>(
    records: I,
    row_key: GroupKey,
    col_key: GroupKey,
    metric: Metric,
) -> Pivot
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let groups = group_by(records, |r| (row_key.of(r), col_key.of(r)));

    let mut rows: Vec<String> = groups.keys().map(|(r, _)| r.to_string()).collect();
    rows.dedup();
    let mut cols: Vec<String> = groups.keys().map(|(_, c)| c.to_string()).collect();
    cols.sort();
    cols.dedup();

    let cells = rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|col| {
                    groups
                        .get(&(row.as_str(), col.as_str()))
                        .map(|g| Aggregate::of(g.iter().map(|r| metric.value(r))).mean)
                })
                .collect()
        })
        .collect();

    Pivot { rows, cols, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::successful;
    use crate::record::record;

    fn sample() -> Vec<BenchmarkRecord> {
        vec![
            record("BFS", "grid", true, 120, 1.5, 45.0, 80.0),
            record("BFS", "grid", false, 0, 0.1, 0.0, 0.0),
            record("Dijkstra", "grid", true, 200, 2.0, 45.0, 90.0),
            record("Dijkstra", "maze", true, 400, 4.0, 61.0, 30.0),
            record("Dijkstra", "maze", true, 300, 3.0, 61.0, 50.0),
            record("DFS", "maze", false, 900, 5.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn aggregate_uses_sample_std() {
        let agg = Aggregate::of([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(agg.count, 8);
        assert_eq!(agg.mean, 5.0);
        assert!((agg.std - 2.138089935299395).abs() < 1e-12);
        assert_eq!(agg.min, 2.0);
        assert_eq!(agg.max, 9.0);
    }

    #[test]
    fn single_value_group_has_nan_std() {
        let agg = Aggregate::of([120.0]);
        assert_eq!(agg.mean, 120.0);
        assert!(agg.std.is_nan());
        assert_eq!(agg.min, 120.0);
        assert_eq!(agg.max, 120.0);
    }

    #[test]
    fn empty_group_is_all_nan() {
        let agg = Aggregate::of(std::iter::empty());
        assert_eq!(agg.count, 0);
        assert!(agg.mean.is_nan() && agg.std.is_nan());
    }

    #[test]
    fn mean_nodes_per_algorithm_over_successes() {
        let found = successful(&sample());
        let groups = by_algorithm(&found, Metric::NodesVisited);

        let names: Vec<&str> = groups.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["BFS", "Dijkstra"]);
        assert_eq!(groups[0].1.mean, 120.0);
        assert!(groups[0].1.std.is_nan());
        assert_eq!(groups[1].1.mean, 300.0);
        assert_eq!(groups[1].1.count, 3);
    }

    #[test]
    fn ascending_order_and_lowest_selection() {
        let found = successful(&sample());
        let asc = by_algorithm_ascending(&found, Metric::PathLength);
        assert_eq!(asc[0].0, "BFS");
        assert_eq!(lowest_by_mean(&found, Metric::NodesVisited, 1), ["BFS"]);
        assert_eq!(lowest_by_mean(&found, Metric::NodesVisited, 8).len(), 2);
    }

    #[test]
    fn success_rate_counts_unfiltered_rows() {
        let all = sample();
        let rates = success_rates(&all);
        assert_eq!(rates, vec![("Dijkstra", 100.0), ("BFS", 50.0), ("DFS", 0.0)]);
    }

    #[test]
    fn mixed_outcome_bfs_rows() {
        let rows = vec![
            record("BFS", "grid", true, 120, 1.5, 45.0, 80.0),
            record("BFS", "grid", false, 0, 0.1, 0.0, 0.0),
        ];
        let found = successful(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(by_algorithm(&found, Metric::NodesVisited)[0].1.mean, 120.0);
        assert_eq!(success_rates(&rows), vec![("BFS", 50.0)]);
    }

    #[test]
    fn pivot_fills_missing_cells_with_none() {
        let found = successful(&sample());
        let pivot = pivot_mean(
            &found,
            GroupKey::Algorithm,
            GroupKey::MapType,
            Metric::NodesVisited,
        );

        assert_eq!(pivot.rows, ["BFS", "Dijkstra"]);
        assert_eq!(pivot.cols, ["grid", "maze"]);
        assert_eq!(pivot.get(0, 0), Some(120.0));
        assert_eq!(pivot.get(0, 1), None);
        assert_eq!(pivot.get(1, 1), Some(350.0));
        assert_eq!(pivot.value_range(), Some((120.0, 350.0)));
    }

    #[test]
    fn distinct_keeps_first_appearance_order() {
        let rows = sample();
        assert_eq!(distinct(&rows, GroupKey::Algorithm), ["BFS", "Dijkstra", "DFS"]);
        assert_eq!(distinct(&rows, GroupKey::MapType), ["grid", "maze"]);
    }
}
