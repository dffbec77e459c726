//! Multi-criteria radar comparison.

use super::palette;
use super::{select, Dataset, PlotContext};
use crate::record::{BenchmarkRecord, Metric};
use crate::stats::Aggregate;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

const RADAR_ALGORITHMS: &[&str] = &[
    "Dijkstra",
    "BFS",
    "A* (w=1, manhattan)",
    "A* (w=2, manhattan)",
    "Greedy BFS (manhattan)",
];

/// Axes clockwise from the top; every one is "lower is better".
const AXES: [(Metric, &str); 4] = [
    (Metric::ExecutionTime, "Speed (low time)"),
    (Metric::NodesVisited, "Efficiency (low nodes)"),
    (Metric::PathLength, "Optimality (short path)"),
    (Metric::MemoryUsage, "Memory (low usage)"),
];

const RINGS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Normalized scores for one algorithm, in axis order. 1.0 is best.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub algorithm: String,
    pub scores: [f64; 4],
}

/// Score each listed algorithm as `1 - mean / max`, where `max` is taken
/// over every row of the listed algorithms. Algorithms without rows are
/// skipped.
pub fn radar_scores(records: &[BenchmarkRecord], algorithms: &[&str]) -> Vec<RadarSeries> {
    let rows = select(records, algorithms);
    let maxima = AXES.map(|(metric, _)| {
        rows.iter()
            .map(|r| metric.value(r))
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max)
    });

    algorithms
        .iter()
        .filter_map(|algorithm| {
            let own: Vec<&BenchmarkRecord> = rows
                .iter()
                .copied()
                .filter(|r| r.algorithm == *algorithm)
                .collect();
            if own.is_empty() {
                return None;
            }

            let mut scores = [0.0; 4];
            for (slot, ((metric, _), max)) in scores.iter_mut().zip(AXES.iter().zip(maxima)) {
                let mean = Aggregate::of(own.iter().map(|r| metric.value(r))).mean;
                *slot = if max > 0.0 {
                    (1.0 - mean / max).clamp(0.0, 1.0)
                } else {
                    0.0
                };
            }

            Some(RadarSeries {
                algorithm: algorithm.to_string(),
                scores,
            })
        })
        .collect()
}

fn axis_angle(k: usize) -> f64 {
    FRAC_PI_2 - TAU * k as f64 / AXES.len() as f64
}

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

pub fn radar_comparison(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    let series = radar_scores(data.found, RADAR_ALGORITHMS);

    let root = BitMapBackend::new(path, ctx.figure(10.0, 10.0)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Radar: multi-criteria comparison", ctx.bold(16.0))
        .margin(ctx.px(16.0))
        .build_cartesian_2d(-1.35f64..1.35f64, -1.35f64..1.35f64)?;

    let grid = BLACK.mix(0.15);
    chart.draw_series(RINGS.iter().map(|&r| {
        let ring: Vec<(f64, f64)> = (0..=72).map(|i| polar(r, TAU * i as f64 / 72.0)).collect();
        PathElement::new(ring, grid)
    }))?;
    chart.draw_series((0..AXES.len()).map(|k| {
        PathElement::new(vec![(0.0, 0.0), polar(1.0, axis_angle(k))], grid)
    }))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    chart.draw_series(RINGS.iter().map(|&r| {
        Text::new(
            format!("{:.1}", r),
            (0.03, r + 0.03),
            ctx.font(8.0).color(&BLACK.mix(0.5)),
        )
    }))?;
    chart.draw_series(AXES.iter().enumerate().map(|(k, (_, label))| {
        Text::new(
            label.to_string(),
            polar(1.17, axis_angle(k)),
            ctx.bold(11.0).color(&BLACK).pos(centered),
        )
    }))?;

    let marker = ctx.px(3.0);
    let swatch = ctx.px(10.0) as i32;
    let line_width = ctx.px(2.0);
    for (idx, entry) in series.iter().enumerate() {
        let color = palette::pastel(idx);
        let outline: Vec<(f64, f64)> = entry
            .scores
            .iter()
            .enumerate()
            .map(|(k, &score)| polar(score, axis_angle(k)))
            .collect();

        chart.draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            color.mix(0.15).filled(),
        )))?;

        let mut closed = outline.clone();
        closed.extend(outline.first().copied());
        chart
            .draw_series(std::iter::once(PathElement::new(
                closed,
                color.stroke_width(line_width),
            )))?
            .label(entry.algorithm.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], color.stroke_width(line_width))
            });

        chart.draw_series(
            outline
                .into_iter()
                .map(|point| Circle::new(point, marker, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(ctx.font(9.0))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;

    #[test]
    fn scores_invert_against_shared_max() {
        let rows = vec![
            record("BFS", "grid", true, 10, 2.0, 20.0, 5.0),
            record("DFS", "grid", true, 40, 4.0, 40.0, 5.0),
        ];
        let series = radar_scores(&rows, &["BFS", "DFS"]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].algorithm, "BFS");
        assert_eq!(series[0].scores, [0.5, 0.75, 0.5, 0.0]);
        assert_eq!(series[1].scores, [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn max_only_counts_listed_algorithms() {
        let rows = vec![
            record("BFS", "grid", true, 10, 1.0, 10.0, 10.0),
            record("DFS", "grid", true, 1000, 100.0, 100.0, 100.0),
        ];
        let series = radar_scores(&rows, &["BFS"]);
        assert_eq!(series[0].scores, [0.0; 4]);
    }

    #[test]
    fn absent_algorithms_are_skipped() {
        let rows = vec![record("BFS", "grid", true, 10, 1.0, 10.0, 10.0)];
        let series = radar_scores(&rows, &["Dijkstra", "BFS"]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].algorithm, "BFS");
    }

    #[test]
    fn zero_max_scores_zero() {
        let rows = vec![record("BFS", "grid", true, 0, 0.0, 0.0, 0.0)];
        let series = radar_scores(&rows, &["BFS"]);
        assert_eq!(series[0].scores, [0.0; 4]);
        assert!(series[0].scores.iter().all(|s| !s.is_nan()));
    }

    #[test]
    fn first_axis_points_up() {
        let (x, y) = polar(1.0, axis_angle(0));
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        let (x, _) = polar(1.0, axis_angle(1));
        assert!(x > 0.99);
    }
}
