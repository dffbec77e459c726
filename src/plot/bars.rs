//! Bar charts: per-metric algorithm comparisons, the A* breakdown and the
//! map-type analysis.

use super::palette::{self, Gradient};
use super::{category_axis, category_label, padded_max, Dataset, PlotContext};
use crate::record::{BenchmarkRecord, Metric};
use crate::stats::{self, GroupKey, Pivot};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Algorithms kept by the map-type analysis, fewest nodes visited first.
const TOP_ALGORITHMS: usize = 8;

/// Horizontal comparison of one metric across algorithms.
struct MetricBars {
    metric: Metric,
    palette: Gradient,
    title: &'static str,
    x_desc: &'static str,
    precision: usize,
    unit: &'static str,
}

const NODES_VISITED: MetricBars = MetricBars {
    metric: Metric::NodesVisited,
    palette: palette::ROCKET_R,
    title: "Efficiency: nodes visited (fewer is better)",
    x_desc: "Nodes Visited (Average)",
    precision: 0,
    unit: "",
};

const EXECUTION_TIME: MetricBars = MetricBars {
    metric: Metric::ExecutionTime,
    palette: palette::VIRIDIS,
    title: "Speed: execution time (lower is faster)",
    x_desc: "Execution Time (ms, Average)",
    precision: 3,
    unit: "ms",
};

const PATH_LENGTH: MetricBars = MetricBars {
    metric: Metric::PathLength,
    palette: palette::COOLWARM,
    title: "Optimality: path length (shorter is better)",
    x_desc: "Path Length (Average)",
    precision: 1,
    unit: "",
};

const MEMORY_USAGE: MetricBars = MetricBars {
    metric: Metric::MemoryUsage,
    palette: palette::MAKO,
    title: "Memory: nodes held in the frontier (fewer is leaner)",
    x_desc: "Memory Usage (Nodes in Queue, Average)",
    precision: 1,
    unit: "",
};

pub fn nodes_visited(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    plot_metric_bars(ctx, data.found, &NODES_VISITED, path)
}

pub fn execution_time(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    plot_metric_bars(ctx, data.found, &EXECUTION_TIME, path)
}

pub fn path_length(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    plot_metric_bars(ctx, data.found, &PATH_LENGTH, path)
}

pub fn memory_usage(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    plot_metric_bars(ctx, data.found, &MEMORY_USAGE, path)
}

/// Mean per algorithm as horizontal bars with ±1 std whiskers, ascending.
fn plot_metric_bars(
    ctx: &PlotContext,
    records: &[BenchmarkRecord],
    cfg: &MetricBars,
    path: &Path,
) -> Result<()> {
    let groups = stats::by_algorithm_ascending(records, cfg.metric);
    let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
    let colors = cfg.palette.sample(groups.len());
    let x_max = padded_max(
        groups
            .iter()
            .map(|(_, agg)| agg.mean + if agg.std.is_finite() { agg.std } else { 0.0 }),
    );

    let root = BitMapBackend::new(path, ctx.figure(16.0, 8.0)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(cfg.title, ctx.bold(14.0))
        .margin(ctx.px(10.0))
        .x_label_area_size(ctx.px(36.0))
        .y_label_area_size(ctx.label_area(&names, 9.0))
        .build_cartesian_2d(0f64..x_max, category_axis(names.len()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(names.len().max(1))
        .y_label_formatter(&|y| category_label(&names, *y))
        .x_desc(cfg.x_desc)
        .y_desc("Algorithm")
        .label_style(ctx.font(9.0))
        .axis_desc_style(ctx.bold(12.0))
        .draw()?;

    chart.draw_series(groups.iter().zip(&colors).enumerate().map(
        |(i, ((_, agg), color))| {
            let y = i as f64;
            Rectangle::new([(0.0, y - 0.4), (agg.mean, y + 0.4)], color.mix(0.8).filled())
        },
    ))?;

    // Whiskers; single-trial groups have no spread to show.
    let whisker = BLACK.stroke_width(ctx.px(1.0));
    for (i, (_, agg)) in groups.iter().enumerate() {
        if !agg.std.is_finite() {
            continue;
        }
        let y = i as f64;
        let lo = (agg.mean - agg.std).max(0.0);
        let hi = agg.mean + agg.std;
        chart.draw_series([
            PathElement::new(vec![(lo, y), (hi, y)], whisker),
            PathElement::new(vec![(lo, y - 0.15), (lo, y + 0.15)], whisker),
            PathElement::new(vec![(hi, y - 0.15), (hi, y + 0.15)], whisker),
        ])?;
    }

    let value_style = TextStyle::from(ctx.bold(9.0)).pos(Pos::new(HPos::Left, VPos::Center));
    let offset = x_max * 0.01;
    chart.draw_series(groups.iter().enumerate().map(|(i, (_, agg))| {
        Text::new(
            format!("{:.*}{}", cfg.precision, agg.mean, cfg.unit),
            (agg.mean + offset, i as f64),
            value_style.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// `A* (w=1, manhattan)` -> `w=1, manhattan`
fn short_astar_label(name: &str) -> &str {
    name.strip_prefix("A*")
        .unwrap_or(name)
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
}

/// Variant label, preferring the decoded parameters over the name.
fn astar_label(records: &[&BenchmarkRecord], name: &str) -> String {
    records
        .iter()
        .find(|r| r.algorithm == name)
        .and_then(|r| r.params.describe())
        .unwrap_or_else(|| short_astar_label(name).to_string())
}

/// 2×2 breakdown of the A* variants, one metric per panel.
pub fn astar_analysis(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    let astar: Vec<&BenchmarkRecord> = data.found.iter().filter(|r| r.is_astar()).collect();

    let root = BitMapBackend::new(path, ctx.figure(16.0, 12.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(
        "A* breakdown: effect of heuristic weight and distance metric",
        ctx.bold(16.0),
    )?;
    let panels = body.split_evenly((2, 2));

    let layout = [
        (Metric::NodesVisited, "Nodes Visited by Weight", "Nodes Visited (Avg)"),
        (Metric::ExecutionTime, "Execution Time by Weight", "Time (ms, Avg)"),
        (Metric::PathLength, "Path Length (Optimality)", "Path Length (Avg)"),
        (Metric::MemoryUsage, "Memory Usage", "Memory (Nodes, Avg)"),
    ];

    for (area, (metric, title, y_desc)) in panels.iter().zip(layout) {
        let bars: Vec<(String, f64)> = stats::by_algorithm_ascending(astar.iter().copied(), metric)
            .into_iter()
            .map(|(name, agg)| (astar_label(&astar, name), agg.mean))
            .collect();
        let colors: Vec<RGBColor> = (0..bars.len()).map(palette::pastel).collect();
        draw_vertical_bars(area, ctx, title, "A* Variant", y_desc, &bars, &colors)?;
    }

    root.present()?;
    Ok(())
}

fn draw_vertical_bars(
    area: &Area<'_>,
    ctx: &PlotContext,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, f64)],
    colors: &[RGBColor],
) -> Result<()> {
    let names: Vec<&str> = bars.iter().map(|(name, _)| name.as_str()).collect();
    let y_max = padded_max(bars.iter().map(|(_, value)| *value));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ctx.bold(12.0))
        .margin(ctx.px(8.0))
        .x_label_area_size(ctx.px(36.0))
        .y_label_area_size(ctx.px(48.0))
        .build_cartesian_2d(category_axis(names.len()), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len().max(1))
        .x_label_formatter(&|x| category_label(&names, *x))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(ctx.font(8.0))
        .axis_desc_style(ctx.font(11.0))
        .draw()?;

    chart.draw_series(bars.iter().zip(colors).enumerate().map(
        |(i, ((_, value), color))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *value)], color.mix(0.8).filled())
        },
    ))?;

    Ok(())
}

/// 2×2 comparison across map types for the leading algorithms, plus the
/// overall success rate.
pub fn map_type_analysis(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    let top = stats::lowest_by_mean(data.found, Metric::NodesVisited, TOP_ALGORITHMS);
    let subset: Vec<&BenchmarkRecord> = data
        .found
        .iter()
        .filter(|r| top.contains(&r.algorithm.as_str()))
        .collect();

    let root = BitMapBackend::new(path, ctx.figure(16.0, 12.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled("Analysis by map type", ctx.bold(16.0))?;
    let panels = body.split_evenly((2, 2));

    let layout = [
        (Metric::NodesVisited, "Nodes Visited by Map Type", "Nodes Visited (Avg)"),
        (Metric::ExecutionTime, "Execution Time by Map Type", "Time (ms, Avg)"),
        (Metric::PathLength, "Path Length by Map Type", "Path Length (Avg)"),
    ];

    for (area, (metric, title, y_desc)) in panels.iter().zip(layout) {
        let pivot = stats::pivot_mean(
            subset.iter().copied(),
            GroupKey::MapType,
            GroupKey::Algorithm,
            metric,
        );
        draw_grouped_bars(area, ctx, title, y_desc, &pivot)?;
    }

    let rates = stats::success_rates(data.all);
    draw_success_rates(&panels[3], ctx, &rates)?;

    root.present()?;
    Ok(())
}

/// One bar group per pivot row, one colored series per pivot column.
fn draw_grouped_bars(
    area: &Area<'_>,
    ctx: &PlotContext,
    title: &str,
    y_desc: &str,
    pivot: &Pivot,
) -> Result<()> {
    let groups: Vec<&str> = pivot.rows.iter().map(String::as_str).collect();
    let y_max = padded_max(pivot.cells.iter().flatten().filter_map(|v| *v));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ctx.bold(12.0))
        .margin(ctx.px(8.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.px(48.0))
        .build_cartesian_2d(category_axis(groups.len()), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len().max(1))
        .x_label_formatter(&|x| category_label(&groups, *x))
        .x_desc("Map Type")
        .y_desc(y_desc)
        .label_style(ctx.font(9.0))
        .axis_desc_style(ctx.font(11.0))
        .draw()?;

    let width = 0.8 / pivot.cols.len().max(1) as f64;
    let swatch = ctx.px(4.0) as i32;
    for (j, series) in pivot.cols.iter().enumerate() {
        let color = palette::categorical(j);
        chart
            .draw_series((0..groups.len()).filter_map(|i| {
                pivot.get(i, j).map(|value| {
                    let x0 = i as f64 - 0.4 + j as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, value)], color.filled())
                })
            }))?
            .label(series.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(ctx.font(7.0))
        .draw()?;

    Ok(())
}

fn draw_success_rates(area: &Area<'_>, ctx: &PlotContext, rates: &[(&str, f64)]) -> Result<()> {
    let names: Vec<&str> = rates.iter().map(|(name, _)| *name).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Success Rate (%)", ctx.bold(12.0))
        .margin(ctx.px(8.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.label_area(&names, 8.0))
        .build_cartesian_2d(0f64..105f64, category_axis(names.len()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(names.len().max(1))
        .y_label_formatter(&|y| category_label(&names, *y))
        .x_desc("Success Rate (%)")
        .y_desc("Algorithm")
        .label_style(ctx.font(8.0))
        .axis_desc_style(ctx.font(11.0))
        .draw()?;

    let fill = palette::SUCCESS_GREEN.mix(0.7).filled();
    chart.draw_series(rates.iter().enumerate().map(|(i, (_, rate))| {
        let y = i as f64;
        Rectangle::new([(0.0, y - 0.4), (*rate, y + 0.4)], fill)
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{record, AlgorithmParams};

    #[test]
    fn astar_labels_drop_prefix_and_parens() {
        assert_eq!(short_astar_label("A* (w=1, manhattan)"), "w=1, manhattan");
        assert_eq!(short_astar_label("A* (w=0.5, euclidean)"), "w=0.5, euclidean");
        assert_eq!(short_astar_label("Dijkstra"), "Dijkstra");
    }

    #[test]
    fn astar_label_prefers_params() {
        let mut tuned = record("A* (w=2, manhattan)", "open", true, 1, 1.0, 1.0, 1.0);
        tuned.params = AlgorithmParams::parse(r#"{"metric":"manhattan","weight":2.5}"#);
        let plain = record("A* (w=1, manhattan)", "open", true, 1, 1.0, 1.0, 1.0);
        let rows = vec![&tuned, &plain];

        assert_eq!(astar_label(&rows, "A* (w=2, manhattan)"), "w=2.5, manhattan");
        assert_eq!(astar_label(&rows, "A* (w=1, manhattan)"), "w=1, manhattan");
    }

    #[test]
    fn metric_bar_configs_cover_every_metric() {
        let metrics: Vec<Metric> = [&NODES_VISITED, &EXECUTION_TIME, &PATH_LENGTH, &MEMORY_USAGE]
            .iter()
            .map(|cfg| cfg.metric)
            .collect();
        assert_eq!(
            metrics,
            [
                Metric::NodesVisited,
                Metric::ExecutionTime,
                Metric::PathLength,
                Metric::MemoryUsage,
            ]
        );
    }
}
