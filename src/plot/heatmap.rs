//! Algorithm × map-type heatmaps, one panel per metric.

use super::palette::{self, Gradient};
use super::{category_axis, category_label, select, Dataset, PlotContext};
use crate::record::Metric;
use crate::stats::{self, GroupKey, Pivot};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const HEATMAP_ALGORITHMS: &[&str] = &[
    "Dijkstra",
    "BFS",
    "DFS",
    "A* (w=0.5, manhattan)",
    "A* (w=1, manhattan)",
    "A* (w=2, manhattan)",
    "Greedy BFS (manhattan)",
];

struct HeatmapPanel {
    metric: Metric,
    gradient: Gradient,
    precision: usize,
    /// Color bar caption.
    unit: &'static str,
}

const PANELS: [HeatmapPanel; 4] = [
    HeatmapPanel {
        metric: Metric::NodesVisited,
        gradient: palette::YL_OR_RD,
        precision: 0,
        unit: "Nodes",
    },
    HeatmapPanel {
        metric: Metric::ExecutionTime,
        gradient: palette::VIRIDIS,
        precision: 3,
        unit: "ms",
    },
    HeatmapPanel {
        metric: Metric::PathLength,
        gradient: palette::COOLWARM,
        precision: 1,
        unit: "Path",
    },
    HeatmapPanel {
        metric: Metric::MemoryUsage,
        gradient: palette::MAKO,
        precision: 1,
        unit: "Nodes",
    },
];

pub fn performance_heatmap(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    let rows = select(data.found, HEATMAP_ALGORITHMS);

    let root = BitMapBackend::new(path, ctx.figure(16.0, 12.0)).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(
        "Heatmap: performance by map type and algorithm",
        ctx.bold(16.0),
    )?;

    for (area, panel) in body.split_evenly((2, 2)).iter().zip(PANELS.iter()) {
        let pivot = stats::pivot_mean(
            rows.iter().copied(),
            GroupKey::Algorithm,
            GroupKey::MapType,
            panel.metric,
        );
        draw_heatmap(area, ctx, panel, &pivot)?;
    }

    root.present()?;
    Ok(())
}

fn draw_heatmap(
    area: &Area<'_>,
    ctx: &PlotContext,
    panel: &HeatmapPanel,
    pivot: &Pivot,
) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let bar_width = ctx.px(70.0).min(width / 3);
    let (cells_area, bar_area) = area.split_horizontally(width - bar_width);

    let (lo, hi) = pivot.value_range().unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };

    // First pivot row is drawn at the top.
    let row_names: Vec<&str> = pivot.rows.iter().rev().map(String::as_str).collect();
    let col_names: Vec<&str> = pivot.cols.iter().map(String::as_str).collect();
    let nrows = row_names.len();

    let mut chart = ChartBuilder::on(&cells_area)
        .caption(panel.metric.label(), ctx.bold(12.0))
        .margin(ctx.px(8.0))
        .x_label_area_size(ctx.px(30.0))
        .y_label_area_size(ctx.label_area(&row_names, 8.0))
        .build_cartesian_2d(category_axis(col_names.len()), category_axis(nrows))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(col_names.len().max(1))
        .y_labels(nrows.max(1))
        .x_label_formatter(&|x| category_label(&col_names, *x))
        .y_label_formatter(&|y| category_label(&row_names, *y))
        .x_desc("Map Type")
        .y_desc("Algorithm")
        .label_style(ctx.font(8.0))
        .axis_desc_style(ctx.font(10.0))
        .draw()?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let mut cells = Vec::new();
    let mut notes = Vec::new();
    for row in 0..nrows {
        let y = (nrows - 1 - row) as f64;
        for col in 0..col_names.len() {
            let Some(value) = pivot.get(row, col) else {
                continue;
            };
            let x = col as f64;
            let fill = panel.gradient.at((value - lo) / span);
            cells.push(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                fill.filled(),
            ));
            notes.push(Text::new(
                format!("{:.*}", panel.precision, value),
                (x, y),
                ctx.font(9.0).color(&palette::text_on(fill)).pos(centered),
            ));
        }
    }
    chart.draw_series(cells)?;
    chart.draw_series(notes)?;

    draw_color_bar(&bar_area, ctx, panel, lo, hi)
}

fn draw_color_bar(
    area: &Area<'_>,
    ctx: &PlotContext,
    panel: &HeatmapPanel,
    lo: f64,
    hi: f64,
) -> Result<()> {
    const STEPS: usize = 64;
    let hi = if hi > lo { hi } else { lo + 1.0 };

    let mut chart = ChartBuilder::on(area)
        .margin_top(ctx.px(30.0))
        .margin_bottom(ctx.px(38.0))
        .margin_right(ctx.px(4.0))
        .right_y_label_area_size(ctx.px(44.0))
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_desc(panel.unit)
        .label_style(ctx.font(8.0))
        .axis_desc_style(ctx.font(9.0))
        .draw()?;

    let step = (hi - lo) / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let v0 = lo + i as f64 * step;
        let fill = panel.gradient.at((i as f64 + 0.5) / STEPS as f64);
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], fill.filled())
    }))?;

    Ok(())
}
