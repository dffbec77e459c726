//! Nodes-visited vs execution-time scatter.

use super::palette;
use super::{padded_max, select, Dataset, PlotContext};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// Main algorithms; bidirectional greedy is left out as it rarely succeeds.
const SCATTER_ALGORITHMS: &[&str] = &[
    "Dijkstra",
    "BFS",
    "DFS",
    "A* (w=1, manhattan)",
    "A* (w=2, manhattan)",
    "Greedy BFS (manhattan)",
];

pub fn efficiency_scatter(ctx: &PlotContext, data: &Dataset<'_>, path: &Path) -> Result<()> {
    let rows = select(data.found, SCATTER_ALGORITHMS);
    let x_max = padded_max(rows.iter().map(|r| r.nodes_visited as f64));
    let y_max = padded_max(rows.iter().map(|r| r.execution_time_ms));

    let root = BitMapBackend::new(path, ctx.figure(14.0, 10.0)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Efficiency: nodes visited vs execution time (bottom-left is best)",
            ctx.bold(14.0),
        )
        .margin(ctx.px(12.0))
        .x_label_area_size(ctx.px(36.0))
        .y_label_area_size(ctx.px(52.0))
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Nodes Visited")
        .y_desc("Execution Time (ms)")
        .label_style(ctx.font(10.0))
        .axis_desc_style(ctx.bold(12.0))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let radius = ctx.px(5.0);
    let swatch = radius as i32;
    for (idx, algorithm) in SCATTER_ALGORITHMS.iter().enumerate() {
        let color = palette::categorical(idx);
        let points: Vec<(f64, f64)> = rows
            .iter()
            .filter(|r| r.algorithm == *algorithm)
            .map(|r| (r.nodes_visited as f64, r.execution_time_ms))
            .collect();
        if points.is_empty() {
            continue;
        }

        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, radius, color.mix(0.6).filled())),
            )?
            .label(*algorithm)
            .legend(move |(x, y)| Circle::new((x + swatch, y), swatch as u32, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(ctx.font(10.0))
        .draw()?;

    root.present()?;
    Ok(())
}
