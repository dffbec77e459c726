//! Comparison chart generation from benchmark records.

mod bars;
mod heatmap;
mod palette;
mod radar;
mod scatter;

use crate::record::BenchmarkRecord;
use anyhow::{Context, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Full table plus its successful subset. Success rates read `all`,
/// everything else reads `found`.
pub struct Dataset<'a> {
    pub all: &'a [BenchmarkRecord],
    pub found: &'a [BenchmarkRecord],
}

/// Output location and raster resolution shared by every chart.
pub struct PlotContext {
    output_dir: PathBuf,
    dpi: u32,
}

impl PlotContext {
    pub fn new<P: Into<PathBuf>>(output_dir: P, dpi: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            dpi: dpi.max(1),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }

    /// Pixel size of a figure given in inches.
    fn figure(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        (
            (width_in * self.dpi as f64).round() as u32,
            (height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Typographic points to pixels.
    fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn px(&self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }

    fn font(&self, points: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.pt(points), FontStyle::Normal)
    }

    fn bold(&self, points: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.pt(points), FontStyle::Bold)
    }

    /// Label area wide enough for the longest category name.
    fn label_area(&self, names: &[&str], points: f64) -> u32 {
        let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(4);
        (self.pt(points) * 0.6 * longest as f64 + self.pt(12.0)).round() as u32
    }
}

type Renderer = fn(&PlotContext, &Dataset<'_>, &Path) -> Result<()>;

/// Every chart in output order.
const CHARTS: [(&str, Renderer); 9] = [
    ("01_nodes_visited_comparison.png", bars::nodes_visited),
    ("02_execution_time_comparison.png", bars::execution_time),
    ("03_path_length_comparison.png", bars::path_length),
    ("04_memory_usage_comparison.png", bars::memory_usage),
    ("05_astar_detailed_analysis.png", bars::astar_analysis),
    ("06_map_type_analysis.png", bars::map_type_analysis),
    ("07_efficiency_scatter.png", scatter::efficiency_scatter),
    ("08_performance_heatmap.png", heatmap::performance_heatmap),
    ("09_radar_comparison.png", radar::radar_comparison),
];

/// Render every chart into the output directory.
pub fn generate_all_plots(ctx: &PlotContext, data: &Dataset<'_>) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(ctx.output_dir()).with_context(|| {
        format!("Failed to create output directory: {}", ctx.output_dir().display())
    })?;

    let mut generated = Vec::new();
    for (file, render) in CHARTS {
        let path = ctx.path(file);
        debug!(file, dpi = ctx.dpi, "rendering chart");
        render(ctx, data, &path).with_context(|| format!("Failed to render {}", file))?;
        println!("✅ Saved: {}", file);
        generated.push(path);
    }

    Ok(generated)
}

/// Whether text can be rasterized on this machine.
#[cfg(test)]
pub(crate) fn fonts_available() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("Ag")
        .is_ok()
}

/// Axis over `n` categories. Category `i` spans `i - 0.5 .. i + 0.5`, so
/// integer ticks land on slot centres.
fn category_axis(n: usize) -> RangedCoordf64 {
    (-0.5..n.max(1) as f64 - 0.5).into()
}

/// Name under an integer tick; off-centre ticks stay blank.
fn category_label(names: &[&str], coord: f64) -> String {
    let slot = coord.round();
    if slot < 0.0 || (coord - slot).abs() > 1e-6 {
        return String::new();
    }
    names
        .get(slot as usize)
        .map(|n| n.to_string())
        .unwrap_or_default()
}

/// Upper axis bound leaving headroom for value labels.
fn padded_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Records whose algorithm is in `names`, keeping table order.
fn select<'a>(records: &'a [BenchmarkRecord], names: &[&str]) -> Vec<&'a BenchmarkRecord> {
    records
        .iter()
        .filter(|r| names.contains(&r.algorithm.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::successful;
    use crate::record::record;
    use plotters::coord::ranged1d::Ranged;
    use tempfile::TempDir;

    #[test]
    fn figure_scales_with_dpi() {
        let ctx = PlotContext::new("charts", 300);
        assert_eq!(ctx.figure(16.0, 8.0), (4800, 2400));
        assert_eq!(ctx.pt(72.0), 300.0);
        assert_eq!(PlotContext::new("charts", 72).px(10.0), 10);
    }

    #[test]
    fn chart_files_are_numbered_in_order() {
        let files: Vec<&str> = CHARTS.iter().map(|(file, _)| *file).collect();
        assert_eq!(files.len(), 9);
        for (i, file) in files.iter().enumerate() {
            assert!(file.starts_with(&format!("{:02}_", i + 1)));
            assert!(file.ends_with(".png"));
        }
    }

    #[test]
    fn category_labels_map_slot_centres() {
        let names = ["BFS", "DFS"];
        assert_eq!(category_label(&names, 0.0), "BFS");
        assert_eq!(category_label(&names, 1.0), "DFS");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }

    #[test]
    fn category_axis_centres_slots_on_integers() {
        let axis = category_axis(3);
        assert_eq!(axis.range(), -0.5..2.5);
        let empty = category_axis(0);
        assert_eq!(empty.range(), -0.5..0.5);
    }

    #[test]
    fn padded_max_ignores_nan_and_handles_empty() {
        assert!((padded_max([f64::NAN, 10.0]) - 11.5).abs() < 1e-9);
        assert_eq!(padded_max(std::iter::empty()), 1.0);
    }

    #[test]
    fn select_skips_unknown_algorithms() {
        let rows = vec![
            record("BFS", "grid", true, 1, 1.0, 1.0, 1.0),
            record("DFS", "grid", true, 1, 1.0, 1.0, 1.0),
        ];
        let picked = select(&rows, &["BFS", "Dijkstra"]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].algorithm, "BFS");
    }

    fn synthetic() -> Vec<BenchmarkRecord> {
        let algorithms = [
            "Dijkstra",
            "BFS",
            "DFS",
            "A* (w=0.5, manhattan)",
            "A* (w=1, manhattan)",
            "A* (w=2, manhattan)",
            "Greedy BFS (manhattan)",
            "Bidirectional Greedy (manhattan)",
        ];
        let maps = ["open", "maze", "random"];
        let mut rows = Vec::new();
        for (a, name) in algorithms.iter().enumerate() {
            for (m, map) in maps.iter().enumerate() {
                for trial in 0..3u64 {
                    let found = !(name.starts_with("Bidirectional") && trial == 0);
                    let nodes = 50 + 40 * a as u64 + 25 * m as u64 + trial * 7;
                    rows.push(record(
                        name,
                        map,
                        found,
                        nodes,
                        nodes as f64 / 500.0,
                        40.0 + (a + m) as f64,
                        nodes as f64 / 4.0,
                    ));
                }
            }
        }
        rows
    }

    #[test]
    fn renders_every_chart() {
        if !fonts_available() {
            eprintln!("skipping: no system sans-serif font to rasterize labels");
            return;
        }
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("charts");
        let all = synthetic();
        let found = successful(&all);

        let ctx = PlotContext::new(&out, 30);
        let generated = generate_all_plots(&ctx, &Dataset { all: &all, found: &found }).unwrap();

        assert_eq!(generated.len(), 9);
        for path in generated {
            let meta = std::fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
        }
    }

    #[test]
    fn renders_with_no_successful_rows() {
        if !fonts_available() {
            eprintln!("skipping: no system sans-serif font to rasterize labels");
            return;
        }
        let dir = TempDir::new().unwrap();
        let all = vec![record("BFS", "grid", false, 0, 0.1, 0.0, 0.0)];
        let found = successful(&all);

        let ctx = PlotContext::new(dir.path(), 20);
        let generated = generate_all_plots(&ctx, &Dataset { all: &all, found: &found }).unwrap();
        assert_eq!(generated.len(), 9);
    }
}
