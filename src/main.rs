//! Benchmark Plotter - comparison charts for pathfinding benchmark results.
//!
//! Reads the per-run CSV exported by the benchmark harness, keeps the runs
//! that found a path, and renders per-algorithm comparison charts plus a
//! summary statistics table.

mod loader;
mod plot;
mod record;
mod stats;
mod summary;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use plot::{Dataset, PlotContext};
use record::Metric;
use stats::GroupKey;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use summary::SummaryTable;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUMMARY_FILE: &str = "summary_statistics.csv";

/// Generate comparison charts from a pathfinding benchmark CSV
#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Benchmark results CSV
    #[arg(
        short,
        long,
        default_value = "results/benchmark_FULL_results_2026-01-05T14-17-56.csv"
    )]
    input: PathBuf,

    /// Output directory for charts and the summary table
    #[arg(short, long, default_value = "charts")]
    output: PathBuf,

    /// Raster resolution of the PNG charts
    #[arg(long, default_value = "300")]
    dpi: u32,

    /// Log diagnostics at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn rule() -> String {
    "=".repeat(80)
}

/// Load, chart and summarize. Returns every written file, summary last.
fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let records = loader::load_records(&args.input)?;
    let found = loader::successful(&records);
    debug!(total = records.len(), found = found.len(), "filtered successful runs");
    let maps: BTreeSet<String> = records.iter().map(|r| r.map_key()).collect();
    debug!(maps = maps.len(), "distinct maps");
    for (algorithm, agg) in stats::by_algorithm(&found, Metric::NodesVisited) {
        debug!(algorithm, runs = agg.count, "algorithm group");
    }

    println!("📊 Read {} tests, {} successful", records.len(), found.len());
    println!(
        "🎯 Algorithms: {:?}",
        stats::distinct(&found, GroupKey::Algorithm)
    );
    println!(
        "🗺️  Map types: {:?}",
        stats::distinct(&found, GroupKey::MapType)
    );

    println!("\n{}", rule());
    println!("🎨 Generating comparison charts");
    println!("Started: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("{}\n", rule());

    let ctx = PlotContext::new(&args.output, args.dpi);
    let data = Dataset {
        all: &records,
        found: &found,
    };
    let mut written = plot::generate_all_plots(&ctx, &data)?;

    let table = SummaryTable::from_records(&found);
    let summary_path = ctx.output_dir().join(SUMMARY_FILE);
    table.write_csv(&summary_path)?;
    println!("✅ Saved: {}", SUMMARY_FILE);
    written.push(summary_path);

    println!("\n{}", rule());
    println!("📊 Summary statistics");
    println!("{}", rule());
    print!("{}", table.render_text());
    println!("{}\n", rule());

    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let written = run(&args)?;

    println!("\n{}", rule());
    println!("🎉 Done! All charts saved in '{}'", args.output.display());
    println!("{}\n", rule());

    println!("📁 Generated files:");
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("   - {}", name.to_string_lossy());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FIXTURE: &str = "\
\"Map_Type\",\"Map_Number\",\"Algorithm_Name\",\"Path_Found\",\"Path_Length\",\"Nodes_Visited\",\"Memory_Usage_Nodes\",\"Execution_Time_ms\"
\"open\",\"1\",\"BFS\",\"Yes\",\"40\",\"120\",\"60\",\"1.5\"
\"open\",\"1\",\"Dijkstra\",\"Yes\",\"40\",\"150\",\"70\",\"2.0\"
\"open\",\"1\",\"A* (w=1, manhattan)\",\"Yes\",\"40\",\"60\",\"30\",\"0.8\"
\"maze\",\"2\",\"BFS\",\"Yes\",\"88\",\"300\",\"90\",\"3.1\"
\"maze\",\"2\",\"Dijkstra\",\"No\",\"0\",\"0\",\"0\",\"0.2\"
\"maze\",\"2\",\"A* (w=2, manhattan)\",\"Yes\",\"92\",\"110\",\"45\",\"1.1\"
\"maze\",\"2\",\"Greedy BFS (manhattan)\",\"Yes\",\"96\",\"70\",\"25\",\"0.6\"
";

    fn args(input: PathBuf, output: PathBuf) -> Args {
        Args {
            input,
            output,
            dpi: 20,
            verbose: false,
        }
    }

    #[test]
    fn run_writes_charts_and_summary_side_by_side() {
        if !plot::fonts_available() {
            eprintln!("skipping: no system sans-serif font to rasterize labels");
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("results.csv");
        fs::write(&input, FIXTURE).unwrap();
        let output = dir.path().join("nested").join("charts");

        let written = run(&args(input, output.clone())).unwrap();

        assert_eq!(written.len(), 10);
        for (i, path) in written.iter().take(9).enumerate() {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with(&format!("{:02}_", i + 1)), "{}", name);
            assert!(name.ends_with(".png"));
            assert_eq!(path.parent(), Some(output.as_path()));
            assert!(fs::metadata(path).unwrap().len() > 0);
        }

        let summary = fs::read_to_string(output.join(SUMMARY_FILE)).unwrap();
        assert_eq!(written[9], output.join(SUMMARY_FILE));
        let rows: Vec<&str> = summary.lines().skip(3).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().any(|r| r.starts_with("Dijkstra,150.0,")));
    }

    #[test]
    fn run_fails_before_touching_output_on_missing_input() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("charts");

        let err = run(&args(dir.path().join("absent.csv"), output.clone())).unwrap_err();

        assert!(err.to_string().contains("Failed to open benchmark file"));
        assert!(!output.exists());
    }
}
