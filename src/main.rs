use std::path::PathBuf;
use std::time::Instant;

use bezshape::report::Report;
use bezshape::{load, render, ShapeConfig, Tolerance};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bezshape", about = "Hand-drawn paths to classified, regularized bezier shapes")]
struct Cli {
    /// Input table: rows of path_id,sub_path_id,x,y
    #[arg(short, long)]
    input: PathBuf,

    /// Render the input paths to this PNG
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Draw the regularized curves over the plotted paths
    #[arg(long, requires = "plot")]
    overlay: bool,

    /// Plot size in pixels (square)
    #[arg(long, default_value = "800")]
    plot_size: u32,

    /// Write the classified shapes as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Relative tolerance for shape checks
    #[arg(long, default_value = "1e-5")]
    rtol: f64,

    /// Absolute tolerance for shape checks
    #[arg(long, default_value = "1e-8")]
    atol: f64,

    /// Fit sub-paths in parallel
    #[arg(long)]
    parallel: bool,

    /// Fail instead of falling back to "Unknown" when a shape cannot be regularized
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = ShapeConfig {
        tolerance: Tolerance {
            rtol: cli.rtol,
            atol: cli.atol,
        },
        parallel: cli.parallel,
        strict: cli.strict,
        ..ShapeConfig::default()
    };

    eprintln!();
    eprintln!("  bezshape \u{00b7} {}", cli.input.display());
    eprintln!();

    // ── Load ──────────────────────────────────────────────
    let t_start = Instant::now();
    let groups = load::read_path_groups(&cli.input)?;
    let sub_paths: usize = groups.iter().map(|g| g.sub_paths.len()).sum();
    let points: usize = groups.iter().map(|g| g.point_count()).sum();
    eprintln!(
        "  Load        {} paths \u{2192} {} sub-paths \u{00b7} {} points",
        groups.len(),
        sub_paths,
        points,
    );

    // ── Fit · classify · regularize ───────────────────────
    let shapes = bezshape::process_paths(&groups, &config)?;
    let report = Report::new(&shapes);
    let summary: Vec<String> = report
        .counts()
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{} {}", n, label))
        .collect();
    eprintln!(
        "  Shapes      {}  ({}ms)",
        summary.join(" \u{00b7} "),
        t_start.elapsed().as_millis(),
    );

    // ── Output ────────────────────────────────────────────
    print!("{}", report);

    if let Some(plot) = &cli.plot {
        if cli.overlay {
            render::plot_shapes(&groups, &shapes, plot, cli.plot_size)?;
        } else {
            render::plot_paths(&groups, plot, cli.plot_size)?;
        }
        eprintln!("  Plot        {}", plot.display());
    }

    if let Some(json) = &cli.json {
        std::fs::write(json, report.to_json()?)?;
        eprintln!("  JSON        {}", json.display());
    }

    eprintln!();
    Ok(())
}
