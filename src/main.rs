use std::path::Path;

use clap::Parser;
use env_logger::Env;

mod analyzer;
mod datatypes;
mod error;
mod generator;
mod optimizer;
mod post_processor;

/// Synthetic FEA mesh quality simulator and adjuster
///
/// Fabricates a dataset of per-element quality metrics, flags elements that
/// fail the fixed thresholds, rescales the flagged values toward acceptable
/// ranges, and writes the original, adjusted, and poor-element tables as
/// csv files into the current directory.
#[derive(Parser)]
#[command(name = "meshtune")]
struct Args {
    /// Optional json input file with simulation parameters
    input: Option<String>,

    /// Number of mesh elements to simulate (overrides the input file)
    #[arg(short = 'n', long)]
    elements: Option<usize>,

    /// Seed for the mesh generator (overrides the input file)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_log() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

fn main() {
    init_log();

    let args = Args::parse();

    let mut params = generator::load_parameters(args.input.as_deref()).unwrap();
    if let Some(elements) = args.elements {
        params.num_elements = elements;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    let mesh = generator::run(&params).unwrap();

    let (report, poor_elements) = analyzer::run(&mesh);
    log::info!(
        "mean aspect ratio {:.4}, jacobian {:.4}, skewness {:.4}, element quality {:.4}",
        report.avg_aspect_ratio,
        report.avg_jacobian,
        report.avg_skewness,
        report.avg_element_quality
    );

    let optimized_mesh = optimizer::run(&mesh);
    let metrics = optimizer::compute_optimization_metrics(&mesh, &optimized_mesh);
    log::info!(
        "mean element quality {:.4} -> {:.4} ({:+.2}%)",
        metrics.original_avg_quality,
        metrics.optimized_avg_quality,
        metrics.improvement_percentage
    );
    log::info!(
        "computational time reduction: {:.2}%",
        metrics.time_reduction_percentage
    );

    post_processor::run(&mesh, &optimized_mesh, &poor_elements, Path::new(".")).unwrap();
}
