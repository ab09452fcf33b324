use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pairwise_knn::utils::random_point_set;
use pairwise_knn::{BruteForceKnn, KnnConfig, Metric, PointSet, SelectionStrategy, SelfMatchPolicy};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a random point set and find every point's k nearest neighbors.
#[derive(Parser, Debug)]
#[command(name = "knn-solve", version, about = "Brute-force k-nearest neighbors on random points")]
struct Cli {
    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 1000)]
    size: usize,

    /// Features per point.
    #[arg(short, long, default_value_t = 3)]
    dimensions: usize,

    /// Neighbors per point.
    #[arg(short, long, allow_negative_numbers = true)]
    k: Option<i64>,

    /// Distance metric (squared-l2, l2, l1, linf).
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Selection strategy (heap, partition, auto).
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<SelectionStrategy>,

    /// Source rows per block.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Let each point select itself.
    #[arg(long)]
    include_self: bool,

    /// Disable row-parallel evaluation.
    #[arg(long)]
    sequential: bool,

    /// RNG seed for reproducible inputs.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; flags override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of neighbor rows to print.
    #[arg(long, default_value_t = 5)]
    show: usize,

    /// Write the full neighbor result as JSON to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct SolveReport {
    size: usize,
    dimensions: usize,
    k: usize,
    metric: Metric,
    seed: Option<u64>,
    generate_seconds: f64,
    search_seconds: f64,
    total_neighbors: usize,
}

fn parse_strategy(s: &str) -> std::result::Result<SelectionStrategy, String> {
    match s {
        "heap" => Ok(SelectionStrategy::Heap),
        "partition" | "quickselect" => Ok(SelectionStrategy::Partition),
        "auto" => Ok(SelectionStrategy::Auto),
        _ => Err(format!("unsupported strategy: {s}")),
    }
}

/// Install the tracing subscriber.
///
/// 0 -> warn, 1 -> info, 2 -> debug, 3+ -> trace. `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = format!("pairwise_knn={level},knn_solve={level}");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<KnnConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => KnnConfig::default(),
    };

    if let Some(k) = cli.k {
        config.k = KnnConfig::checked_k(k)?;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.chunk_size.is_some() {
        config.chunk_size = cli.chunk_size;
    }
    if cli.include_self {
        config.self_match = SelfMatchPolicy::Include;
    }
    if cli.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let knn = BruteForceKnn::new(config)?;
    info!(
        size = cli.size,
        dimensions = cli.dimensions,
        k = knn.config().k,
        metric = %knn.metric(),
        "solving"
    );

    let generate_start = Instant::now();
    let points: PointSet<f32> = random_point_set(cli.size, cli.dimensions, cli.seed);
    let generate_seconds = generate_start.elapsed().as_secs_f64();

    let search_start = Instant::now();
    let result = knn.search_self(&points)?;
    let search_seconds = search_start.elapsed().as_secs_f64();

    for (i, row) in result.iter().take(cli.show).enumerate() {
        let neighbors: Vec<String> = row
            .iter()
            .map(|n| format!("{}:{:.6}", n.index, n.distance))
            .collect();
        println!("{:>6} -> [{}]", i, neighbors.join(", "));
    }
    if result.len() > cli.show {
        println!("... ({} more rows)", result.len() - cli.show);
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string(&result)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote neighbor result");
    }

    let report = SolveReport {
        size: cli.size,
        dimensions: cli.dimensions,
        k: knn.config().k,
        metric: knn.metric(),
        seed: cli.seed,
        generate_seconds,
        search_seconds,
        total_neighbors: result.total_neighbors(),
    };
    println!("json: {}", serde_json::to_string(&report)?);

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
