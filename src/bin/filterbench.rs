// filterbench - benchmark harness
// Drives the filter pipeline through each execution strategy in turn and
// prints the comparison table. Also hosts the hidden process-pool worker
// entry and the dataset subset extractor.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use filterbench::{
    render_report, run_worker, BenchConfig, BenchmarkResult, ExecutionStrategy, ProcessPool,
    Sequential, ThreadPool, WORKER_SUBCOMMAND,
};

#[derive(Parser)]
#[command(name = "filterbench", version, about = "Image filter pipeline benchmark")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the benchmark across all execution strategies
    Bench {
        /// Path to the JSON configuration file
        #[arg(long, default_value = "config.json")]
        config: PathBuf,

        /// Worker counts to benchmark for each pool strategy
        #[arg(long, value_delimiter = ',', default_values_t = vec![2, 4, 8])]
        workers: Vec<usize>,
    },

    /// Process-pool worker entry: reads a JSON task list from stdin
    #[command(name = WORKER_SUBCOMMAND, hide = true)]
    Worker,

    /// Extract a flat benchmark corpus from a food-101 style source tree
    Subset {
        /// Root of the source corpus (contains food-101/images/<class>/)
        #[arg(long, default_value = "data")]
        source: PathBuf,

        /// Flat destination directory
        #[arg(long, default_value = "data/raw")]
        dest: PathBuf,

        /// Images to copy from each class folder
        #[arg(long, default_value_t = 10)]
        per_class: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().command {
        Some(Command::Worker) => {
            let processed = run_worker(std::io::stdin().lock())
                .context("worker failed to read task list")?;
            info!("worker processed {processed} tasks");
            Ok(())
        }
        Some(Command::Subset {
            source,
            dest,
            per_class,
        }) => {
            if dest.exists() {
                info!("clearing {}", dest.display());
                filterbench::imgio::reset_output_dir(&dest)
                    .context("failed to clear subset destination")?;
            }
            let copied = filterbench::subset::create_subset(&source, &dest, per_class)
                .context("subset extraction failed")?;
            info!("created subset with {copied} images in {}", dest.display());
            Ok(())
        }
        Some(Command::Bench { config, workers }) => run_benchmark(&config, &workers),
        None => run_benchmark(&PathBuf::from("config.json"), &[2, 4, 8]),
    }
}

fn run_benchmark(config_path: &PathBuf, worker_counts: &[usize]) -> Result<()> {
    let config = BenchConfig::load(config_path);

    // Input trouble is fatal before any strategy executes
    if !config.input_path.exists() {
        bail!("input directory {} not found", config.input_path.display());
    }
    let images = filterbench::imgio::list_image_files(&config.input_path)
        .with_context(|| format!("cannot list {}", config.input_path.display()))?;
    if images.is_empty() {
        bail!("no images found in {}", config.input_path.display());
    }
    info!(
        "running benchmark with {} images from {}",
        images.len(),
        config.input_path.display()
    );

    filterbench::imgio::reset_output_dir(&config.output_path)
        .context("failed to reset output directory")?;

    let mut strategies: Vec<Box<dyn ExecutionStrategy>> = vec![Box::new(Sequential)];
    for &n in worker_counts {
        strategies.push(Box::new(ProcessPool::new(Some(n))));
    }
    for &n in worker_counts {
        strategies.push(Box::new(ThreadPool::new(Some(n))));
    }

    let mut results = Vec::new();
    for strategy in &strategies {
        info!("--- running {} (workers={}) ---", strategy.name(), strategy.workers());
        let elapsed = strategy
            .execute(&images, &config.output_path)
            .with_context(|| format!("{} strategy failed", strategy.name()))?;
        results.push(BenchmarkResult::new(
            strategy.name(),
            strategy.workers(),
            elapsed,
        ));
    }

    println!("{}", render_report(&results));
    Ok(())
}
