//! Benchmark results and the comparison table

use crate::metrics;
use std::time::Duration;

/// One strategy run: immutable after creation, consumed only by reporting.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub strategy: String,
    pub workers: usize,
    pub elapsed: Duration,
}

impl BenchmarkResult {
    pub fn new(strategy: impl Into<String>, workers: usize, elapsed: Duration) -> Self {
        Self {
            strategy: strategy.into(),
            workers,
            elapsed,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Render the comparison table. The first result is the sequential baseline
/// all speedups are measured against.
pub fn render_report(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} | {:>7} | {:>9} | {:>8} | {:>8} | {:>6} | {:>8} | {:>10}\n",
        "Mode", "Workers", "Time (s)", "Speedup", "Amdahl", "Diff", "Par.frac", "Efficiency"
    ));
    out.push_str(&"-".repeat(90));
    out.push('\n');

    let base_time = results.first().map(|r| r.elapsed_secs()).unwrap_or(0.0);

    for result in results {
        let actual = metrics::actual_speedup(base_time, result.elapsed_secs());
        let predicted = metrics::theoretical_speedup(result.workers, metrics::SEQUENTIAL_FRACTION);
        let fraction = metrics::parallel_fraction(actual, result.workers);
        let eff = metrics::efficiency(actual, result.workers);
        out.push_str(&format!(
            "{:<14} | {:>7} | {:>9.4} | {:>7.2}x | {:>7.2}x | {:>6.2} | {:>8.3} | {:>10.3}\n",
            result.strategy,
            result.workers,
            result.elapsed_secs(),
            actual,
            predicted,
            actual - predicted,
            fraction,
            eff,
        ));
    }
    out
}
