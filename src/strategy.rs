//! Execution strategies for driving a batch through the filter pipeline
//!
//! Three interchangeable drivers behind one trait: strictly sequential
//! (the speedup baseline), a fixed-size OS process pool, and a fixed-size
//! thread pool. All three run the identical per-task code path, so their
//! outputs are byte-for-byte equal and only wall-clock time differs.
//!
//! Failure policy everywhere: a task that cannot be decoded, filtered, or
//! encoded is logged and skipped; the batch always runs to completion.

use crate::error::{PipelineError, Result};
use crate::task::Task;
use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Hidden subcommand of the benchmark binary that the process pool spawns.
/// The parent writes a JSON task list to the child's stdin.
pub const WORKER_SUBCOMMAND: &str = "worker";

/// One capability, three implementations: process a batch of images through
/// the filter pipeline and report total elapsed wall-clock time.
pub trait ExecutionStrategy {
    fn name(&self) -> &'static str;

    fn workers(&self) -> usize;

    /// Output-filename prefix; encodes strategy and worker count so runs
    /// sharing one output directory never collide.
    fn prefix(&self) -> String;

    fn execute(&self, images: &[PathBuf], output_dir: &Path) -> Result<Duration>;
}

fn run_task(task: &Task) -> bool {
    match task.process() {
        Ok(()) => true,
        Err(e) => {
            warn!("skipping {}: {e}", task.source.display());
            false
        }
    }
}

/// Baseline: one task at a time on the calling thread.
pub struct Sequential;

impl ExecutionStrategy for Sequential {
    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn workers(&self) -> usize {
        1
    }

    fn prefix(&self) -> String {
        "sequential".to_string()
    }

    fn execute(&self, images: &[PathBuf], output_dir: &Path) -> Result<Duration> {
        info!("starting sequential processing of {} images", images.len());
        let tasks = Task::batch(images, output_dir, &self.prefix());
        let start = Instant::now();
        for task in &tasks {
            run_task(task);
        }
        let elapsed = start.elapsed();
        info!("sequential completed in {:.4}s", elapsed.as_secs_f64());
        Ok(elapsed)
    }
}

/// Fixed-size thread pool within this process.
///
/// Every task allocates its own buffers and writes a unique filename, so no
/// locking is needed beyond the pool's internal queue.
pub struct ThreadPool {
    workers: usize,
}

impl ThreadPool {
    /// `workers` defaults to the host's logical core count.
    pub fn new(workers: Option<usize>) -> Self {
        Self {
            workers: workers.unwrap_or_else(num_cpus::get),
        }
    }
}

impl ExecutionStrategy for ThreadPool {
    fn name(&self) -> &'static str {
        "ThreadPool"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn prefix(&self) -> String {
        format!("threads_{}", self.workers)
    }

    fn execute(&self, images: &[PathBuf], output_dir: &Path) -> Result<Duration> {
        info!(
            "starting thread pool with {} workers for {} images",
            self.workers,
            images.len()
        );
        // A dedicated pool, never the global one: repeated runs with
        // different sizes must not observe each other's configuration.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| PipelineError::Worker(e.to_string()))?;

        let tasks = Task::batch(images, output_dir, &self.prefix());
        let start = Instant::now();
        pool.install(|| {
            tasks.par_iter().for_each(|task| {
                run_task(task);
            });
        });
        let elapsed = start.elapsed();
        info!("thread pool completed in {:.4}s", elapsed.as_secs_f64());
        Ok(elapsed)
    }
}

/// Fixed-size pool of OS processes.
///
/// Tasks are fan-out partitioned into contiguous chunks, one child process
/// per chunk; each chunk crosses the process boundary as JSON on the child's
/// stdin and results are fire-and-forget files. All children are joined at
/// batch end — no partial streaming back to the caller.
pub struct ProcessPool {
    workers: usize,
}

impl ProcessPool {
    /// `workers` defaults to the host's logical core count.
    pub fn new(workers: Option<usize>) -> Self {
        Self {
            workers: workers.unwrap_or_else(num_cpus::get).max(1),
        }
    }
}

impl ExecutionStrategy for ProcessPool {
    fn name(&self) -> &'static str {
        "ProcessPool"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn prefix(&self) -> String {
        format!("mp_{}", self.workers)
    }

    fn execute(&self, images: &[PathBuf], output_dir: &Path) -> Result<Duration> {
        info!(
            "starting process pool with {} workers for {} images",
            self.workers,
            images.len()
        );
        let exe = std::env::current_exe()?;
        let tasks = Task::batch(images, output_dir, &self.prefix());

        let start = Instant::now();
        let mut children = Vec::new();
        for chunk in partition_tasks(&tasks, self.workers) {
            let payload = serde_json::to_vec(&chunk)?;
            let mut child = Command::new(&exe)
                .arg(WORKER_SUBCOMMAND)
                .stdin(Stdio::piped())
                .spawn()?;
            // stdin handle is dropped after the write so the child sees EOF
            child
                .stdin
                .take()
                .ok_or_else(|| PipelineError::Worker("child stdin unavailable".to_string()))?
                .write_all(&payload)?;
            children.push(child);
        }

        for mut child in children {
            let status = child.wait()?;
            if !status.success() {
                // The worker itself skips failing tasks, so a non-zero exit
                // means the child never got that far. Its chunk is lost but
                // sibling chunks are unaffected.
                warn!("worker process exited with {status}");
            }
        }
        let elapsed = start.elapsed();
        info!("process pool completed in {:.4}s", elapsed.as_secs_f64());
        Ok(elapsed)
    }
}

/// Split tasks into at most `workers` contiguous chunks of near-equal size.
fn partition_tasks(tasks: &[Task], workers: usize) -> Vec<Vec<Task>> {
    if tasks.is_empty() {
        return Vec::new();
    }
    let chunk_size = tasks.len().div_ceil(workers.max(1));
    tasks.chunks(chunk_size).map(|c| c.to_vec()).collect()
}

/// Worker-process entry: read a JSON task list from `reader`, process each
/// task with the same skip-and-continue policy as the in-process strategies,
/// and return how many tasks succeeded.
pub fn run_worker(mut reader: impl Read) -> Result<usize> {
    let mut payload = String::new();
    reader.read_to_string(&mut payload)?;
    let tasks: Vec<Task> = serde_json::from_str(&payload)?;

    let mut processed = 0;
    for task in &tasks {
        if run_task(task) {
            processed += 1;
        }
    }
    Ok(processed)
}
