//! filterbench - fixed spatial filter pipeline with an execution-strategy benchmark
//!
//! Applies a five-stage convolution filter chain (grayscale, blur, Sobel
//! edges, sharpen, brightness) to a batch of images and compares sequential,
//! process-pool, and thread-pool execution against an Amdahl's-Law
//! prediction.

pub mod config;
pub mod convolve;
mod error;
pub mod filters;
pub mod imgio;
pub mod kernel;
pub mod metrics;
pub mod report;
pub mod strategy;
pub mod subset;
pub mod task;

pub use config::BenchConfig;
pub use convolve::convolve2d;
pub use error::{PipelineError, Result};
pub use filters::{apply_filters, Image};
pub use report::{render_report, BenchmarkResult};
pub use strategy::{
    run_worker, ExecutionStrategy, ProcessPool, Sequential, ThreadPool, WORKER_SUBCOMMAND,
};
pub use task::Task;
