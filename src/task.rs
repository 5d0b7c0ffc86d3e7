//! One unit of work: a single source image pushed through the pipeline
//!
//! Tasks are immutable and independent of each other, which is what makes
//! the batch embarrassingly parallel. They serialize to JSON so the
//! process-pool strategy can hand them to worker processes.

use crate::error::Result;
use crate::filters;
use crate::imgio;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Encodes strategy name and worker count, e.g. `mp_4`; keeps concurrent
    /// writers into the shared output directory collision-free.
    pub prefix: String,
}

impl Task {
    pub fn new(
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// `<output_dir>/processed_<prefix>_<source-basename>`
    pub fn output_path(&self) -> PathBuf {
        let basename = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir
            .join(format!("processed_{}_{}", self.prefix, basename))
    }

    /// Decode, run the filter pipeline, encode.
    ///
    /// Errors are returned to the strategy, which logs and skips the task;
    /// a failing task never aborts its siblings.
    pub fn process(&self) -> Result<()> {
        let image = imgio::load_image(&self.source)?;
        let result = filters::apply_filters(&image)?;
        imgio::save_image(&result, self.output_path())
    }

    /// Build the task list for one strategy run over a batch of images.
    pub fn batch(images: &[PathBuf], output_dir: &Path, prefix: &str) -> Vec<Task> {
        images
            .iter()
            .map(|path| Task::new(path, output_dir, prefix))
            .collect()
    }
}
