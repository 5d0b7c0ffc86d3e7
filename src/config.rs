//! Benchmark configuration with enumerated defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_INPUT_PATH: &str = "data/raw";
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a JSON file. A missing or unparsable file
    /// falls back to the defaults; configuration trouble never aborts a run.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid config {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                warn!("cannot read config {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
