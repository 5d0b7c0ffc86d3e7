//! Image file I/O adapter
//!
//! Thin boundary between the pipeline's ndarray types and the filesystem:
//! decode to an RGB cube, encode a gray plane, list a batch directory, and
//! reset the shared output directory between benchmark runs.

use crate::error::{PipelineError, Result};
use crate::filters::Image;
use ndarray::{Array2, Array3};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Accepted input extensions, matched case-insensitively
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Attempts before giving up on output-directory removal
const CLEANUP_RETRIES: u32 = 3;
const CLEANUP_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Decode an image file into an RGB sample cube.
pub fn load_image(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let cube = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .map_err(|e| PipelineError::InvalidImageShape(e.to_string()))?;
    Ok(Image::Rgb(cube))
}

/// Encode a single-channel plane to disk; the format follows the extension.
pub fn save_image(plane: &Array2<u8>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (height, width) = plane.dim();
    let buffer = image::GrayImage::from_raw(
        width as u32,
        height as u32,
        plane.iter().copied().collect(),
    )
    .ok_or_else(|| {
        PipelineError::InvalidImageShape(format!("cannot build {width}x{height} gray buffer"))
    })?;
    buffer.save(path).map_err(|source| PipelineError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// List the image files in a directory, sorted for a stable batch order.
///
/// An unreadable directory is an error; the harness treats it as fatal
/// before any strategy runs.
pub fn list_image_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Delete and recreate the output directory.
///
/// Removal is retried a bounded number of times against transient filesystem
/// refusals (antivirus scans, lingering handles); still failing after that
/// is fatal to the run.
pub fn reset_output_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if dir.exists() {
        let mut attempt = 1;
        loop {
            match std::fs::remove_dir_all(dir) {
                Ok(()) => break,
                Err(e) if attempt < CLEANUP_RETRIES => {
                    warn!(
                        "failed to remove {} (attempt {attempt}/{CLEANUP_RETRIES}): {e}",
                        dir.display()
                    );
                    std::thread::sleep(CLEANUP_RETRY_DELAY);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
