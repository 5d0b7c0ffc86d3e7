//! Dataset subset extraction
//!
//! Builds a small flat benchmark corpus by copying the first N images out of
//! each class folder of a food-101 style source tree. Copied files are
//! renamed `<class>_<name>` so the flat destination stays collision-free.

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Extensions accepted when sampling class folders
const SUBSET_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Copy `images_per_class` images from every class folder under
/// `<source_root>/food-101/images` into the flat `dest` directory.
/// Returns the total number of files copied.
pub fn create_subset(
    source_root: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    images_per_class: usize,
) -> Result<usize> {
    let images_dir = source_root.as_ref().join("food-101").join("images");
    let dest = dest.as_ref();

    // Missing source tree is an error; the caller decides how loudly to fail.
    let classes = list_sorted(&images_dir, |p| p.is_dir())?;
    info!("found {} classes in {}", classes.len(), images_dir.display());

    std::fs::create_dir_all(dest)?;

    let mut total_copied = 0;
    for class_dir in &classes {
        let class = class_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let images = list_sorted(class_dir, |p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| SUBSET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
        })?;

        for image in images.iter().take(images_per_class) {
            let name = image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            std::fs::copy(image, dest.join(format!("{class}_{name}")))?;
            total_copied += 1;
        }
    }

    info!("copied {total_copied} images into {}", dest.display());
    Ok(total_copied)
}

fn list_sorted(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<std::path::PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if keep(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}
