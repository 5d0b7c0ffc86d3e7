//! The fixed five-stage filter pipeline
//!
//! grayscale -> blur -> edge detection -> sharpen -> brightness. Every stage
//! allocates a fresh array; nothing is mutated in place. The pipeline always
//! reduces to a single channel — it is an edge visualizer, not a
//! color-preserving filter chain.

use crate::convolve::convolve2d;
use crate::error::{PipelineError, Result};
use crate::kernel;
use ndarray::{Array2, Array3};

/// Luma weights for RGB -> grayscale conversion (ITU-R BT.601)
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Brightness multiplier applied by the final stage
const BRIGHTNESS_FACTOR: f64 = 1.2;

/// A decoded image: either a single-channel plane or an RGB cube with a
/// fixed channel axis of 3. Samples are 8-bit; shape is (height, width[, 3]).
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    Gray(Array2<u8>),
    Rgb(Array3<u8>),
}

impl Image {
    pub fn height(&self) -> usize {
        match self {
            Image::Gray(plane) => plane.nrows(),
            Image::Rgb(cube) => cube.dim().0,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Image::Gray(plane) => plane.ncols(),
            Image::Rgb(cube) => cube.dim().1,
        }
    }
}

/// Convert an image to a single luminance plane.
///
/// Already-gray input passes through unchanged, so the stage is idempotent.
pub fn grayscale(image: &Image) -> Result<Array2<u8>> {
    match image {
        Image::Gray(plane) => Ok(plane.clone()),
        Image::Rgb(cube) => {
            let (height, width, channels) = cube.dim();
            if channels != 3 {
                return Err(PipelineError::InvalidImageShape(format!(
                    "expected 3 channels, got {channels}"
                )));
            }
            let mut out = Array2::<u8>::zeros((height, width));
            for y in 0..height {
                for x in 0..width {
                    let luma = LUMA_R * cube[[y, x, 0]] as f64
                        + LUMA_G * cube[[y, x, 1]] as f64
                        + LUMA_B * cube[[y, x, 2]] as f64;
                    out[[y, x]] = luma as u8;
                }
            }
            Ok(out)
        }
    }
}

/// Gaussian-like blur with the normalized 3x3 kernel.
pub fn blur(plane: &Array2<u8>) -> Result<Array2<u8>> {
    convolve2d(plane, &kernel::blur_kernel())
}

/// Sobel edge detection: horizontal and vertical gradients combined as a
/// Euclidean magnitude, rescaled so the per-image maximum maps to 255.
///
/// A flat plane has zero gradient everywhere; the rescale divide is guarded
/// so that case yields an all-zero plane instead of dividing by zero.
pub fn detect_edges(plane: &Array2<u8>) -> Result<Array2<u8>> {
    let ix = convolve2d(plane, &kernel::sobel_x_kernel())?;
    let iy = convolve2d(plane, &kernel::sobel_y_kernel())?;

    let (height, width) = plane.dim();
    let mut magnitude = Array2::<f64>::zeros((height, width));
    let mut max = 0.0f64;
    for y in 0..height {
        for x in 0..width {
            let m = (ix[[y, x]] as f64).hypot(iy[[y, x]] as f64);
            magnitude[[y, x]] = m;
            if m > max {
                max = m;
            }
        }
    }

    let mut out = Array2::<u8>::zeros((height, width));
    if max > 0.0 {
        let scale = 255.0 / max;
        for (dst, &m) in out.iter_mut().zip(magnitude.iter()) {
            *dst = (m * scale) as u8;
        }
    }
    Ok(out)
}

/// Sharpen with the fixed 3x3 kernel.
pub fn sharpen(plane: &Array2<u8>) -> Result<Array2<u8>> {
    convolve2d(plane, &kernel::sharpen_kernel())
}

/// Scale every sample by the brightness factor, clamped to [0, 255].
pub fn brighten(plane: &Array2<u8>) -> Array2<u8> {
    plane.mapv(|v| (v as f64 * BRIGHTNESS_FACTOR).clamp(0.0, 255.0) as u8)
}

/// Run the full five-stage pipeline. Pure and deterministic: the same input
/// always produces the same single-channel output.
pub fn apply_filters(image: &Image) -> Result<Array2<u8>> {
    let gray = grayscale(image)?;
    let blurred = blur(&gray)?;
    let edges = detect_edges(&blurred)?;
    let sharpened = sharpen(&edges)?;
    Ok(brighten(&sharpened))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn rgb_fixture() -> Image {
        let mut cube = Array3::<u8>::zeros((4, 4, 3));
        for y in 0..4 {
            for x in 0..4 {
                cube[[y, x, 0]] = (y * 60 + x) as u8;
                cube[[y, x, 1]] = (x * 50) as u8;
                cube[[y, x, 2]] = 128;
            }
        }
        Image::Rgb(cube)
    }

    #[test]
    fn test_grayscale_luma_weighting() {
        let mut cube = Array3::<u8>::zeros((1, 1, 3));
        cube[[0, 0, 0]] = 100;
        cube[[0, 0, 1]] = 150;
        cube[[0, 0, 2]] = 200;
        let gray = grayscale(&Image::Rgb(cube)).unwrap();
        // 0.299*100 + 0.587*150 + 0.114*200 = 140.75, truncated
        assert_eq!(gray[[0, 0]], 140);
    }

    #[test]
    fn test_grayscale_idempotent() {
        let once = grayscale(&rgb_fixture()).unwrap();
        let twice = grayscale(&Image::Gray(once.clone())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_grayscale_rejects_bad_channel_axis() {
        let cube = Array3::<u8>::zeros((2, 2, 4));
        let err = grayscale(&Image::Rgb(cube)).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImageShape(_)));
    }

    #[test]
    fn test_uniform_field_survives_blur_and_zeroes_edges() {
        let plane = Array2::<u8>::from_elem((4, 4), 100);
        let blurred = blur(&plane).unwrap();
        assert!(blurred.iter().all(|&v| v == 100));
        // Zero gradient everywhere; the max-rescale must not divide by zero.
        let edges = detect_edges(&blurred).unwrap();
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_edge_magnitude_peaks_at_255() {
        let mut plane = Array2::<u8>::zeros((5, 5));
        for y in 0..5 {
            for x in 3..5 {
                plane[[y, x]] = 200;
            }
        }
        let edges = detect_edges(&plane).unwrap();
        assert_eq!(edges.iter().copied().max(), Some(255));
    }

    #[test]
    fn test_brighten_clamps() {
        let plane = Array2::<u8>::from_elem((2, 2), 250);
        let out = brighten(&plane);
        assert!(out.iter().all(|&v| v == 255));
        let plane = Array2::<u8>::from_elem((2, 2), 100);
        let out = brighten(&plane);
        assert!(out.iter().all(|&v| v == 120));
    }

    #[test]
    fn test_apply_filters_is_deterministic() {
        let image = rgb_fixture();
        let a = apply_filters(&image).unwrap();
        let b = apply_filters(&image).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_filters_output_is_single_channel_same_size() {
        let image = rgb_fixture();
        let out = apply_filters(&image).unwrap();
        assert_eq!(out.dim(), (image.height(), image.width()));
        assert_eq!(out.dim(), (4, 4));
    }

    #[test]
    fn test_uniform_rgb_end_to_end_yields_zero_plane() {
        let cube = Array3::<u8>::from_elem((4, 4, 3), 100);
        let out = apply_filters(&Image::Rgb(cube)).unwrap();
        // Flat input: zero edge magnitude, and every later stage keeps it zero.
        assert!(out.iter().all(|&v| v == 0));
    }
}
