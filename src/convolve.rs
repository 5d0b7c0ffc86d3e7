//! 3x3 convolution over a single sample plane
//!
//! This is the CPU hotspot of the whole benchmark: O(H*W) with a constant
//! factor of 9 multiply-adds per pixel. Parallelism lives one level up, at
//! the per-image task granularity, so the engine itself stays sequential.

use crate::error::{PipelineError, Result};
use ndarray::Array2;

/// Convolve a plane with a 3x3 kernel.
///
/// The plane is padded by one pixel of edge replication on every side, so
/// border pixels are computed from real neighboring intensities rather than
/// a zero boundary. Each result is clamped to [0, 255] and truncated to u8;
/// output shape always equals input shape.
pub fn convolve2d(plane: &Array2<u8>, kernel: &Array2<f64>) -> Result<Array2<u8>> {
    if kernel.shape() != [3, 3] {
        return Err(PipelineError::UnsupportedKernelShape {
            rows: kernel.nrows(),
            cols: kernel.ncols(),
        });
    }

    let (height, width) = plane.dim();
    if height == 0 || width == 0 {
        return Ok(plane.clone());
    }

    let padded = pad_replicate(plane);

    let mut out = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f64;
            for ky in 0..3 {
                for kx in 0..3 {
                    acc += padded[[y + ky, x + kx]] * kernel[[ky, kx]];
                }
            }
            out[[y, x]] = acc.clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

/// Replicate edge values outward by one pixel in every direction.
fn pad_replicate(plane: &Array2<u8>) -> Array2<f64> {
    let (height, width) = plane.dim();
    let mut padded = Array2::<f64>::zeros((height + 2, width + 2));
    for y in 0..height + 2 {
        let sy = y.saturating_sub(1).min(height - 1);
        for x in 0..width + 2 {
            let sx = x.saturating_sub(1).min(width - 1);
            padded[[y, x]] = plane[[sy, sx]] as f64;
        }
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{blur_kernel, sharpen_kernel};
    use ndarray::array;

    #[test]
    fn test_output_shape_matches_input() {
        let plane = Array2::<u8>::zeros((5, 7));
        let out = convolve2d(&plane, &blur_kernel()).unwrap();
        assert_eq!(out.dim(), (5, 7));
    }

    #[test]
    fn test_rejects_non_3x3_kernel() {
        let plane = Array2::<u8>::zeros((4, 4));
        let kernel = Array2::<f64>::zeros((5, 5));
        let err = convolve2d(&plane, &kernel).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnsupportedKernelShape { rows: 5, cols: 5 }
        ));
    }

    #[test]
    fn test_uniform_plane_invariant_under_normalized_blur() {
        let plane = Array2::<u8>::from_elem((4, 4), 100);
        let out = convolve2d(&plane, &blur_kernel()).unwrap();
        assert!(out.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_edge_replication_not_zero_padding() {
        // With zero padding a uniform plane would darken at the border;
        // edge replication keeps it uniform.
        let plane = Array2::<u8>::from_elem((3, 3), 200);
        let out = convolve2d(&plane, &blur_kernel()).unwrap();
        assert_eq!(out[[0, 0]], 200);
        assert_eq!(out[[2, 2]], 200);
    }

    #[test]
    fn test_result_clamped_to_byte_range() {
        // A hard step drives the sharpen sum past the range in both
        // directions: -255 at the dark side, 510 at the bright side.
        let step = array![[0u8, 0, 255], [0, 0, 255], [0, 0, 255]];
        let out = convolve2d(&step, &sharpen_kernel()).unwrap();
        assert_eq!(out[[1, 1]], 0);
        assert_eq!(out[[1, 2]], 255);
    }

    #[test]
    fn test_identity_kernel() {
        let identity = array![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        let plane = array![[10u8, 20, 30], [40, 50, 60], [70, 80, 90]];
        let out = convolve2d(&plane, &identity).unwrap();
        assert_eq!(out, plane);
    }

    #[test]
    fn test_empty_plane_passes_through() {
        let plane = Array2::<u8>::zeros((0, 0));
        let out = convolve2d(&plane, &blur_kernel()).unwrap();
        assert_eq!(out.dim(), (0, 0));
    }
}
