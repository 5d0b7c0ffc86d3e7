//! The fixed 3x3 kernels used by the filter pipeline

use ndarray::{array, Array2};

/// Normalized Gaussian-like blur kernel (weights sum to 1)
pub fn blur_kernel() -> Array2<f64> {
    array![[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]] / 16.0
}

/// Sharpen kernel: center 5, edge neighbors -1, corners 0
pub fn sharpen_kernel() -> Array2<f64> {
    array![[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]]
}

/// Sobel horizontal gradient operator (not normalized)
pub fn sobel_x_kernel() -> Array2<f64> {
    array![[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]
}

/// Sobel vertical gradient operator (not normalized)
pub fn sobel_y_kernel() -> Array2<f64> {
    array![[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]]
}
