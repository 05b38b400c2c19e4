use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::grid::PixelGrid;

/// Blur a grid with a separable `kernel_size x kernel_size` Gaussian kernel.
///
/// Borders replicate the edge samples. The result is rounded back to 8 bits.
/// An even `kernel_size` is widened to the next odd length.
pub fn gaussian_blur(grid: &PixelGrid, kernel_size: usize, sigma: f32) -> PixelGrid {
    let data = grid.data.mapv(|v| v as f32);
    let blurred = gaussian_blur_array(&data, kernel_size, sigma);
    PixelGrid {
        data: blurred.mapv(|v| v.round().clamp(0.0, 255.0) as u8),
    }
}

/// Apply Gaussian blur to a raw array.
pub fn gaussian_blur_array(data: &Array2<f32>, kernel_size: usize, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(kernel_size, sigma);
    let row_pass = convolve(data, &kernel, Axis::Rows);
    convolve(&row_pass, &kernel, Axis::Cols)
}

fn make_gaussian_kernel(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let radius = kernel_size / 2;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

#[derive(Clone, Copy)]
enum Axis {
    /// Convolve along each row (horizontal pass).
    Rows,
    /// Convolve along each column (vertical pass).
    Cols,
}

fn convolve_at(data: &Array2<f32>, kernel: &[f32], axis: Axis, row: usize, col: usize) -> f32 {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;
    let mut sum = 0.0f32;
    for (ki, &kv) in kernel.iter().enumerate() {
        let offset = ki as isize - radius;
        let sample = match axis {
            Axis::Rows => {
                let src_col = (col as isize + offset).clamp(0, w as isize - 1) as usize;
                data[[row, src_col]]
            }
            Axis::Cols => {
                let src_row = (row as isize + offset).clamp(0, h as isize - 1) as usize;
                data[[src_row, col]]
            }
        };
        sum += sample * kv;
    }
    sum
}

fn convolve(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| {
                (0..w)
                    .map(|col| convolve_at(data, kernel, axis, row, col))
                    .collect()
            })
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| convolve_at(data, kernel, axis, row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let kernel = make_gaussian_kernel(9, 3.0);
        assert_eq!(kernel.len(), 9);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..4 {
            assert!((kernel[i] - kernel[8 - i]).abs() < 1e-7);
        }
        assert!(kernel[4] > kernel[3]);
    }

    #[test]
    fn test_even_kernel_size_widened() {
        assert_eq!(make_gaussian_kernel(4, 1.0).len(), 5);
    }
}
