use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::consts::{DEFAULT_BUTTERWORTH_ORDER, DEFAULT_STOPBAND2, MAX_SAMPLE};
use crate::error::{FramestatError, Result};
use crate::grid::PixelGrid;

/// Parameters of a circularly symmetric Butterworth low-pass filter.
///
/// Smaller `stopband2` attenuates more (stronger blur); a higher `order`
/// gives a sharper roll-off. Only [`new`](Self::new) and `Default` build one,
/// so every value in circulation has passed validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButterworthParams {
    /// Squared cutoff radius, in frequency-grid units.
    stopband2: f64,
    order: u32,
}

impl ButterworthParams {
    pub fn new(stopband2: f64, order: u32) -> Result<Self> {
        let params = Self { stopband2, order };
        params.validate()?;
        Ok(params)
    }

    pub fn stopband2(&self) -> f64 {
        self.stopband2
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn validate(&self) -> Result<()> {
        if !self.stopband2.is_finite() || self.stopband2 <= 0.0 {
            return Err(FramestatError::InvalidFilter(format!(
                "stopband2 must be a positive number, got {}",
                self.stopband2
            )));
        }
        if self.order == 0 {
            return Err(FramestatError::InvalidFilter(
                "order must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ButterworthParams {
    fn default() -> Self {
        Self {
            stopband2: DEFAULT_STOPBAND2,
            order: DEFAULT_BUTTERWORTH_ORDER,
        }
    }
}

/// Build the transfer function on a `height x width` frequency grid.
///
/// The grid is centered: index `(height/2, width/2)` is zero frequency. The
/// DC point uses `r² = 1` instead of 0, so its value is
/// `1 / (1 + (1/stopband2)^order)` rather than exactly 1.
///
/// Fails with `InvalidFilter` unless `stopband2` is positive and finite and
/// `order` is at least 1.
pub fn build_transfer_function(
    height: usize,
    width: usize,
    stopband2: f64,
    order: u32,
) -> Result<Array2<f64>> {
    let params = ButterworthParams::new(stopband2, order)?;
    Ok(transfer_function(height, width, &params))
}

fn transfer_function(height: usize, width: usize, params: &ButterworthParams) -> Array2<f64> {
    let ButterworthParams { stopband2, order } = *params;
    let p = (height / 2) as f64;
    let q = (width / 2) as f64;
    let order = order.min(i32::MAX as u32) as i32;

    Array2::from_shape_fn((height, width), |(i, j)| {
        let di = i as f64 - p;
        let dj = j as f64 - q;
        let mut r2 = di * di + dj * dj;
        if r2 == 0.0 {
            r2 = 1.0;
        }
        1.0 / (1.0 + (r2 / stopband2).powi(order))
    })
}

/// Smooth a grid with a Butterworth low-pass filter applied in the frequency
/// domain. Output has the input's dimensions, rounded and clipped to 8 bits.
pub fn butterworth_lowpass(grid: &PixelGrid, params: &ButterworthParams) -> PixelGrid {
    let (h, w) = grid.data.dim();
    debug!(
        width = w,
        height = h,
        stopband2 = params.stopband2,
        order = params.order,
        "Butterworth low-pass"
    );

    let spectrum = fft2d(&grid.data.mapv(|v| Complex::new(v as f64, 0.0)));
    let mut centered = fftshift(&spectrum);

    let transfer = transfer_function(h, w, params);
    ndarray::Zip::from(&mut centered)
        .and(&transfer)
        .for_each(|c, &t| *c *= t);

    let restored = ifft2d(&ifftshift(&centered));
    PixelGrid {
        data: restored.mapv(|c| c.norm().round().clamp(0.0, MAX_SAMPLE) as u8),
    }
}

/// Move the zero-frequency bin from `(0, 0)` to `(h/2, w/2)`.
pub fn fftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (h, w) = data.dim();
    roll(data, h / 2, w / 2)
}

/// Inverse of [`fftshift`], also for odd dimensions.
pub fn ifftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (h, w) = data.dim();
    roll(data, h - h / 2, w - w / 2)
}

/// Circularly shift rows down by `dr` and columns right by `dc`.
fn roll<T: Clone>(data: &Array2<T>, dr: usize, dc: usize) -> Array2<T> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        let src_row = (row + h - dr % h) % h;
        let src_col = (col + w - dc % w) % w;
        data[[src_row, src_col]].clone()
    })
}

// ---------------------------------------------------------------------------
// FFT utilities
// ---------------------------------------------------------------------------

fn fft2d(data: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.clone();

    // Row-wise FFT
    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| result[[row, c]]).collect();
        fft_row.process(&mut row_data);
        for col in 0..w {
            result[[row, col]] = row_data[col];
        }
    }

    // Column-wise FFT
    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| result[[r, col]]).collect();
        fft_col.process(&mut col_data);
        for row in 0..h {
            result[[row, col]] = col_data[row];
        }
    }

    result
}

fn ifft2d(data: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    // Column-wise IFFT
    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| work[[r, col]]).collect();
        ifft_col.process(&mut col_data);
        for row in 0..h {
            work[[row, col]] = col_data[row];
        }
    }

    // Row-wise IFFT
    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| work[[row, c]]).collect();
        ifft_row.process(&mut row_data);
        for col in 0..w {
            work[[row, col]] = row_data[col];
        }
    }

    let scale = 1.0 / (h * w) as f64;
    work.mapv_inplace(|c| c * scale);
    work
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_roundtrip_recovers_input() {
        let data = Array2::from_shape_fn((5, 6), |(r, c)| Complex::new((r * 6 + c) as f64, 0.0));
        let back = ifft2d(&fft2d(&data));
        for (a, b) in data.iter().zip(back.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }
}
