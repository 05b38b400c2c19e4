use std::path::{Path, PathBuf};

use crate::config::SamplingConfig;
use crate::consts::{
    CENTER_BLOCK_OFFSET, CENTER_BLUR_KERNEL_SIZE, CENTER_BLUR_SIGMA, DEFAULT_BLOCK_SIZE,
};
use crate::error::{FramestatError, Result};
use crate::filters::butterworth::{butterworth_lowpass, ButterworthParams};
use crate::filters::gaussian_blur::gaussian_blur;
use crate::grid::{crop, ColorMode, PixelGrid};
use crate::io::image_io::load_image;
use crate::roi::Roi;
use crate::stats::{self, GrayLevelSummary, MinMax};

/// Scalar and profile outputs for one image. Recomputed on every request.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub average_value: f64,
    pub center_point_value: f64,
    pub entropy: f64,
    /// Block averages down the sampled column, one per sampled row.
    pub column_profile: Vec<f64>,
    /// Block averages along the sampled row, one per sampled column.
    pub row_profile: Vec<f64>,
}

/// Statistics over a single image, optionally after cropping and smoothing.
#[derive(Clone, Debug)]
pub struct SingleImageAnalyzer {
    grid: PixelGrid,
    path: Option<PathBuf>,
}

impl SingleImageAnalyzer {
    /// Decode `path`. Fails with a decode error if the file cannot be read;
    /// there is no fallback image.
    pub fn open(path: &Path, mode: ColorMode) -> Result<Self> {
        let grid = load_image(path, mode)?.into_gray();
        Ok(Self {
            grid,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_grid(grid: PixelGrid) -> Self {
        Self { grid, path: None }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn derive(&self, grid: PixelGrid) -> Self {
        Self {
            grid,
            path: self.path.clone(),
        }
    }

    pub fn average_value(&self) -> f64 {
        stats::mean(&self.grid)
    }

    pub fn mean_and_std_dev(&self) -> (f64, f64) {
        stats::mean_std_dev(&self.grid)
    }

    pub fn min_max(&self) -> MinMax {
        stats::min_max(&self.grid)
    }

    pub fn gray_level_summary(&self) -> GrayLevelSummary {
        stats::gray_level_summary(&self.grid)
    }

    /// Mean of the `block x block` square anchored at column `x`, row `y`.
    /// See [`stats::sample_block_average`] for edge behavior.
    pub fn sample_block_average(&self, x: usize, y: usize, block: usize) -> f64 {
        stats::sample_block_average(&self.grid, x, y, block)
    }

    /// Approximately centered 4x4 block average after a 9x9 Gaussian
    /// (sigma 3) denoising pass.
    pub fn center_point(&self) -> f64 {
        let smoothed = gaussian_blur(&self.grid, CENTER_BLUR_KERNEL_SIZE, CENTER_BLUR_SIGMA);
        let row = (self.grid.height() / 2).saturating_sub(CENTER_BLOCK_OFFSET);
        let col = (self.grid.width() / 2).saturating_sub(CENTER_BLOCK_OFFSET);
        stats::sample_block_average(&smoothed, col, row, DEFAULT_BLOCK_SIZE)
    }

    pub fn entropy(&self) -> f64 {
        stats::entropy(&self.grid)
    }

    /// Analyzer over the cropped region, or an unchanged copy when `roi` is
    /// `None`.
    pub fn apply_roi(&self, roi: Option<&Roi>) -> Result<Self> {
        match roi {
            Some(roi) => Ok(self.derive(crop(&self.grid, roi)?)),
            None => Ok(self.clone()),
        }
    }

    pub fn butterworth_smooth(&self, params: &ButterworthParams) -> Self {
        self.derive(butterworth_lowpass(&self.grid, params))
    }

    /// Block averages at `sample_count` evenly spaced rows of column `x`.
    pub fn column_profile(&self, x: usize, sample_count: usize, block: usize) -> Result<Vec<f64>> {
        check_profile(x, self.grid.width(), "column", sample_count, block)?;
        Ok(sample_positions(self.grid.height(), sample_count)
            .map(|y| self.sample_block_average(x, y, block))
            .collect())
    }

    /// Block averages at `sample_count` evenly spaced columns of row `y`.
    pub fn row_profile(&self, y: usize, sample_count: usize, block: usize) -> Result<Vec<f64>> {
        check_profile(y, self.grid.height(), "row", sample_count, block)?;
        Ok(sample_positions(self.grid.width(), sample_count)
            .map(|x| self.sample_block_average(x, y, block))
            .collect())
    }

    pub fn analyze(&self, sampling: &SamplingConfig) -> Result<AnalysisResult> {
        sampling.validate()?;
        Ok(AnalysisResult {
            average_value: self.average_value(),
            center_point_value: self.center_point(),
            entropy: self.entropy(),
            column_profile: self.column_profile(
                sampling.column_x,
                sampling.sample_count,
                sampling.block_size,
            )?,
            row_profile: self.row_profile(
                sampling.row_y,
                sampling.sample_count,
                sampling.block_size,
            )?,
        })
    }
}

/// Positions `i * (extent / count)` for `i in 0..count`.
pub(crate) fn sample_positions(extent: usize, count: usize) -> impl Iterator<Item = usize> {
    let interval = extent / count.max(1);
    (0..count).map(move |i| i * interval)
}

pub(crate) fn check_profile(
    fixed: usize,
    limit: usize,
    axis: &str,
    sample_count: usize,
    block: usize,
) -> Result<()> {
    if sample_count == 0 {
        return Err(FramestatError::InvalidSampling(
            "sample count must be at least 1".into(),
        ));
    }
    if block == 0 {
        return Err(FramestatError::InvalidSampling(
            "block size must be at least 1".into(),
        ));
    }
    if fixed >= limit {
        return Err(FramestatError::InvalidSampling(format!(
            "{axis} {fixed} is outside the image (size {limit})"
        )));
    }
    Ok(())
}
