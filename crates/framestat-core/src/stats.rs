use ndarray::s;

use crate::consts::HISTOGRAM_BINS;
use crate::grid::PixelGrid;

/// Extreme sample values and where they first occur (row-major scan).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: u8,
    pub max: u8,
    /// (x, y) of the first minimum.
    pub min_loc: (usize, usize),
    /// (x, y) of the first maximum.
    pub max_loc: (usize, usize),
}

/// Basic gray-level check of an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayLevelSummary {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub std_dev: f64,
}

/// Arithmetic mean of all samples.
pub fn mean(grid: &PixelGrid) -> f64 {
    let sum: u64 = grid.data.iter().map(|&v| v as u64).sum();
    sum as f64 / grid.data.len() as f64
}

/// Population mean and standard deviation.
pub fn mean_std_dev(grid: &PixelGrid) -> (f64, f64) {
    let m = mean(grid);
    let var = grid
        .data
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / grid.data.len() as f64;
    (m, var.sqrt())
}

pub fn min_max(grid: &PixelGrid) -> MinMax {
    let first = grid.data[[0, 0]];
    let mut result = MinMax {
        min: first,
        max: first,
        min_loc: (0, 0),
        max_loc: (0, 0),
    };

    for ((row, col), &v) in grid.data.indexed_iter() {
        if v < result.min {
            result.min = v;
            result.min_loc = (col, row);
        }
        if v > result.max {
            result.max = v;
            result.max_loc = (col, row);
        }
    }

    result
}

pub fn gray_level_summary(grid: &PixelGrid) -> GrayLevelSummary {
    let mm = min_max(grid);
    let (mean, std_dev) = mean_std_dev(grid);
    GrayLevelSummary {
        min: mm.min,
        max: mm.max,
        mean,
        std_dev,
    }
}

/// Mean of the `block x block` square whose top-left corner is column `x`,
/// row `y`.
///
/// No bounds are enforced: a block running past the image edge is truncated
/// to the part inside the image, and a block lying entirely outside yields
/// `NaN`.
pub fn sample_block_average(grid: &PixelGrid, x: usize, y: usize, block: usize) -> f64 {
    let (h, w) = grid.data.dim();
    let row_end = y.saturating_add(block).min(h);
    let col_end = x.saturating_add(block).min(w);
    if y >= row_end || x >= col_end {
        return f64::NAN;
    }

    let view = grid.data.slice(s![y..row_end, x..col_end]);
    let sum: u64 = view.iter().map(|&v| v as u64).sum();
    sum as f64 / view.len() as f64
}

/// 256-bin intensity histogram.
pub fn histogram(grid: &PixelGrid) -> [u64; HISTOGRAM_BINS] {
    let mut bins = [0u64; HISTOGRAM_BINS];
    for &v in grid.data.iter() {
        bins[v as usize] += 1;
    }
    bins
}

/// Shannon entropy of the intensity histogram, in bits.
pub fn entropy(grid: &PixelGrid) -> f64 {
    let bins = histogram(grid);
    let total = grid.data.len() as f64;
    let h = bins
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>();
    // -0.0 for a constant image
    h.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_extremes_located_at_origin() {
        let grid = PixelGrid::filled(3, 3, 255).unwrap();
        let mm = min_max(&grid);
        assert_eq!((mm.min, mm.max), (255, 255));
        assert_eq!(mm.min_loc, (0, 0));
        assert_eq!(mm.max_loc, (0, 0));

        let grid = PixelGrid::filled(3, 3, 0).unwrap();
        let mm = min_max(&grid);
        assert_eq!((mm.min, mm.max), (0, 0));
        assert_eq!(mm.min_loc, (0, 0));
        assert_eq!(mm.max_loc, (0, 0));
    }

    #[test]
    fn test_block_outside_is_nan() {
        let grid = PixelGrid::filled(4, 4, 10).unwrap();
        assert!(sample_block_average(&grid, 4, 0, 4).is_nan());
        assert!(sample_block_average(&grid, 0, 9, 4).is_nan());
    }
}
