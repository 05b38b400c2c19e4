#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ndarray::Array2;

use framestat_core::grid::PixelGrid;
use framestat_core::io::image_io::save_png;

/// Horizontal ramp: every row reads `0, step, 2*step, ...` (saturating).
pub fn ramp_grid(height: usize, width: usize, step: u8) -> PixelGrid {
    PixelGrid::from_fn(height, width, |(_, col)| {
        (col as u32 * step as u32).min(255) as u8
    })
    .unwrap()
}

/// Alternating 0/255 checkerboard.
pub fn checkerboard(height: usize, width: usize) -> PixelGrid {
    PixelGrid::new(Array2::from_shape_fn((height, width), |(r, c)| {
        if (r + c) % 2 == 0 {
            0
        } else {
            255
        }
    }))
    .unwrap()
}

/// Write each grid as `frame_NN.png` into `dir`, returning the paths.
pub fn write_png_folder(dir: &Path, grids: &[PixelGrid]) -> Vec<PathBuf> {
    grids
        .iter()
        .enumerate()
        .map(|(i, grid)| {
            let path = dir.join(format!("frame_{i:02}.png"));
            save_png(grid, &path).unwrap();
            path
        })
        .collect()
}
