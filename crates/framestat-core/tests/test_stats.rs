mod common;

use approx::assert_relative_eq;

use framestat_core::filters::gaussian_blur::gaussian_blur;
use framestat_core::grid::PixelGrid;
use framestat_core::stats::{
    entropy, gray_level_summary, histogram, mean, mean_std_dev, min_max, sample_block_average,
};

use common::ramp_grid;

fn all_levels() -> PixelGrid {
    PixelGrid::from_fn(16, 16, |(r, c)| (r * 16 + c) as u8).unwrap()
}

#[test]
fn test_entropy_of_constant_image_is_zero() {
    let grid = PixelGrid::filled(10, 10, 77).unwrap();
    assert_eq!(entropy(&grid), 0.0);
    assert!(entropy(&grid).is_sign_positive());
}

#[test]
fn test_entropy_of_uniform_levels_is_eight_bits() {
    assert_relative_eq!(entropy(&all_levels()), 8.0, epsilon = 1e-12);
}

#[test]
fn test_entropy_of_two_levels_is_one_bit() {
    let grid = PixelGrid::from_fn(4, 4, |(r, _)| if r < 2 { 0 } else { 255 }).unwrap();
    assert_relative_eq!(entropy(&grid), 1.0, epsilon = 1e-12);
}

#[test]
fn test_histogram_counts_every_sample() {
    let bins = histogram(&all_levels());
    assert!(bins.iter().all(|&count| count == 1));
}

#[test]
fn test_mean_and_std_dev() {
    let (m, sd) = mean_std_dev(&all_levels());
    assert_relative_eq!(m, 127.5);
    assert_relative_eq!(sd, ((256.0f64 * 256.0 - 1.0) / 12.0).sqrt(), epsilon = 1e-9);

    let flat = PixelGrid::filled(3, 5, 42).unwrap();
    assert_relative_eq!(mean(&flat), 42.0);
    assert_relative_eq!(mean_std_dev(&flat).1, 0.0);
}

#[test]
fn test_min_max_reports_first_locations() {
    let mut grid = ramp_grid(4, 6, 10);
    grid.data[[2, 3]] = 250;
    grid.data[[3, 5]] = 250;
    let mm = min_max(&grid);
    assert_eq!(mm.min, 0);
    assert_eq!(mm.min_loc, (0, 0));
    assert_eq!(mm.max, 250);
    assert_eq!(mm.max_loc, (3, 2));
}

#[test]
fn test_gray_level_summary() {
    let summary = gray_level_summary(&all_levels());
    assert_eq!((summary.min, summary.max), (0, 255));
    assert_relative_eq!(summary.mean, 127.5);
    assert!(summary.std_dev > 73.0 && summary.std_dev < 74.0);
}

#[test]
fn test_block_average() {
    let grid = ramp_grid(8, 8, 10);
    // Columns 2..6 hold 20, 30, 40, 50.
    assert_relative_eq!(sample_block_average(&grid, 2, 0, 4), 35.0);
    // Truncated at the right edge: columns 6..8 hold 60, 70.
    assert_relative_eq!(sample_block_average(&grid, 6, 6, 4), 65.0);
    assert_relative_eq!(sample_block_average(&grid, 3, 3, 1), 30.0);
}

#[test]
fn test_gaussian_blur_preserves_constant() {
    let grid = PixelGrid::filled(12, 9, 100).unwrap();
    assert_eq!(gaussian_blur(&grid, 9, 3.0), grid);
}

#[test]
fn test_gaussian_blur_spreads_impulse() {
    let mut grid = PixelGrid::filled(15, 15, 0).unwrap();
    grid.data[[7, 7]] = 255;
    let blurred = gaussian_blur(&grid, 5, 1.0);
    assert!(blurred.data[[7, 7]] < 255);
    assert!(blurred.data[[7, 8]] > 0);
    assert_eq!(blurred.data[[7, 8]], blurred.data[[7, 6]]);
    assert_eq!(blurred.data[[0, 0]], 0);
}
