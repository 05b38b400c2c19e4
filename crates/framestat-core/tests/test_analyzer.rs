mod common;

use approx::assert_relative_eq;

use framestat_core::analyzer::SingleImageAnalyzer;
use framestat_core::config::SamplingConfig;
use framestat_core::error::FramestatError;
use framestat_core::filters::butterworth::ButterworthParams;
use framestat_core::grid::{ColorMode, PixelGrid};
use framestat_core::roi::Roi;

use common::{ramp_grid, write_png_folder};

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = SingleImageAnalyzer::open(&dir.path().join("nope.png"), ColorMode::Grayscale)
        .unwrap_err();
    assert!(matches!(err, FramestatError::Decode { .. }));
}

#[test]
fn test_open_reads_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let grid = ramp_grid(6, 8, 30);
    let paths = write_png_folder(dir.path(), &[grid.clone()]);

    let analyzer = SingleImageAnalyzer::open(&paths[0], ColorMode::Grayscale).unwrap();
    assert_eq!(analyzer.grid(), &grid);
    assert_eq!(analyzer.path(), Some(paths[0].as_path()));
}

#[test]
fn test_center_point_of_constant_image() {
    let analyzer = SingleImageAnalyzer::from_grid(PixelGrid::filled(20, 30, 90).unwrap());
    assert_relative_eq!(analyzer.center_point(), 90.0);
    assert_relative_eq!(analyzer.average_value(), 90.0);
}

#[test]
fn test_center_point_on_tiny_image() {
    // The block anchor saturates at 0 and the block is truncated.
    let analyzer = SingleImageAnalyzer::from_grid(PixelGrid::filled(2, 3, 50).unwrap());
    assert_relative_eq!(analyzer.center_point(), 50.0);
}

#[test]
fn test_center_point_samples_middle() {
    // Left half dark, right half bright; the center block straddles the edge.
    let grid = PixelGrid::from_fn(32, 32, |(_, c)| if c < 16 { 0 } else { 200 }).unwrap();
    let center = SingleImageAnalyzer::from_grid(grid).center_point();
    assert!(center > 60.0 && center < 140.0, "center = {center}");
}

#[test]
fn test_apply_roi_crops() {
    let analyzer = SingleImageAnalyzer::from_grid(ramp_grid(10, 10, 10));
    let cropped = analyzer
        .apply_roi(Some(&Roi::new(2, 3, 6, 8).unwrap()))
        .unwrap();
    assert_eq!(cropped.grid().dims(), (4, 5));
    assert_eq!(cropped.grid().data[[0, 0]], 20);

    let same = analyzer.apply_roi(None).unwrap();
    assert_eq!(same.grid(), analyzer.grid());
}

#[test]
fn test_apply_roi_outside_image_fails() {
    let analyzer = SingleImageAnalyzer::from_grid(ramp_grid(10, 10, 10));
    let err = analyzer
        .apply_roi(Some(&Roi::new(0, 0, 11, 4).unwrap()))
        .unwrap_err();
    assert!(matches!(err, FramestatError::InvalidRoi(_)));
}

#[test]
fn test_smoothing_leaves_original_untouched() {
    let grid = common::checkerboard(16, 16);
    let analyzer = SingleImageAnalyzer::from_grid(grid.clone());
    let smoothed = analyzer.butterworth_smooth(&ButterworthParams::new(4.0, 2).unwrap());
    assert_eq!(analyzer.grid(), &grid);
    assert_ne!(smoothed.grid(), &grid);
}

#[test]
fn test_column_and_row_profiles() {
    let analyzer = SingleImageAnalyzer::from_grid(ramp_grid(16, 16, 10));

    let column = analyzer.column_profile(4, 4, 4).unwrap();
    assert_eq!(column, vec![55.0; 4]);

    let row = analyzer.row_profile(0, 4, 4).unwrap();
    assert_eq!(row, vec![15.0, 55.0, 95.0, 135.0]);
}

#[test]
fn test_profile_arguments_checked() {
    let analyzer = SingleImageAnalyzer::from_grid(ramp_grid(16, 16, 10));
    assert!(matches!(
        analyzer.column_profile(16, 4, 4),
        Err(FramestatError::InvalidSampling(_))
    ));
    assert!(analyzer.row_profile(0, 0, 4).is_err());
    assert!(analyzer.row_profile(0, 4, 0).is_err());
}

#[test]
fn test_analyze_collects_all_metrics() {
    let analyzer = SingleImageAnalyzer::from_grid(ramp_grid(16, 16, 10));
    let sampling = SamplingConfig {
        column_x: 4,
        row_y: 0,
        sample_count: 4,
        block_size: 4,
    };
    let result = analyzer.analyze(&sampling).unwrap();
    assert_relative_eq!(result.average_value, 75.0);
    assert_relative_eq!(result.entropy, 4.0, epsilon = 1e-12);
    assert_eq!(result.column_profile.len(), 4);
    assert_eq!(result.row_profile, vec![15.0, 55.0, 95.0, 135.0]);
}
