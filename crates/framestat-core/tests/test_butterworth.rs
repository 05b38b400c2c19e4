mod common;

use approx::assert_relative_eq;

use framestat_core::error::FramestatError;
use framestat_core::filters::butterworth::{
    build_transfer_function, butterworth_lowpass, fftshift, ifftshift, ButterworthParams,
};
use framestat_core::grid::PixelGrid;
use ndarray::Array2;

use common::{checkerboard, ramp_grid};

#[test]
fn test_transfer_function_dc_value() {
    let tf = build_transfer_function(8, 10, 4.0, 2).unwrap();
    assert_relative_eq!(tf[[4, 5]], 1.0 / (1.0 + (1.0f64 / 4.0).powi(2)));
    // Neighbours of the center also sit at r² = 1.
    assert_relative_eq!(tf[[4, 6]], tf[[4, 5]]);
    assert_relative_eq!(tf[[3, 5]], tf[[4, 5]]);
}

#[test]
fn test_transfer_function_decreases_with_radius() {
    let tf = build_transfer_function(16, 16, 9.0, 3).unwrap();
    let along_row: Vec<f64> = (8..16).map(|c| tf[[8, c]]).collect();
    for pair in along_row.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    // r² == stopband2 gives exactly one half.
    assert_relative_eq!(tf[[8, 11]], 0.5);
}

#[test]
fn test_output_keeps_dimensions() {
    for (h, w) in [(16, 16), (7, 5), (1, 9)] {
        let grid = ramp_grid(h, w, 20);
        let out = butterworth_lowpass(&grid, &ButterworthParams::default());
        assert_eq!(out.dims(), grid.dims(), "{h}x{w}");
    }
}

#[test]
fn test_constant_image_scaled_by_dc_gain() {
    let grid = PixelGrid::filled(12, 12, 200).unwrap();
    let params = ButterworthParams::new(1.0, 1).unwrap();
    let out = butterworth_lowpass(&grid, &params);
    assert!(out.data.iter().all(|&v| v == 100));
}

#[test]
fn test_wide_stopband_is_near_identity() {
    let grid = ramp_grid(16, 16, 15);
    let params = ButterworthParams::new(1e12, 3).unwrap();
    let out = butterworth_lowpass(&grid, &params);
    assert_eq!(out, grid);
}

#[test]
fn test_checkerboard_is_flattened() {
    let grid = checkerboard(16, 16);
    let params = ButterworthParams::new(4.0, 2).unwrap();
    let out = butterworth_lowpass(&grid, &params);
    assert!(out.data.iter().all(|&v| v == 120));
}

#[test]
fn test_repeated_filtering_compounds() {
    let params = ButterworthParams::new(4.0, 2).unwrap();
    let once = butterworth_lowpass(&checkerboard(16, 16), &params);
    let twice = butterworth_lowpass(&once, &params);
    assert!(twice.data.iter().all(|&v| v == 113));
}

#[test]
fn test_invalid_params_rejected() {
    assert!(matches!(
        ButterworthParams::new(0.0, 3),
        Err(FramestatError::InvalidFilter(_))
    ));
    assert!(ButterworthParams::new(-5.0, 3).is_err());
    assert!(ButterworthParams::new(f64::NAN, 3).is_err());
    assert!(ButterworthParams::new(2500.0, 0).is_err());
}

#[test]
fn test_transfer_function_rejects_invalid_params() {
    for (stopband2, order) in [(0.0, 3), (-1.0, 1), (f64::INFINITY, 2), (9.0, 0)] {
        assert!(
            matches!(
                build_transfer_function(4, 4, stopband2, order),
                Err(FramestatError::InvalidFilter(_))
            ),
            "stopband2={stopband2} order={order}"
        );
    }
}

#[test]
fn test_params_keep_validated_values() {
    let params = ButterworthParams::new(400.0, 2).unwrap();
    assert_eq!(params.stopband2(), 400.0);
    assert_eq!(params.order(), 2);
    params.validate().unwrap();
    ButterworthParams::default().validate().unwrap();
}

#[test]
fn test_fftshift_moves_origin_to_center() {
    let data = Array2::from_shape_fn((5, 4), |(r, c)| r * 10 + c);
    let shifted = fftshift(&data);
    assert_eq!(shifted[[2, 2]], 0);
    assert_eq!(shifted[[0, 0]], 32);
}

#[test]
fn test_ifftshift_inverts_fftshift_for_odd_and_even_sizes() {
    for (h, w) in [(4, 4), (5, 7), (6, 3), (1, 1)] {
        let data = Array2::from_shape_fn((h, w), |(r, c)| r * 100 + c);
        assert_eq!(ifftshift(&fftshift(&data)), data, "{h}x{w}");
    }
}
