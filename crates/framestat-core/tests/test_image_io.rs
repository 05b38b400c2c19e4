mod common;

use image::{GrayImage, Luma, Rgb, RgbImage};

use framestat_core::error::FramestatError;
use framestat_core::grid::{ColorMode, SourceImage};
use framestat_core::io::image_io::{load_gray, load_image, save_image, save_png};

use common::ramp_grid;

#[test]
fn test_png_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.png");
    let grid = ramp_grid(5, 9, 25);

    save_png(&grid, &path).unwrap();
    assert_eq!(load_gray(&path).unwrap(), grid);
}

#[test]
fn test_bmp_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.BMP");
    let grid = ramp_grid(4, 4, 40);

    save_image(&grid, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"BM");
    assert_eq!(load_gray(&path).unwrap().dims(), (4, 4));
}

#[test]
fn test_native_mode_keeps_channels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.png");
    let mut img = RgbImage::new(3, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(2, 1, Rgb([0, 0, 255]));
    img.save(&path).unwrap();

    let loaded = load_image(&path, ColorMode::Native).unwrap();
    let SourceImage::Color(color) = &loaded else {
        panic!("expected a color image");
    };
    assert_eq!(color.red.data[[0, 0]], 255);
    assert_eq!(color.blue.data[[1, 2]], 255);
    assert_eq!(loaded.dims(), (3, 2));

    let gray = loaded.to_gray();
    assert_eq!(gray.data[[0, 0]], 76);
    assert_eq!(gray.data[[1, 2]], 29);
}

#[test]
fn test_native_mode_on_gray_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    GrayImage::from_pixel(4, 3, Luma([128])).save(&path).unwrap();

    let loaded = load_image(&path, ColorMode::Native).unwrap();
    assert!(matches!(loaded, SourceImage::Gray(_)));
}

#[test]
fn test_corrupt_file_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"\x00\x01garbage").unwrap();

    match load_gray(&path) {
        Err(FramestatError::Decode { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected: {other:?}"),
    }
}
