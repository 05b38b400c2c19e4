use std::path::Path;

use image::{GrayImage, ImageFormat};

use crate::error::{FramestatError, Result};
use crate::grid::{ColorGrid, ColorMode, PixelGrid, SourceImage};

fn decode(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|source| FramestatError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn plane(w: u32, h: u32, f: impl Fn(u32, u32) -> u8) -> Result<PixelGrid> {
    PixelGrid::from_fn(h as usize, w as usize, |(row, col)| {
        f(col as u32, row as u32)
    })
}

/// Decode an image file in the requested color mode.
pub fn load_image(path: &Path, mode: ColorMode) -> Result<SourceImage> {
    let img = decode(path)?;
    match mode {
        ColorMode::Grayscale => {
            let gray = img.to_luma8();
            let (w, h) = gray.dimensions();
            Ok(SourceImage::Gray(plane(w, h, |x, y| gray.get_pixel(x, y).0[0])?))
        }
        ColorMode::Native => {
            if !img.color().has_color() {
                let gray = img.to_luma8();
                let (w, h) = gray.dimensions();
                return Ok(SourceImage::Gray(plane(w, h, |x, y| {
                    gray.get_pixel(x, y).0[0]
                })?));
            }
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            Ok(SourceImage::Color(ColorGrid {
                red: plane(w, h, |x, y| rgb.get_pixel(x, y).0[0])?,
                green: plane(w, h, |x, y| rgb.get_pixel(x, y).0[1])?,
                blue: plane(w, h, |x, y| rgb.get_pixel(x, y).0[2])?,
            }))
        }
    }
}

/// Decode an image file straight to a single gray channel.
pub fn load_gray(path: &Path) -> Result<PixelGrid> {
    Ok(load_image(path, ColorMode::Grayscale)?.into_gray())
}

fn to_gray_image(grid: &PixelGrid) -> Result<GrayImage> {
    let (w, h) = grid.dims();
    let pixels: Vec<u8> = grid.data.iter().copied().collect();
    GrayImage::from_raw(w as u32, h as u32, pixels).ok_or(FramestatError::InvalidDimensions {
        width: w,
        height: h,
    })
}

/// Save a grid as 8-bit grayscale PNG.
pub fn save_png(grid: &PixelGrid, path: &Path) -> Result<()> {
    to_gray_image(grid)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a grid, choosing the format from the file extension (PNG by default).
pub fn save_image(grid: &PixelGrid, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let format = match ext.as_deref() {
        Some("bmp") => ImageFormat::Bmp,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    to_gray_image(grid)?.save_with_format(path, format)?;
    Ok(())
}
