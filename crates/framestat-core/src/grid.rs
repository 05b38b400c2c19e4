use std::fmt;

use ndarray::{s, Array2};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{FramestatError, Result};
use crate::roi::Roi;

/// A single-channel 8-bit image.
///
/// Transforms never mutate a grid in place; they return a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    /// Sample data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl PixelGrid {
    pub fn new(data: Array2<u8>) -> Result<Self> {
        let (h, w) = data.dim();
        if h == 0 || w == 0 {
            return Err(FramestatError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { data })
    }

    /// Build a grid by evaluating `f(row, col)` for every sample.
    pub fn from_fn(height: usize, width: usize, f: impl FnMut((usize, usize)) -> u8) -> Result<Self> {
        Self::new(Array2::from_shape_fn((height, width), f))
    }

    pub fn filled(height: usize, width: usize, value: u8) -> Result<Self> {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// (width, height)
    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Color image composed of separate channel grids.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGrid {
    pub red: PixelGrid,
    pub green: PixelGrid,
    pub blue: PixelGrid,
}

impl ColorGrid {
    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    /// Collapse to a single luminance channel (BT.601 weights).
    pub fn luminance(&self) -> PixelGrid {
        let mut data = Array2::<u8>::zeros(self.red.data.dim());
        ndarray::Zip::from(&mut data)
            .and(&self.red.data)
            .and(&self.green.data)
            .and(&self.blue.data)
            .for_each(|out, &r, &g, &b| {
                let y = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
                *out = y.round().clamp(0.0, 255.0) as u8;
            });
        PixelGrid { data }
    }

    pub fn channels(&self) -> [(&'static str, &PixelGrid); 3] {
        [
            ("red", &self.red),
            ("green", &self.green),
            ("blue", &self.blue),
        ]
    }
}

/// How an image file is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    /// Decode straight to a single luminance channel.
    #[default]
    Grayscale,
    /// Keep the file's own color channels.
    Native,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grayscale => write!(f, "Grayscale"),
            Self::Native => write!(f, "Native"),
        }
    }
}

/// A decoded image, either mono or color.
#[derive(Clone, Debug)]
pub enum SourceImage {
    Gray(PixelGrid),
    Color(ColorGrid),
}

impl SourceImage {
    /// The grid used for analysis. Color input is converted to luminance.
    pub fn to_gray(&self) -> PixelGrid {
        match self {
            Self::Gray(g) => g.clone(),
            Self::Color(cg) => cg.luminance(),
        }
    }

    pub fn into_gray(self) -> PixelGrid {
        match self {
            Self::Gray(g) => g,
            Self::Color(cg) => cg.luminance(),
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        match self {
            Self::Gray(g) => g.dims(),
            Self::Color(cg) => cg.red.dims(),
        }
    }
}

/// Copy the region covered by `roi` into a new grid.
pub fn crop(grid: &PixelGrid, roi: &Roi) -> Result<PixelGrid> {
    roi.check_within(grid.width(), grid.height())?;
    let view = grid.data.slice(s![
        roi.min_y as usize..roi.max_y as usize,
        roi.min_x as usize..roi.max_x as usize
    ]);
    Ok(PixelGrid {
        data: view.to_owned(),
    })
}
