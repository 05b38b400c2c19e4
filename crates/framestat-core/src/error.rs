use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FramestatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid ROI: {0}")]
    InvalidRoi(String),

    #[error("Invalid filter parameters: {0}")]
    InvalidFilter(String),

    #[error("Invalid sampling parameters: {0}")]
    InvalidSampling(String),

    #[error(
        "Image #{index} ({}) is {}x{} after cropping, expected {}x{}",
        path.display(), found.0, found.1, expected.0, expected.1
    )]
    DimensionMismatch {
        /// Position in the folder enumeration, same numbering as `LoadFailure::index`.
        index: usize,
        path: PathBuf,
        /// (width, height) of the first image in the batch.
        expected: (usize, usize),
        /// (width, height) of the offending image.
        found: (usize, usize),
    },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FramestatError>;
