/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum image count to use image-level Rayon parallelism in batch aggregates.
pub const PARALLEL_IMAGE_THRESHOLD: usize = 4;

/// File suffixes (matched case-insensitively) treated as decodable images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["bmp", "jpg", "jpeg", "png"];

/// Default squared cutoff radius of the Butterworth low-pass filter.
pub const DEFAULT_STOPBAND2: f64 = 2500.0;

/// Default Butterworth filter order.
pub const DEFAULT_BUTTERWORTH_ORDER: u32 = 3;

/// Side length of the block averaged by point sampling.
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Default number of evenly spaced positions in a row/column profile.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

/// Gaussian kernel side length used to denoise before center-point sampling.
pub const CENTER_BLUR_KERNEL_SIZE: usize = 9;

/// Gaussian sigma used to denoise before center-point sampling.
pub const CENTER_BLUR_SIGMA: f32 = 3.0;

/// Offset subtracted from the image center so the sampling block straddles it.
pub const CENTER_BLOCK_OFFSET: usize = 2;

/// Number of intensity bins for 8-bit histograms.
pub const HISTOGRAM_BINS: usize = 256;

/// Largest representable 8-bit sample value.
pub const MAX_SAMPLE: f64 = 255.0;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;
