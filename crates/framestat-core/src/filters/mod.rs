pub mod butterworth;
pub mod gaussian_blur;
