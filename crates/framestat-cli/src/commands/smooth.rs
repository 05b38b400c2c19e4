use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framestat_core::analyzer::SingleImageAnalyzer;
use framestat_core::consts::{DEFAULT_BUTTERWORTH_ORDER, DEFAULT_STOPBAND2};
use framestat_core::filters::butterworth::ButterworthParams;
use framestat_core::grid::ColorMode;
use framestat_core::io::image_io::save_image;
use framestat_core::roi::Roi;

#[derive(Args)]
pub struct SmoothArgs {
    /// Input image
    pub file: PathBuf,

    /// Crop to minX,minY,maxX,maxY before smoothing
    #[arg(long)]
    pub roi: Option<Roi>,

    /// Squared cutoff radius of the low-pass filter
    #[arg(long, default_value_t = DEFAULT_STOPBAND2)]
    pub stopband2: f64,

    /// Filter order
    #[arg(long, default_value_t = DEFAULT_BUTTERWORTH_ORDER)]
    pub order: u32,

    /// Output file path (format from extension)
    #[arg(short, long, default_value = "smoothed.png")]
    pub output: PathBuf,
}

pub fn run(args: &SmoothArgs) -> Result<()> {
    let params = ButterworthParams::new(args.stopband2, args.order)?;
    let analyzer = SingleImageAnalyzer::open(&args.file, ColorMode::Grayscale)?
        .apply_roi(args.roi.as_ref())
        .context("ROI does not fit the image")?
        .butterworth_smooth(&params);

    save_image(analyzer.grid(), &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let (w, h) = analyzer.grid().dims();
    println!("Smoothed {}x{} image saved to {}", w, h, args.output.display());
    Ok(())
}
