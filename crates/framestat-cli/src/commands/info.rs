use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use framestat_core::analyzer::SingleImageAnalyzer;
use framestat_core::grid::{PixelGrid, SourceImage};
use framestat_core::io::image_io::load_image;
use framestat_core::roi::Roi;

use super::ColorModeArg;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Decode as grayscale or keep the file's channels
    #[arg(long, value_enum, default_value = "grayscale")]
    pub color: ColorModeArg,

    /// Restrict statistics to minX,minY,maxX,maxY
    #[arg(long)]
    pub roi: Option<Roi>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file, args.color.into())?;
    let (w, h) = image.dims();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", w, h);
    if let Some(roi) = args.roi {
        println!("ROI:         {} ({}x{})", roi, roi.width(), roi.height());
    }

    match &image {
        SourceImage::Gray(grid) => print_channel("Gray", grid, args.roi.as_ref())?,
        SourceImage::Color(color) => {
            for (name, grid) in color.channels() {
                print_channel(name, grid, args.roi.as_ref())?;
            }
            print_channel("Luminance", &color.luminance(), args.roi.as_ref())?;
        }
    }

    Ok(())
}

fn print_channel(name: &str, grid: &PixelGrid, roi: Option<&Roi>) -> Result<()> {
    let analyzer = SingleImageAnalyzer::from_grid(grid.clone()).apply_roi(roi)?;
    let mm = analyzer.min_max();
    let (mean, std_dev) = analyzer.mean_and_std_dev();

    println!();
    println!("[{}]", name);
    println!("  Min:       {} at ({}, {})", mm.min, mm.min_loc.0, mm.min_loc.1);
    println!("  Max:       {} at ({}, {})", mm.max, mm.max_loc.0, mm.max_loc.1);
    println!("  Mean:      {:.3}", mean);
    println!("  Std dev:   {:.3}", std_dev);
    println!("  Entropy:   {:.4} bits", analyzer.entropy());
    println!("  Center:    {:.3}", analyzer.center_point());
    Ok(())
}
