use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use framestat_core::batch::{BatchAnalyzer, BatchOptions};
use framestat_core::config::AnalysisConfig;
use framestat_core::roi::Roi;
use tracing::info;

use super::ColorModeArg;
use crate::progress::BarReporter;
use crate::summary::{print_batch_summary, print_profile, ProfileKind};

#[derive(Args)]
pub struct BatchArgs {
    /// Folder of bmp/jpg/jpeg/png images (overrides the config's folder)
    pub folder: Option<PathBuf>,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Shared ROI as minX,minY,maxX,maxY
    #[arg(long)]
    pub roi: Option<Roi>,

    /// Squared cutoff radius of the low-pass filter
    #[arg(long)]
    pub stopband2: Option<f64>,

    /// Filter order
    #[arg(long)]
    pub order: Option<u32>,

    /// Skip Butterworth smoothing
    #[arg(long)]
    pub no_filter: bool,

    /// Decode as grayscale or native color (analysis always uses luminance)
    #[arg(long, value_enum)]
    pub color: Option<ColorModeArg>,

    /// Sort images by file name
    #[arg(long)]
    pub sorted: bool,

    /// Column sampled by the column profile
    #[arg(long)]
    pub column_x: Option<usize>,

    /// Row sampled by the row profile
    #[arg(long)]
    pub row_y: Option<usize>,

    /// Number of evenly spaced profile samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Side length of each sampled block
    #[arg(long)]
    pub block: Option<usize>,

    /// Also print the column and row profile matrices
    #[arg(long)]
    pub profiles: bool,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = build_config(args)?;
    let options = BatchOptions::from_config(&config)?;
    info!(folder = %config.folder.display(), "Starting batch analysis");

    let reporter = BarReporter::new()?;
    let batch = BatchAnalyzer::load_reported(&config.folder, options, &reporter)?;
    reporter.finish();

    print_batch_summary(&config, &batch);

    if args.profiles && !batch.is_empty() {
        let s = &config.sampling;
        let columns = batch
            .column_profile_with_block(s.column_x, s.sample_count, s.block_size)
            .context("Cannot build column profile")?;
        print_profile(ProfileKind::Column(s.column_x), &columns);

        let rows = batch
            .row_profile_with_block(s.row_y, s.sample_count, s.block_size)
            .context("Cannot build row profile")?;
        print_profile(ProfileKind::Row(s.row_y), &rows);
    }

    Ok(())
}

fn build_config(args: &BatchArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match &args.folder {
            Some(_) => AnalysisConfig::default(),
            None => bail!("Give a folder or a --config file"),
        },
    };

    if let Some(ref folder) = args.folder {
        config.folder = folder.clone();
    }
    if args.roi.is_some() {
        config.roi = args.roi;
    }
    if let Some(color) = args.color {
        config.color_mode = color.into();
    }
    config.sort_by_name |= args.sorted;

    if args.no_filter {
        config.filter.enabled = false;
    }
    if let Some(stopband2) = args.stopband2 {
        config.filter.stopband2 = stopband2;
    }
    if let Some(order) = args.order {
        config.filter.order = order;
    }

    if let Some(x) = args.column_x {
        config.sampling.column_x = x;
    }
    if let Some(y) = args.row_y {
        config.sampling.row_y = y;
    }
    if let Some(n) = args.samples {
        config.sampling.sample_count = n;
    }
    if let Some(b) = args.block {
        config.sampling.block_size = b;
    }

    config.validate()?;
    Ok(config)
}
