pub mod batch;
pub mod config;
pub mod info;
pub mod list;
pub mod smooth;

use clap::ValueEnum;
use framestat_core::grid::ColorMode;

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorModeArg {
    Grayscale,
    Native,
}

impl From<ColorModeArg> for ColorMode {
    fn from(arg: ColorModeArg) -> Self {
        match arg {
            ColorModeArg::Grayscale => ColorMode::Grayscale,
            ColorModeArg::Native => ColorMode::Native,
        }
    }
}
