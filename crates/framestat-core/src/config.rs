use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLOCK_SIZE, DEFAULT_BUTTERWORTH_ORDER, DEFAULT_SAMPLE_COUNT, DEFAULT_STOPBAND2,
};
use crate::error::{FramestatError, Result};
use crate::filters::butterworth::ButterworthParams;
use crate::grid::ColorMode;
use crate::roi::Roi;

/// Full configuration of a folder analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub folder: PathBuf,
    #[serde(default)]
    pub color_mode: ColorMode,
    /// Sort images by file name instead of filesystem order.
    #[serde(default)]
    pub sort_by_name: bool,
    /// Shared ROI applied to every image; absent means full frame.
    #[serde(default)]
    pub roi: Option<Roi>,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            color_mode: ColorMode::default(),
            sort_by_name: false,
            roi: None,
            filter: FilterConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| FramestatError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FramestatError::Config(e.to_string()))
    }

    /// Reject malformed ROI, filter or sampling values before any work starts.
    pub fn validate(&self) -> Result<()> {
        if let Some(roi) = &self.roi {
            roi.validated()?;
        }
        self.filter.params()?;
        self.sampling.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub enabled: bool,
    pub stopband2: f64,
    pub order: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stopband2: DEFAULT_STOPBAND2,
            order: DEFAULT_BUTTERWORTH_ORDER,
        }
    }
}

impl FilterConfig {
    /// Validated filter parameters, or `None` when smoothing is disabled.
    pub fn params(&self) -> Result<Option<ButterworthParams>> {
        if !self.enabled {
            return Ok(None);
        }
        ButterworthParams::new(self.stopband2, self.order).map(Some)
    }
}

/// Where and how densely the row/column profiles are sampled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Column sampled by the column profile.
    pub column_x: usize,
    /// Row sampled by the row profile.
    pub row_y: usize,
    pub sample_count: usize,
    pub block_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            column_x: 0,
            row_y: 0,
            sample_count: DEFAULT_SAMPLE_COUNT,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(FramestatError::InvalidSampling(
                "sample count must be at least 1".into(),
            ));
        }
        if self.block_size == 0 {
            return Err(FramestatError::InvalidSampling(
                "block size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
