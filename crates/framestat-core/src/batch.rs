use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::analyzer::{check_profile, sample_positions, AnalysisResult, SingleImageAnalyzer};
use crate::config::{AnalysisConfig, SamplingConfig};
use crate::consts::{DEFAULT_BLOCK_SIZE, PARALLEL_IMAGE_THRESHOLD};
use crate::error::{FramestatError, Result};
use crate::filters::butterworth::ButterworthParams;
use crate::grid::ColorMode;
use crate::io::folder::list_images;
use crate::progress::{AnalysisStage, NoOpReporter, ProgressReporter};
use crate::roi::Roi;

/// Configuration snapshot shared by every image of a batch.
///
/// It is copied into the [`BatchAnalyzer`] when loading starts, so later
/// edits to the caller's ROI never reach a batch in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOptions {
    pub roi: Option<Roi>,
    /// Butterworth smoothing applied after cropping; `None` disables it.
    pub filter: Option<ButterworthParams>,
    pub color_mode: ColorMode,
    pub sort_by_name: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            roi: None,
            filter: Some(ButterworthParams::default()),
            color_mode: ColorMode::default(),
            sort_by_name: false,
        }
    }
}

impl BatchOptions {
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            roi: config.roi,
            filter: config.filter.params()?,
            color_mode: config.color_mode,
            sort_by_name: config.sort_by_name,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(roi) = &self.roi {
            roi.validated()?;
        }
        if let Some(filter) = &self.filter {
            filter.validate()?;
        }
        Ok(())
    }
}

/// An image that could not be added to the batch.
#[derive(Debug)]
pub struct LoadFailure {
    /// Position in the folder enumeration.
    pub index: usize,
    pub path: PathBuf,
    pub error: FramestatError,
}

/// Per-image results of a batch, in load order.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchResult {
    pub paths: Vec<PathBuf>,
    pub results: Vec<AnalysisResult>,
}

#[derive(Clone, Debug)]
struct BatchEntry {
    /// Position in the folder enumeration.
    index: usize,
    path: PathBuf,
    analyzer: SingleImageAnalyzer,
}

/// Runs the single-image pipeline over a folder with one shared ROI and
/// filter, producing index-aligned sequences of per-image metrics.
///
/// Nothing is cached: every sequence is recomputed on each call.
#[derive(Debug)]
pub struct BatchAnalyzer {
    options: BatchOptions,
    entries: Vec<BatchEntry>,
    failures: Vec<LoadFailure>,
}

impl BatchAnalyzer {
    /// Load every image in `folder`: decode, crop to the shared ROI, smooth.
    ///
    /// Images that fail to decode or do not contain the ROI are skipped and
    /// recorded in [`failures`](Self::failures). A missing folder gives an
    /// empty batch. Only invalid `options` are an error.
    pub fn load(folder: &Path, options: BatchOptions) -> Result<Self> {
        Self::load_reported(folder, options, &NoOpReporter)
    }

    pub fn load_reported(
        folder: &Path,
        options: BatchOptions,
        reporter: &dyn ProgressReporter,
    ) -> Result<Self> {
        options.validate()?;

        reporter.begin_stage(AnalysisStage::Listing, None);
        let paths = list_images(folder, options.sort_by_name);
        reporter.finish_stage();

        Self::from_paths(paths, options, reporter)
    }

    /// Build a batch from an explicit list of image paths. Indices in
    /// failures and errors refer to positions in `paths`.
    pub fn from_paths(
        paths: Vec<PathBuf>,
        options: BatchOptions,
        reporter: &dyn ProgressReporter,
    ) -> Result<Self> {
        options.validate()?;
        let total = paths.len();
        info!(
            images = total,
            roi = ?options.roi,
            filter = ?options.filter,
            "Loading batch"
        );

        let mut failures = Vec::new();

        reporter.begin_stage(AnalysisStage::Decoding, Some(total));
        let mut decoded: Vec<BatchEntry> = Vec::with_capacity(total);
        for (index, path) in paths.into_iter().enumerate() {
            match SingleImageAnalyzer::open(&path, options.color_mode) {
                Ok(analyzer) => decoded.push(BatchEntry {
                    index,
                    path,
                    analyzer,
                }),
                Err(error) => {
                    warn!(index, path = %path.display(), %error, "Skipping undecodable image");
                    failures.push(LoadFailure { index, path, error });
                }
            }
            reporter.advance(index + 1);
        }
        reporter.finish_stage();

        if let Some(roi) = options.roi {
            reporter.begin_stage(AnalysisStage::Cropping, Some(decoded.len()));
            let mut cropped = Vec::with_capacity(decoded.len());
            for (done, entry) in decoded.into_iter().enumerate() {
                match entry.analyzer.apply_roi(Some(&roi)) {
                    Ok(analyzer) => cropped.push(BatchEntry { analyzer, ..entry }),
                    Err(error) => {
                        warn!(index = entry.index, path = %entry.path.display(), %error, "Skipping image outside ROI");
                        failures.push(LoadFailure {
                            index: entry.index,
                            path: entry.path,
                            error,
                        });
                    }
                }
                reporter.advance(done + 1);
            }
            reporter.finish_stage();
            decoded = cropped;
        }

        if let Some(params) = options.filter {
            reporter.begin_stage(AnalysisStage::Filtering, Some(decoded.len()));
            for (done, entry) in decoded.iter_mut().enumerate() {
                entry.analyzer = entry.analyzer.butterworth_smooth(&params);
                reporter.advance(done + 1);
            }
            reporter.finish_stage();
        }

        failures.sort_by_key(|f| f.index);
        let entries = decoded;

        if entries.is_empty() {
            warn!("Batch is empty");
        } else {
            info!(
                loaded = entries.len(),
                skipped = failures.len(),
                "Batch loaded"
            );
        }

        Ok(Self {
            options,
            entries,
            failures,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|e| e.path.as_path()).collect()
    }

    pub fn analyzers(&self) -> impl Iterator<Item = &SingleImageAnalyzer> {
        self.entries.iter().map(|e| &e.analyzer)
    }

    /// Evaluate `f` on every image, preserving load order.
    fn per_image<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&SingleImageAnalyzer) -> T + Sync + Send,
    {
        if self.entries.len() >= PARALLEL_IMAGE_THRESHOLD {
            self.entries.par_iter().map(|e| f(&e.analyzer)).collect()
        } else {
            self.entries.iter().map(|e| f(&e.analyzer)).collect()
        }
    }

    pub fn center_points(&self) -> Vec<f64> {
        self.per_image(SingleImageAnalyzer::center_point)
    }

    pub fn average_values(&self) -> Vec<f64> {
        self.per_image(SingleImageAnalyzer::average_value)
    }

    pub fn entropies(&self) -> Vec<f64> {
        self.per_image(SingleImageAnalyzer::entropy)
    }

    /// Center point minus average value, per image: local structure at the
    /// center with global brightness drift removed.
    pub fn center_points_without_shift(&self) -> Vec<f64> {
        let centers = self.center_points();
        let averages = self.average_values();
        debug_assert_eq!(centers.len(), averages.len());
        centers
            .iter()
            .zip(&averages)
            .map(|(c, a)| c - a)
            .collect()
    }

    /// Common (width, height) of all images, `None` for an empty batch.
    ///
    /// A mismatch names the offending image by its folder position.
    pub fn uniform_dims(&self) -> Result<Option<(usize, usize)>> {
        let Some(first) = self.entries.first() else {
            return Ok(None);
        };
        let expected = first.analyzer.grid().dims();
        for entry in self.entries.iter().skip(1) {
            let found = entry.analyzer.grid().dims();
            if found != expected {
                return Err(FramestatError::DimensionMismatch {
                    index: entry.index,
                    path: entry.path.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(Some(expected))
    }

    /// Block averages down column `x` at `sample_count` evenly spaced rows.
    ///
    /// Returns a `sample_count x image_count` matrix: one row per sampled
    /// position, one entry per image in load order. All images must share
    /// the same dimensions.
    pub fn column_profile(&self, x: usize, sample_count: usize) -> Result<Vec<Vec<f64>>> {
        self.column_profile_with_block(x, sample_count, DEFAULT_BLOCK_SIZE)
    }

    pub fn column_profile_with_block(
        &self,
        x: usize,
        sample_count: usize,
        block: usize,
    ) -> Result<Vec<Vec<f64>>> {
        let Some((width, height)) = self.profile_dims(sample_count, block)? else {
            return Ok(vec![Vec::new(); sample_count]);
        };
        check_profile(x, width, "column", sample_count, block)?;
        Ok(sample_positions(height, sample_count)
            .map(|y| self.per_image(|a| a.sample_block_average(x, y, block)))
            .collect())
    }

    /// Block averages along row `y` at `sample_count` evenly spaced columns.
    /// Same matrix layout as [`column_profile`](Self::column_profile).
    pub fn row_profile(&self, y: usize, sample_count: usize) -> Result<Vec<Vec<f64>>> {
        self.row_profile_with_block(y, sample_count, DEFAULT_BLOCK_SIZE)
    }

    pub fn row_profile_with_block(
        &self,
        y: usize,
        sample_count: usize,
        block: usize,
    ) -> Result<Vec<Vec<f64>>> {
        let Some((width, height)) = self.profile_dims(sample_count, block)? else {
            return Ok(vec![Vec::new(); sample_count]);
        };
        check_profile(y, height, "row", sample_count, block)?;
        Ok(sample_positions(width, sample_count)
            .map(|x| self.per_image(|a| a.sample_block_average(x, y, block)))
            .collect())
    }

    fn profile_dims(&self, sample_count: usize, block: usize) -> Result<Option<(usize, usize)>> {
        SamplingConfig {
            sample_count,
            block_size: block,
            ..SamplingConfig::default()
        }
        .validate()?;
        self.uniform_dims()
    }

    /// Full per-image results for every loaded image.
    pub fn results(&self, sampling: &SamplingConfig) -> Result<BatchResult> {
        sampling.validate()?;
        self.uniform_dims()?;
        let results = self
            .per_image(|a| a.analyze(sampling))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        Ok(BatchResult {
            paths: self.entries.iter().map(|e| e.path.clone()).collect(),
            results,
        })
    }
}
