use std::path::PathBuf;
use std::time::Duration;

use framestat_core::batch::BatchOptions;
use framestat_core::config::{AnalysisConfig, SamplingConfig};
use framestat_core::filters::butterworth::ButterworthParams;
use framestat_core::grid::{ColorMode, SourceImage};
use framestat_core::progress::AnalysisStage;
use framestat_core::roi::Roi;
use framestat_core::stats::GrayLevelSummary;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// List the image files of a folder.
    ScanFolder { folder: PathBuf, sort_by_name: bool },

    /// Decode one image for display and quick statistics.
    PreviewImage { path: PathBuf, color_mode: ColorMode },

    /// Run the batch analysis. `options` is the snapshot taken when the
    /// user pressed "Analyze folder".
    AnalyzeFolder {
        folder: PathBuf,
        options: BatchOptions,
        sampling: SamplingConfig,
    },

    /// Crop + smooth one image and write it to disk.
    SaveSmoothed {
        source: PathBuf,
        output: PathBuf,
        roi: Option<Roi>,
        params: Option<ButterworthParams>,
        color_mode: ColorMode,
    },
}

/// Per-image sequences of a finished batch, ready for plotting.
pub struct BatchReport {
    pub paths: Vec<PathBuf>,
    pub roi: Option<Roi>,
    pub center_points: Vec<f64>,
    pub average_values: Vec<f64>,
    pub center_minus_average: Vec<f64>,
    pub entropies: Vec<f64>,
    /// `sample_count x image_count`
    pub column_profile: Vec<Vec<f64>>,
    pub row_profile: Vec<Vec<f64>>,
    /// Set when the profiles could not be built (e.g. mixed image sizes).
    pub profile_error: Option<String>,
    pub skipped: usize,
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    FolderScanned {
        folder: PathBuf,
        paths: Vec<PathBuf>,
    },
    ImagePreview {
        path: PathBuf,
        image: SourceImage,
        summary: GrayLevelSummary,
        center_point: f64,
        entropy: f64,
    },

    /// Progress update during batch loading.
    Progress {
        stage: AnalysisStage,
        items_done: Option<usize>,
        items_total: Option<usize>,
    },

    AnalysisComplete {
        report: BatchReport,
        elapsed: Duration,
    },
    ImageSaved {
        path: PathBuf,
    },
    ConfigImported {
        config: AnalysisConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
