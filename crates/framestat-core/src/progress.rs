/// Batch analysis stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisStage {
    Listing,
    Decoding,
    Cropping,
    Filtering,
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listing => write!(f, "Listing images"),
            Self::Decoding => write!(f, "Decoding images"),
            Self::Cropping => write!(f, "Cropping to ROI"),
            Self::Filtering => write!(f, "Butterworth smoothing"),
        }
    }
}

/// Progress sink for long-running batch work.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g. image count), if known.
    fn begin_stage(&self, _stage: AnalysisStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every update.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
