use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use framestat_core::config::{AnalysisConfig, FilterConfig, SamplingConfig};
use framestat_core::error::Result;
use framestat_core::filters::butterworth::ButterworthParams;
use framestat_core::grid::ColorMode;
use framestat_core::progress::AnalysisStage;
use framestat_core::roi::{Roi, RoiSelector};
use framestat_core::stats::GrayLevelSummary;

use crate::messages::BatchReport;

/// Log lines kept for the status panel.
const MAX_LOG_MESSAGES: usize = 200;
/// Folders offered in the recent-folders list.
const MAX_RECENT_FOLDERS: usize = 10;

/// Quick statistics of the image shown in the viewport.
pub struct PreviewStats {
    pub summary: GrayLevelSummary,
    pub center_point: f64,
    pub entropy: f64,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Images found in the current folder.
    pub images: Vec<PathBuf>,
    pub selected_image: Option<usize>,
    pub preview: Option<PreviewStats>,

    /// Which stage is currently running (None = idle).
    pub running_stage: Option<AnalysisStage>,
    pub report: Option<BatchReport>,

    pub log_messages: Vec<String>,
    /// Previously scanned folders, most recent first.
    pub recent_folders: Vec<PathBuf>,

    pub progress_items_done: Option<usize>,
    pub progress_items_total: Option<usize>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running_stage.is_some()
    }

    /// Append a log line, dropping the oldest beyond `MAX_LOG_MESSAGES`.
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        let excess = self.log_messages.len().saturating_sub(MAX_LOG_MESSAGES);
        self.log_messages.drain(..excess);
    }

    /// Move `folder` to the front of the recent list.
    pub fn remember_folder(&mut self, folder: &Path) {
        self.recent_folders.retain(|f| f != folder);
        self.recent_folders.insert(0, folder.to_path_buf());
        self.recent_folders.truncate(MAX_RECENT_FOLDERS);
    }

    pub fn clear_recent_folders(&mut self) {
        self.recent_folders.clear();
    }

    pub fn selected_path(&self) -> Option<&PathBuf> {
        self.selected_image.and_then(|i| self.images.get(i))
    }
}

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub image_size: Option<[usize; 2]>,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    pub viewing_label: String,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            image_size: None,
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            viewing_label: String::new(),
        }
    }
}

/// Editable analysis parameters.
pub struct ConfigState {
    pub folder: Option<PathBuf>,
    pub color_mode: ColorMode,
    pub sort_by_name: bool,
    pub filter: FilterConfig,
    pub sampling: SamplingConfig,
}

impl Default for ConfigState {
    fn default() -> Self {
        let mut state = Self::from_analysis_config(&AnalysisConfig::default());
        state.folder = None;
        state
    }
}

impl ConfigState {
    pub fn from_analysis_config(config: &AnalysisConfig) -> Self {
        Self {
            folder: Some(config.folder.clone()),
            color_mode: config.color_mode,
            sort_by_name: config.sort_by_name,
            filter: config.filter.clone(),
            sampling: config.sampling.clone(),
        }
    }

    pub fn to_analysis_config(&self, roi: Option<Roi>) -> AnalysisConfig {
        AnalysisConfig {
            folder: self.folder.clone().unwrap_or_else(|| PathBuf::from(".")),
            color_mode: self.color_mode,
            sort_by_name: self.sort_by_name,
            roi,
            filter: self.filter.clone(),
            sampling: self.sampling.clone(),
        }
    }

    pub fn filter_params(&self) -> Result<Option<ButterworthParams>> {
        self.filter.params()
    }
}

/// ROI selection plus the batch-wide ROI it last confirmed.
///
/// The selector forgets its confirmed ROI as soon as a new drag starts, so
/// the active ROI is kept by a subscriber until it is replaced or reset.
pub struct RoiState {
    pub selector: RoiSelector,
    active: Rc<Cell<Option<Roi>>>,
}

impl Default for RoiState {
    fn default() -> Self {
        let active = Rc::new(Cell::new(None));
        let mut selector = RoiSelector::new();
        let sink = Rc::clone(&active);
        selector.subscribe(move |roi| sink.set(Some(roi)));
        Self { selector, active }
    }
}

impl RoiState {
    pub fn active(&self) -> Option<Roi> {
        self.active.get()
    }

    pub fn set_active(&mut self, roi: Option<Roi>) {
        self.active.set(roi);
    }

    pub fn reset(&mut self) {
        self.selector.reset();
        self.active.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_latest_messages() {
        let mut state = UIState::default();
        for i in 0..MAX_LOG_MESSAGES + 5 {
            state.add_log(format!("line {i}"));
        }
        assert_eq!(state.log_messages.len(), MAX_LOG_MESSAGES);
        assert_eq!(state.log_messages[0], "line 5");
        assert_eq!(
            state.log_messages.last().map(String::as_str),
            Some(format!("line {}", MAX_LOG_MESSAGES + 4).as_str())
        );
    }

    #[test]
    fn test_recent_folders_most_recent_first_without_duplicates() {
        let mut state = UIState::default();
        state.remember_folder(Path::new("/a"));
        state.remember_folder(Path::new("/b"));
        state.remember_folder(Path::new("/a"));
        assert_eq!(
            state.recent_folders,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );

        for i in 0..MAX_RECENT_FOLDERS + 3 {
            state.remember_folder(&PathBuf::from(format!("/f{i}")));
        }
        assert_eq!(state.recent_folders.len(), MAX_RECENT_FOLDERS);
        assert_eq!(
            state.recent_folders[0],
            PathBuf::from(format!("/f{}", MAX_RECENT_FOLDERS + 2))
        );

        state.clear_recent_folders();
        assert!(state.recent_folders.is_empty());
    }
}
