use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};

use framestat_core::progress::{AnalysisStage, ProgressReporter};

use crate::messages::WorkerResult;

/// Progress reporter that sends updates over an mpsc channel to the UI thread.
pub struct ChannelProgressReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    current_stage: Mutex<AnalysisStage>,
    current_total: AtomicUsize,
}

impl ChannelProgressReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context) -> Self {
        Self {
            tx,
            ctx,
            current_stage: Mutex::new(AnalysisStage::Listing),
            current_total: AtomicUsize::new(0),
        }
    }

    fn stage(&self) -> AnalysisStage {
        self.current_stage
            .lock()
            .map(|stage| *stage)
            .unwrap_or(AnalysisStage::Listing)
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn begin_stage(&self, stage: AnalysisStage, total_items: Option<usize>) {
        if let Ok(mut current) = self.current_stage.lock() {
            *current = stage;
        }
        self.current_total
            .store(total_items.unwrap_or(0), Ordering::Relaxed);
        let _ = self.tx.send(WorkerResult::Progress {
            stage,
            items_done: Some(0),
            items_total: total_items,
        });
        self.ctx.request_repaint();
    }

    fn advance(&self, items_done: usize) {
        let total = self.current_total.load(Ordering::Relaxed);
        let _ = self.tx.send(WorkerResult::Progress {
            stage: self.stage(),
            items_done: Some(items_done),
            items_total: if total > 0 { Some(total) } else { None },
        });
        self.ctx.request_repaint();
    }
}
