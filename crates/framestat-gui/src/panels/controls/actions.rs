use framestat_core::batch::BatchOptions;
use framestat_core::progress::AnalysisStage;

use crate::app::FramestatApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels::helpers::{file_name, section_header};

pub(super) fn actions_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    section_header(ui, "Actions", None);
    ui.add_space(4.0);

    let busy = app.ui_state.is_busy();
    let has_folder = app.config.folder.is_some();

    if ui
        .add_enabled(!busy && has_folder, egui::Button::new("Analyze folder"))
        .clicked()
    {
        analyze_folder(app);
    }

    let has_image = app.ui_state.selected_path().is_some();
    if ui
        .add_enabled(!busy && has_image, egui::Button::new("Save smoothed image..."))
        .clicked()
    {
        save_smoothed(app);
    }
}

/// Snapshot the current ROI and parameters and start the batch.
fn analyze_folder(app: &mut FramestatApp) {
    let Some(folder) = app.config.folder.clone() else {
        return;
    };
    let config = app.config.to_analysis_config(app.roi.active());
    let options = match BatchOptions::from_config(&config) {
        Ok(options) => options,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };

    app.ui_state.running_stage = Some(AnalysisStage::Listing);
    app.ui_state.progress_items_done = None;
    app.ui_state.progress_items_total = None;
    app.ui_state.report = None;
    app.send_command(WorkerCommand::AnalyzeFolder {
        folder,
        options,
        sampling: config.sampling,
    });
}

fn save_smoothed(app: &mut FramestatApp) {
    let Some(source) = app.ui_state.selected_path().cloned() else {
        return;
    };
    let params = match app.config.filter_params() {
        Ok(params) => params,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let roi = app.roi.active();
    let color_mode = app.config.color_mode;
    let suggested = format!(
        "{}_smoothed.png",
        source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name(&source))
    );

    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(output) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("BMP", &["bmp"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(suggested)
            .save_file()
        {
            let _ = result_tx.send(WorkerResult::Log {
                message: format!("Saving {}...", output.display()),
            });
            let _ = cmd_tx.send(WorkerCommand::SaveSmoothed {
                source,
                output,
                roi,
                params,
                color_mode,
            });
        }
    });
}
