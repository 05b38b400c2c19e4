use crate::app::FramestatApp;
use crate::state::UIState;

const LOG_LINES: usize = 4;

pub fn show(ctx: &egui::Context, app: &mut FramestatApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        progress_bar(ui, &app.ui_state);
        log_area(ui, &app.ui_state.log_messages);

        ui.horizontal(|ui| {
            if let Some([w, h]) = app.viewport.image_size {
                ui.label(format!("{w}x{h}"));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewport.zoom * 100.0));
            ui.separator();
            let roi = app
                .roi
                .active()
                .map_or_else(|| "full frame".to_string(), |roi| roi.to_string());
            ui.label(format!("ROI: {roi}"));
        });
        ui.add_space(2.0);
    });
}

/// Batch progress, or an empty bar of the same height when idle.
fn progress_bar(ui: &mut egui::Ui, state: &UIState) {
    let Some(stage) = state.running_stage else {
        ui.add(egui::ProgressBar::new(0.0).text(""));
        return;
    };
    let bar = match (state.progress_items_done, state.progress_items_total) {
        (Some(done), Some(total)) if total > 0 => {
            egui::ProgressBar::new(done as f32 / total as f32)
                .text(format!("{stage} ({done}/{total})"))
        }
        _ => egui::ProgressBar::new(0.0).text(format!("{stage}...")),
    };
    ui.add(bar.animate(true));
}

/// Fixed-height log that follows new messages.
fn log_area(ui: &mut egui::Ui, messages: &[String]) {
    let rows = LOG_LINES as f32;
    let height = ui.text_style_height(&egui::TextStyle::Body) * rows
        + ui.spacing().item_spacing.y * (rows - 1.0);

    egui::ScrollArea::vertical()
        .max_height(height)
        .min_scrolled_height(height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for msg in messages {
                ui.label(msg);
            }
            for _ in messages.len()..LOG_LINES {
                ui.label("");
            }
        });
}
