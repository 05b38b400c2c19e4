use framestat_core::roi::SelectionState;

use crate::app::FramestatApp;
use crate::panels::helpers::section_header;
use crate::panels::roi_interaction::confirm_selection;

pub(super) fn roi_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    let status = if app.roi.active().is_some() {
        "active"
    } else {
        "full frame"
    };
    section_header(ui, "Region of Interest", Some(status));
    ui.add_space(4.0);

    let enabled = app.viewport.texture.is_some() && !app.ui_state.is_busy();

    match app.roi.active() {
        Some(roi) => {
            ui.small(format!(
                "{}x{} at ({}, {})",
                roi.width(),
                roi.height(),
                roi.min_x,
                roi.min_y
            ));
        }
        None => {
            ui.small("Whole image");
        }
    }

    match app.roi.selector.state() {
        SelectionState::Dragging { rect, .. } => {
            ui.small(format!("Selecting: {}x{}", rect.width(), rect.height()));
        }
        SelectionState::PendingConfirm { rect } => {
            ui.small(format!("Pending: {}x{}", rect.width(), rect.height()));
        }
        SelectionState::Idle | SelectionState::Confirmed { .. } => {
            if enabled {
                ui.small("Left-drag on the image to select");
            }
        }
    }

    ui.add_space(4.0);
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            let pending = app.roi.selector.selection_made();
            if ui
                .add_enabled(pending, egui::Button::new("Confirm"))
                .clicked()
            {
                confirm_selection(app);
            }
            if ui
                .add_enabled(pending, egui::Button::new("Cancel"))
                .clicked()
            {
                app.roi.selector.cancel();
            }
            if ui.button("Reset").clicked() {
                app.roi.reset();
                app.ui_state.add_log("ROI reset to full frame".into());
            }
        });
    });
}
