use framestat_core::grid::ColorMode;

use crate::app::FramestatApp;
use crate::messages::WorkerCommand;
use crate::panels::helpers::{file_name, radio_row, section_header};
use crate::panels::menu_bar::choose_folder;

const IMAGE_LIST_HEIGHT: f32 = 180.0;

pub(super) fn folder_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    section_header(ui, "Folder", None);
    ui.add_space(4.0);

    let busy = app.ui_state.is_busy();
    if ui
        .add_enabled(!busy, egui::Button::new("Choose Folder..."))
        .clicked()
    {
        choose_folder(app);
    }

    if let Some(ref folder) = app.config.folder {
        ui.small(folder.display().to_string());
    }
    recent_folders(ui, app, busy);

    ui.add_space(4.0);
    if ui
        .checkbox(&mut app.config.sort_by_name, "Sort by file name")
        .changed()
    {
        if let Some(folder) = app.config.folder.clone() {
            app.send_command(WorkerCommand::ScanFolder {
                folder,
                sort_by_name: app.config.sort_by_name,
            });
        }
    }

    ui.small("Display color");
    if radio_row(
        ui,
        &mut app.config.color_mode,
        &[ColorMode::Grayscale, ColorMode::Native],
    ) {
        if let Some(index) = app.ui_state.selected_image {
            app.preview_image(index);
        }
    }
}

/// Drop-down of folders scanned earlier in this session.
fn recent_folders(ui: &mut egui::Ui, app: &mut FramestatApp, busy: bool) {
    if app.ui_state.recent_folders.is_empty() {
        return;
    }

    let mut picked = None;
    ui.add_enabled_ui(!busy, |ui| {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("recent_folders")
                .selected_text("Recent folders")
                .show_ui(ui, |ui| {
                    for folder in &app.ui_state.recent_folders {
                        if ui.selectable_label(false, folder.display().to_string()).clicked() {
                            picked = Some(folder.clone());
                        }
                    }
                });
            if ui.small_button("Clear").clicked() {
                app.ui_state.clear_recent_folders();
            }
        });
    });

    if let Some(folder) = picked {
        app.send_command(WorkerCommand::ScanFolder {
            folder,
            sort_by_name: app.config.sort_by_name,
        });
    }
}

pub(super) fn image_list_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    let count = app.ui_state.images.len();
    let status = (count > 0).then(|| format!("{count} found"));
    section_header(ui, "Images", status.as_deref());
    ui.add_space(4.0);

    if count == 0 {
        ui.small("No images");
        return;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("image_list")
        .max_height(IMAGE_LIST_HEIGHT)
        .show(ui, |ui| {
            for (i, path) in app.ui_state.images.iter().enumerate() {
                let selected = app.ui_state.selected_image == Some(i);
                if ui.selectable_label(selected, file_name(path)).clicked() {
                    clicked = Some(i);
                }
            }
        });
    if let Some(i) = clicked {
        app.preview_image(i);
    }

    if let Some(ref preview) = app.ui_state.preview {
        ui.add_space(4.0);
        let s = &preview.summary;
        ui.small(format!("Range: {}..{}", s.min, s.max));
        ui.small(format!("Mean: {:.2}  Std: {:.2}", s.mean, s.std_dev));
        ui.small(format!(
            "Center: {:.2}  Entropy: {:.3} bits",
            preview.center_point, preview.entropy
        ));
    }
}
