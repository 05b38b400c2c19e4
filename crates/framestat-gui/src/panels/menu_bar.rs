use framestat_core::config::AnalysisConfig;

use crate::app::FramestatApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::state::ConfigState;

pub fn show(ctx: &egui::Context, app: &mut FramestatApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Choose Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    choose_folder(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    let folder = app.config.folder.take();
                    app.config = ConfigState {
                        folder,
                        ..ConfigState::default()
                    };
                    app.roi.reset();
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            choose_folder(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn choose_folder(app: &FramestatApp) {
    let cmd_tx = app.cmd_tx.clone();
    let sort_by_name = app.config.sort_by_name;
    std::thread::spawn(move || {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            let _ = cmd_tx.send(WorkerCommand::ScanFolder {
                folder,
                sort_by_name,
            });
        }
    });
}

fn import_config(app: &FramestatApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AnalysisConfig::from_toml_file(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &FramestatApp) {
    let config = app.config.to_analysis_config(app.roi.active());
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("framestat.toml")
            .save_file()
        else {
            return;
        };
        let written = config
            .to_toml_string()
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
        let message = match written {
            Ok(()) => WorkerResult::Log {
                message: format!("Config saved to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to save config: {e}"),
            },
        };
        let _ = result_tx.send(message);
    });
}
