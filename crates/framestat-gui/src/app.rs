use std::sync::mpsc;

use framestat_core::grid::SourceImage;

use crate::convert::source_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{ConfigState, PreviewStats, RoiState, UIState, ViewportState};
use crate::worker;

pub struct FramestatApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: ConfigState,
    pub roi: RoiState,
    pub show_about: bool,
}

impl FramestatApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config: ConfigState::default(),
            roi: RoiState::default(),
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FolderScanned { folder, paths } => {
                    self.ui_state.add_log(format!(
                        "{}: {} image(s)",
                        folder.display(),
                        paths.len()
                    ));
                    self.ui_state.remember_folder(&folder);
                    self.config.folder = Some(folder);
                    self.ui_state.images = paths;
                    self.ui_state.selected_image = None;
                    if !self.ui_state.images.is_empty() {
                        self.preview_image(0);
                    }
                }
                WorkerResult::ImagePreview {
                    path,
                    image,
                    summary,
                    center_point,
                    entropy,
                } => {
                    let label = panels::helpers::file_name(&path);
                    self.update_viewport_texture(ctx, &image, &label);
                    self.ui_state.preview = Some(PreviewStats {
                        summary,
                        center_point,
                        entropy,
                    });
                }
                WorkerResult::Progress {
                    stage,
                    items_done,
                    items_total,
                } => {
                    self.ui_state.running_stage = Some(stage);
                    self.ui_state.progress_items_done = items_done;
                    self.ui_state.progress_items_total = items_total;
                }
                WorkerResult::AnalysisComplete { report, elapsed } => {
                    self.ui_state.running_stage = None;
                    self.ui_state.add_log(format!(
                        "Analyzed {} image(s), skipped {} in {}",
                        report.paths.len(),
                        report.skipped,
                        format_duration(elapsed)
                    ));
                    if let Some(ref e) = report.profile_error {
                        self.ui_state.add_log(format!("Profiles unavailable: {e}"));
                    }
                    self.ui_state.report = Some(report);
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => {
                    self.config = ConfigState::from_analysis_config(&config);
                    self.roi.reset();
                    self.roi.set_active(config.roi);
                    self.ui_state.add_log("Config imported".into());
                    self.send_command(WorkerCommand::ScanFolder {
                        folder: config.folder,
                        sort_by_name: config.sort_by_name,
                    });
                }
                WorkerResult::Error { message } => {
                    self.ui_state.running_stage = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn update_viewport_texture(&mut self, ctx: &egui::Context, image: &SourceImage, label: &str) {
        let color_image = source_to_color_image(image);
        let size = color_image.size;
        let texture = ctx.load_texture("viewport", color_image, egui::TextureOptions::NEAREST);
        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some(size);
        self.viewport.viewing_label = label.to_string();
        self.roi
            .selector
            .set_bounds(Some((size[0] as u32, size[1] as u32)));
    }

    /// Select the image at `index` in the folder list and load it.
    pub fn preview_image(&mut self, index: usize) {
        let Some(path) = self.ui_state.images.get(index).cloned() else {
            return;
        };
        self.ui_state.selected_image = Some(index);
        self.send_command(WorkerCommand::PreviewImage {
            path,
            color_mode: self.config.color_mode,
        });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FramestatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::plots::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About framestat")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("framestat");
                        ui.label("Image-sequence statistics over a shared ROI");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        format!("{:.1}min", secs / 60.0)
    }
}
