mod actions;
mod folder;
mod parameters;
mod roi;

use crate::app::FramestatApp;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut FramestatApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                folder::folder_section(ui, app);
                ui.separator();
                folder::image_list_section(ui, app);
                ui.separator();
                roi::roi_section(ui, app);
                ui.separator();
                parameters::filter_section(ui, app);
                ui.separator();
                parameters::sampling_section(ui, app);
                ui.separator();
                actions::actions_section(ui, app);
            });
        });
}
