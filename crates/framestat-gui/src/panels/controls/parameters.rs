use crate::app::FramestatApp;
use crate::panels::helpers::section_header;

const MAX_ORDER: u32 = 10;

pub(super) fn filter_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    section_header(ui, "Butterworth Smoothing", None);
    ui.add_space(4.0);

    let filter = &mut app.config.filter;
    ui.checkbox(&mut filter.enabled, "Enabled");
    ui.add_enabled_ui(filter.enabled, |ui| {
        ui.horizontal(|ui| {
            ui.label("Stopband²:");
            ui.add(
                egui::DragValue::new(&mut filter.stopband2)
                    .speed(10.0)
                    .range(1.0..=1.0e6),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Order:");
            ui.add(egui::DragValue::new(&mut filter.order).range(1..=MAX_ORDER));
        });
    });
}

pub(super) fn sampling_section(ui: &mut egui::Ui, app: &mut FramestatApp) {
    section_header(ui, "Profiles", None);
    ui.add_space(4.0);

    let sampling = &mut app.config.sampling;
    egui::Grid::new("sampling_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Column x:");
            ui.add(egui::DragValue::new(&mut sampling.column_x));
            ui.end_row();

            ui.label("Row y:");
            ui.add(egui::DragValue::new(&mut sampling.row_y));
            ui.end_row();

            ui.label("Samples:");
            ui.add(egui::DragValue::new(&mut sampling.sample_count).range(1..=1024));
            ui.end_row();

            ui.label("Block:");
            ui.add(egui::DragValue::new(&mut sampling.block_size).range(1..=64));
            ui.end_row();
        });
}
