use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::app::FramestatApp;
use crate::messages::BatchReport;

const PLOT_HEIGHT: f32 = 180.0;

/// Per-image series of the last batch, shown once a report exists.
pub fn show(ctx: &egui::Context, app: &FramestatApp) {
    let Some(ref report) = app.ui_state.report else {
        return;
    };

    egui::TopBottomPanel::bottom("plots")
        .resizable(true)
        .default_height(PLOT_HEIGHT + 40.0)
        .show(ctx, |ui| {
            ui.columns(3, |cols| {
                intensity_plot(&mut cols[0], report);
                entropy_plot(&mut cols[1], report);
                column_profile_plot(&mut cols[2], report);
            });
        });
}

fn series(values: &[f64]) -> PlotPoints<'static> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| [i as f64, v])
        .collect()
}

fn intensity_plot(ui: &mut egui::Ui, report: &BatchReport) {
    ui.strong("Intensity");
    Plot::new("intensity_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("image")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("center", series(&report.center_points)));
            plot_ui.line(Line::new("average", series(&report.average_values)));
            plot_ui.line(Line::new("center - average", series(&report.center_minus_average)));
        });
}

fn entropy_plot(ui: &mut egui::Ui, report: &BatchReport) {
    ui.strong("Entropy");
    Plot::new("entropy_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("image")
        .y_axis_label("bits")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("entropy", series(&report.entropies)));
        });
}

fn column_profile_plot(ui: &mut egui::Ui, report: &BatchReport) {
    ui.strong("Column profile");
    if let Some(ref e) = report.profile_error {
        ui.small(e.as_str());
        return;
    }
    Plot::new("column_profile_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("image")
        .show(ui, |plot_ui| {
            for (i, row) in report.column_profile.iter().enumerate() {
                plot_ui.line(Line::new(format!("sample {i}"), series(row)));
            }
        });
}
