use std::path::Path;

/// Bold section title with an optional right-aligned status note.
pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Radio buttons for a small enum. Returns `true` if the value changed.
pub(crate) fn radio_row<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    current: &mut T,
    choices: &[T],
) -> bool {
    ui.horizontal(|ui| {
        choices.iter().fold(false, |changed, &choice| {
            ui.radio_value(current, choice, choice.to_string()).changed() || changed
        })
    })
    .inner
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
