use framestat_core::roi::{PointerEvent, SelectionState};

use crate::app::FramestatApp;
use crate::panels::viewport::ImageView;

const LIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const ACTIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 220, 120);

/// Feed primary-button drags on the image to the ROI selector.
///
/// Ctrl/Cmd-drag is left to panning.
pub fn handle_roi_drag(
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut FramestatApp,
    view: &ImageView,
) {
    let command_held = ui.input(|i| i.modifiers.command);
    let selector = &mut app.roi.selector;

    if response.drag_started_by(egui::PointerButton::Primary) && !command_held {
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            let (x, y) = view.to_pixel(origin);
            selector.handle(PointerEvent::Down { x, y });
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
            let (x, y) = view.to_pixel(pos);
            selector.handle(PointerEvent::Move {
                x,
                y,
                button_held: true,
            });
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            let (x, y) = view.to_pixel(pos);
            selector.handle(PointerEvent::Up { x, y });
        }
    }

    // Button released where the viewport never saw it.
    let still_dragging = matches!(selector.state(), SelectionState::Dragging { .. });
    if still_dragging && !ui.input(|i| i.pointer.primary_down()) {
        let (x, y) = ui
            .input(|i| i.pointer.latest_pos())
            .map(|pos| view.to_pixel(pos))
            .unwrap_or((0, 0));
        selector.handle(PointerEvent::Move {
            x,
            y,
            button_held: false,
        });
    }

    if response.hovered() && !command_held {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }
}

/// Enter confirms the pending selection, Escape cancels it.
pub fn handle_roi_keys(ctx: &egui::Context, app: &mut FramestatApp) {
    if ctx.wants_keyboard_input() {
        return;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        confirm_selection(app);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.roi.selector.cancel();
    }
}

pub fn confirm_selection(app: &mut FramestatApp) {
    if !app.roi.selector.selection_made() {
        return;
    }
    match app.roi.selector.confirm() {
        Ok(roi) => app.ui_state.add_log(format!(
            "ROI confirmed: {roi} ({}x{})",
            roi.width(),
            roi.height()
        )),
        Err(e) => {
            app.roi.set_active(None);
            app.ui_state
                .add_log(format!("{e}; analysis will use the full frame"));
        }
    }
}

/// Draw the active ROI (dimmed surroundings) and the selection in progress.
pub fn draw_roi_overlay(ui: &egui::Ui, app: &FramestatApp, view: &ImageView) {
    if let Some(roi) = app.roi.active() {
        let screen = view.to_screen((roi.min_x, roi.min_y, roi.max_x, roi.max_y));
        draw_dim_regions(ui, view.rect, screen);
        draw_border(ui, screen, ACTIVE_COLOR);
        draw_dimensions_label(ui, roi.width(), roi.height(), screen, ACTIVE_COLOR);
    }

    let (rect, pending) = match app.roi.selector.state() {
        SelectionState::Dragging { rect, .. } => (rect, false),
        SelectionState::PendingConfirm { rect } => (rect, true),
        _ => return,
    };
    let screen = view.to_screen((rect.min_x, rect.min_y, rect.max_x, rect.max_y));
    draw_border(ui, screen, LIVE_COLOR);
    draw_dimensions_label(ui, rect.width(), rect.height(), screen, LIVE_COLOR);
    if pending {
        ui.painter().text(
            egui::pos2(screen.left(), screen.top() - 4.0),
            egui::Align2::LEFT_BOTTOM,
            "Enter: confirm   Esc: cancel",
            egui::FontId::proportional(12.0),
            LIVE_COLOR,
        );
    }
}

/// Darken the part of the image outside `roi`.
fn draw_dim_regions(ui: &egui::Ui, image: egui::Rect, roi: egui::Rect) {
    let shade = egui::Color32::from_black_alpha(140);
    let bands = [
        egui::Rect::from_x_y_ranges(image.x_range(), image.top()..=roi.top()),
        egui::Rect::from_x_y_ranges(image.x_range(), roi.bottom()..=image.bottom()),
        egui::Rect::from_x_y_ranges(image.left()..=roi.left(), roi.y_range()),
        egui::Rect::from_x_y_ranges(roi.right()..=image.right(), roi.y_range()),
    ];
    for band in bands {
        if band.is_positive() {
            ui.painter().rect_filled(band, 0.0, shade);
        }
    }
}

fn draw_border(ui: &egui::Ui, rect: egui::Rect, color: egui::Color32) {
    ui.painter().rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.5, color),
        egui::epaint::StrokeKind::Outside,
    );
}

fn draw_dimensions_label(
    ui: &egui::Ui,
    width: u32,
    height: u32,
    rect: egui::Rect,
    color: egui::Color32,
) {
    ui.painter().text(
        egui::pos2(rect.right() - 4.0, rect.bottom() + 4.0),
        egui::Align2::RIGHT_TOP,
        format!("{width}x{height}"),
        egui::FontId::proportional(12.0),
        color,
    );
}
