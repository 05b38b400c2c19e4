use crate::app::FramestatApp;
use crate::panels::roi_interaction;
use crate::state::ViewportState;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 20.0;
const ZOOM_PER_SCROLL: f32 = 0.005;

/// Placement of the image on screen: maps between screen points and pixels.
#[derive(Clone, Copy)]
pub struct ImageView {
    pub rect: egui::Rect,
    pub image_size: egui::Vec2,
}

impl ImageView {
    fn new(panel: egui::Rect, image_size: egui::Vec2, viewport: &ViewportState) -> Self {
        let center = panel.center() + viewport.pan_offset;
        Self {
            rect: egui::Rect::from_center_size(center, image_size * viewport.zoom),
            image_size,
        }
    }

    /// Pixel under a screen point, clamped to the image.
    pub fn to_pixel(&self, pos: egui::Pos2) -> (u32, u32) {
        let rel = (pos - self.rect.min) / self.rect.size() * self.image_size;
        (
            rel.x.clamp(0.0, self.image_size.x).round() as u32,
            rel.y.clamp(0.0, self.image_size.y).round() as u32,
        )
    }

    /// Screen rectangle covering pixels `[min, max)`.
    pub fn to_screen(&self, (min_x, min_y, max_x, max_y): (u32, u32, u32, u32)) -> egui::Rect {
        let scale = self.rect.size() / self.image_size;
        let map = |x: u32, y: u32| self.rect.min + egui::vec2(x as f32, y as f32) * scale;
        egui::Rect::from_min_max(map(min_x, min_y), map(max_x, max_y))
    }
}

pub fn show(ctx: &egui::Context, app: &mut FramestatApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let panel = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(panel, 0.0, egui::Color32::from_gray(30));

        let Some((texture_id, image_size)) = displayed_image(&app.viewport) else {
            show_placeholder(ui);
            return;
        };

        let response = ui.allocate_rect(panel, egui::Sense::click_and_drag());
        navigate(ui, &response, &mut app.viewport, panel, image_size);

        let view = ImageView::new(panel, image_size, &app.viewport);
        roi_interaction::handle_roi_drag(&response, ui, app, &view);
        roi_interaction::handle_roi_keys(ctx, app);

        ui.painter().image(
            texture_id,
            view.rect,
            egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        roi_interaction::draw_roi_overlay(ui, app, &view);

        if !app.viewport.viewing_label.is_empty() {
            ui.painter().text(
                panel.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                &app.viewport.viewing_label,
                egui::FontId::proportional(14.0),
                egui::Color32::from_white_alpha(200),
            );
        }
    });
}

/// Texture to draw and the pixel size of the decoded image behind it.
fn displayed_image(viewport: &ViewportState) -> Option<(egui::TextureId, egui::Vec2)> {
    let texture = viewport.texture.as_ref()?;
    let [w, h] = viewport.image_size.unwrap_or(texture.size());
    Some((texture.id(), egui::vec2(w as f32, h as f32)))
}

/// Scroll zooms toward the cursor, middle or Ctrl/Cmd drag pans, double-click fits.
fn navigate(
    ui: &egui::Ui,
    response: &egui::Response,
    viewport: &mut ViewportState,
    panel: egui::Rect,
    image_size: egui::Vec2,
) {
    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll != 0.0 && response.hovered() {
        let zoom = (viewport.zoom * (scroll * ZOOM_PER_SCROLL).exp()).clamp(MIN_ZOOM, MAX_ZOOM);
        if let Some(cursor) = response.hover_pos() {
            let from_center = cursor - (panel.center() + viewport.pan_offset);
            viewport.pan_offset += from_center * (1.0 - zoom / viewport.zoom);
        }
        viewport.zoom = zoom;
    }

    let command_drag =
        response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command);
    if response.dragged_by(egui::PointerButton::Middle) || command_drag {
        viewport.pan_offset += response.drag_delta();
    }

    if response.double_clicked() {
        let fit = panel.size() / image_size;
        viewport.zoom = fit.x.min(fit.y).clamp(MIN_ZOOM, MAX_ZOOM);
        viewport.pan_offset = egui::Vec2::ZERO;
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Choose a folder of images to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
