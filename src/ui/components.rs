//! Reusable UI components
//!
//! Painting helpers shared by the canvas and the side panel.

use crate::constants::DOT_RADIUS;
use crate::theme;
use crate::types::ToastKind;
use eframe::egui;

/// Paint a recorded or replayed point as a small filled square.
/// `origin` is the canvas' top-left corner in screen space.
pub fn paint_dot(painter: &egui::Painter, origin: egui::Pos2, x: f32, y: f32, color: egui::Color32) {
    let center = origin + egui::vec2(x, y);
    let rect = egui::Rect::from_center_size(center, egui::Vec2::splat(DOT_RADIUS * 2.0));
    painter.rect_filled(rect, 0.0, color);
}

/// Paint an A/B target as a push button reacting to hover, press and drag
pub fn paint_target(painter: &egui::Painter, rect: egui::Rect, label: &str, response: &egui::Response) {
    let (fill, draw_rect) = theme::button_visual(response, theme::TARGET_FILL, rect);
    painter.rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    painter.rect_stroke(
        draw_rect,
        theme::RADIUS_DEFAULT,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::TARGET_BORDER),
        egui::StrokeKind::Inside,
    );
    painter.text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_TARGET),
        theme::TARGET_TEXT,
    );
}

/// Toast body; `alpha` fades the whole thing out
pub fn toast_frame(ui: &mut egui::Ui, message: &str, kind: ToastKind, alpha: f32) {
    let border = match kind {
        ToastKind::Info => theme::ACCENT,
        ToastKind::Error => theme::STATUS_ERROR,
    };
    let fade = |c: egui::Color32, max: f32| {
        egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (max * alpha) as u8)
    };
    egui::Frame::new()
        .fill(fade(egui::Color32::from_rgb(0x1a, 0x1a, 0x1e), 230.0))
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fade(border, 100.0)))
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::symmetric(16, 10))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(message).color(fade(theme::TEXT_PRIMARY, 255.0)));
        });
}
