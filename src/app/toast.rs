//! Toast notification in the bottom-right corner of the canvas

use super::App;
use crate::ui::components::toast_frame;
use eframe::egui;

const VISIBLE_SECS: f32 = 3.0;
const FADE_SECS: f32 = 0.5;

impl App {
    /// 3s visible then fade, paused while hovered
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some((msg, kind)), Some(panel_rect)) = (self.toast_message.clone(), self.canvas_rect) else {
            return;
        };
        let total = VISIBLE_SECS + FADE_SECS;
        let margin = 12.0;
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > VISIBLE_SECS {
            ((total - elapsed) / FADE_SECS).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| toast_frame(ui, &msg, kind, alpha));

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total {
            self.toast_message = None;
            self.toast_start = None;
        }
    }
}
