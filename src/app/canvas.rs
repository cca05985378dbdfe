//! Drawing canvas: targets, recording dots, replay dots and pointer sampling

use super::App;
use crate::playback::PlaybackKind;
use crate::theme;
use crate::types::Target;
use crate::ui::components::{paint_dot, paint_target};
use eframe::egui;
use std::time::Instant;

impl App {
    pub(crate) fn render_canvas(&mut self, ui: &mut egui::Ui, now: Instant) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        let origin = rect.min;
        self.canvas_rect = Some(rect);

        painter.rect_filled(rect, 0.0, theme::CANVAS_BG);

        // Targets take input before sampling so hovering them is known this frame
        let mut over_target = false;
        let mut target_responses = Vec::with_capacity(Target::ALL.len());
        for target in Target::ALL {
            let target_rect = self.targets.rect(target, rect);
            let id = ui.id().with(("target", target.label()));
            let target_response = ui.interact(target_rect, id, egui::Sense::click_and_drag());

            if target_response.hovered() || target_response.dragged() {
                over_target = true;
            }
            if target_response.dragged() {
                self.targets
                    .drag_by(target, target_response.drag_delta(), rect.size());
            }
            if target_response.clicked() {
                self.toggle_recording(Some(target), now);
            }
            target_responses.push((target, target_response));
        }
        self.recorder.set_pointer_over_target(over_target);

        self.sample_pointer(ui.ctx(), rect, now);

        for sample in self.recorder.dots() {
            paint_dot(&painter, origin, sample.x, sample.y, theme::DOT_RECORDED);
        }
        let replay_color = match self.playback.kind() {
            PlaybackKind::Recording => theme::DOT_PLAYBACK,
            PlaybackKind::Model => theme::DOT_MODEL,
        };
        for dot in self.playback.visible(now) {
            paint_dot(&painter, origin, dot.pos.x, dot.pos.y, replay_color);
        }

        // Positions may have moved while dragging
        for (target, target_response) in &target_responses {
            let target_rect = self.targets.rect(*target, rect);
            paint_target(&painter, target_rect, target.label(), target_response);
        }

        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(theme::CANVAS_BORDER_WIDTH, theme::CANVAS_BORDER),
            egui::StrokeKind::Inside,
        );
    }

    /// Motion samples on every pointer move, plus the polling timer
    fn sample_pointer(&mut self, ctx: &egui::Context, rect: egui::Rect, now: Instant) {
        if !self.recorder.is_recording() {
            return;
        }
        let (hover, moving) = ctx.input(|i| (i.pointer.hover_pos(), i.pointer.is_moving()));
        let local = hover.map(|p| (p - rect.min).to_pos2());
        let size = rect.size();

        if moving {
            if let Some(pos) = local {
                self.recorder.record_motion(pos, size, now);
            }
        }
        if self.recorder.poll_due(now) {
            self.recorder.poll(local, size, now);
        }
    }
}
