//! Control bar under the canvas

use super::App;
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::time::Instant;

impl App {
    pub(crate) fn render_controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        let recording = self.recorder.is_recording();
        let has_samples = !self.recorder.samples().is_empty();
        let has_library = !self.library.is_empty();
        let has_model = self.model.is_some();

        ui.horizontal_centered(|ui| {
            let record = if recording {
                theme::button_accent(format!("{}  Record", icons::STOP))
            } else {
                theme::button(format!("{}  Record", icons::RECORD))
            };
            if ui.add(record).clicked() {
                self.toggle_recording(None, now);
            }

            if ui
                .add(theme::button(format!("{}  Remove Last", icons::ARROW_COUNTER_CLOCKWISE)))
                .clicked()
            {
                self.remove_last();
            }

            if ui
                .add_enabled(has_samples && !recording, theme::button(format!("{}  Play", icons::PLAY)))
                .clicked()
            {
                self.play(now);
            }

            if ui
                .add_enabled(has_library && !recording, theme::button_danger(format!("{}  Clear Samples", icons::TRASH)))
                .clicked()
            {
                self.clear_samples();
            }

            ui.separator();

            if ui
                .add_enabled(!recording, theme::button(format!("{}  Train Model", icons::GRAPH)))
                .clicked()
            {
                self.train_model();
            }
            if ui
                .add_enabled(has_model, theme::button(format!("{}  Save Model", icons::FLOPPY_DISK)))
                .clicked()
            {
                self.save_model();
            }
            if ui
                .add(theme::button(format!("{}  Load Model", icons::FOLDER_OPEN)))
                .clicked()
            {
                self.load_model();
            }
            if ui
                .add_enabled(has_model && !recording, theme::button(format!("{}  Test", icons::PATH)))
                .clicked()
            {
                self.test_model(now);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{} points", self.recorder.samples().len()))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
            });
        });
    }
}
