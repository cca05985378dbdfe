//! Side panel: status, recorded text and the sample library

use super::App;
use crate::theme;
use crate::utils::format_duration_ms;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use tracing::warn;

impl App {
    pub(crate) fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        let status_color = if self.recorder.is_recording() {
            theme::STATUS_RECORDING
        } else {
            theme::TEXT_SECONDARY
        };
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.recorder.status_text())
                    .size(theme::FONT_BODY)
                    .color(status_color),
            );
        });
        ui.add_space(theme::SPACING_SM);

        // Recorded text takes what the library leaves over
        let library_height = (ui.available_height() * 0.35).max(120.0);
        let text_height = (ui.available_height() - library_height - theme::SPACING_LG * 3.0).max(80.0);

        theme::section_frame().show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("recorded_text")
                .max_height(text_height)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(self.recorder.recorded_text_mut())
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .desired_rows(20)
                            .frame(false),
                    );
                });
        });

        ui.add_space(theme::SPACING_LG);
        self.render_library(ui);
    }

    fn render_library(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("SAMPLES ({})", self.library.len()))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let folder = ui
                    .add(egui::Button::new(egui_phosphor::regular::FOLDER_OPEN).frame(false))
                    .on_hover_text("Open data folder");
                if folder.clicked() {
                    if let Err(e) = open::that(&self.data_dir) {
                        warn!(error = %e, "Failed to open data folder");
                    }
                }
                if let Some(model) = &self.model {
                    ui.label(
                        egui::RichText::new(format!(
                            "model: {} samples, {}",
                            model.sample_count,
                            format_duration_ms(model.mean_duration_ms)
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                    )
                    .on_hover_text(format!("{} path steps", model.resolution()));
                }
            });
        });

        if self.library.is_empty() {
            ui.label(
                egui::RichText::new("Finished recordings appear here.")
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_DIM),
            );
            return;
        }

        let enabled = !self.recorder.is_recording();
        let mut clicked = None;
        ui.add_enabled_ui(enabled, |ui| {
            TableBuilder::new(ui)
                .id_salt("sample_library")
                .striped(true)
                .sense(egui::Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(36.0))
                .column(Column::remainder())
                .column(Column::auto().at_least(48.0))
                .column(Column::auto().at_least(56.0))
                .header(theme::LIBRARY_ROW_HEIGHT, |mut header| {
                    for title in ["#", "RECORDED", "POINTS", "LENGTH"] {
                        header.col(|ui| {
                            ui.label(
                                egui::RichText::new(title)
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            );
                        });
                    }
                })
                .body(|body| {
                    body.rows(theme::LIBRARY_ROW_HEIGHT, self.library.len(), |mut row| {
                        let entry = &self.library[row.index()];
                        row.set_selected(self.selected_sample == Some(entry.id));
                        row.col(|ui| {
                            ui.label(entry.id.to_string());
                        });
                        row.col(|ui| {
                            let local = entry.created_at.with_timezone(&chrono::Local);
                            ui.label(local.format("%Y-%m-%d %H:%M:%S").to_string());
                        });
                        row.col(|ui| {
                            ui.label(entry.point_count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format_duration_ms(entry.duration_ms));
                        });
                        if row.response().clicked() {
                            clicked = Some(entry.id);
                        }
                    });
                });
        });

        if let Some(id) = clicked {
            self.load_sample(id);
        }
    }
}
