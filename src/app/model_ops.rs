//! Train / Save / Load / Test actions for the path model

use super::App;
use crate::model::{ModelError, PathModel};
use crate::playback::PlaybackKind;
use crate::types::{Target, ToastKind};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

impl App {
    pub(crate) fn train_model(&mut self) {
        let samples = match self.store.load_all_points() {
            Ok(samples) => samples,
            Err(e) => {
                error!(error = %e, "Failed to read samples for training");
                self.show_toast(format!("Could not read samples: {}", e), ToastKind::Error);
                return;
            }
        };

        match PathModel::train(&samples, self.settings.model_resolution) {
            Ok(model) => {
                self.show_toast(
                    format!("Model trained on {} of {} samples", model.sample_count, samples.len()),
                    ToastKind::Info,
                );
                self.model = Some(model);
            }
            Err(e) => {
                warn!(error = %e, "Training failed");
                self.show_toast(e.to_string(), ToastKind::Error);
            }
        }
    }

    pub(crate) fn save_model(&mut self) {
        if self.model.is_none() {
            self.show_toast("Train or load a model first", ToastKind::Error);
            return;
        }
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Path model", &["json"])
            .set_file_name("model.json");
        if let Some(dir) = self.last_model_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.save_model_to(&path);
        }
    }

    pub(crate) fn save_model_to(&mut self, path: &Path) {
        let Some(model) = &self.model else {
            return;
        };
        match model.save(path) {
            Ok(()) => {
                self.settings.last_model_path = Some(path.to_string_lossy().to_string());
                self.show_toast("Model saved", ToastKind::Info);
            }
            Err(e) => self.report_model_error("save", &e),
        }
    }

    pub(crate) fn load_model(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Path model", &["json"]);
        if let Some(dir) = self.last_model_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_model_from(&path);
        }
    }

    pub(crate) fn load_model_from(&mut self, path: &Path) {
        match PathModel::load(path) {
            Ok(model) => {
                self.settings.last_model_path = Some(path.to_string_lossy().to_string());
                self.show_toast(
                    format!("Model loaded ({} samples)", model.sample_count),
                    ToastKind::Info,
                );
                self.model = Some(model);
            }
            Err(e) => self.report_model_error("load", &e),
        }
    }

    /// Replay the model's path between the current targets
    pub(crate) fn test_model(&mut self, now: Instant) {
        let a = self.target_center_local(Target::A);
        let b = self.target_center_local(Target::B);
        let Some(model) = &self.model else {
            self.show_toast("Train or load a model first", ToastKind::Error);
            return;
        };
        let path = model.generate(a, b);
        info!(points = path.len(), duration_ms = model.mean_duration_ms, "Testing model");

        let duration = self.settings.playback_duration();
        self.playback.play(&path, duration, PlaybackKind::Model, now);
    }

    fn last_model_dir(&self) -> Option<PathBuf> {
        self.settings
            .last_model_path
            .as_deref()
            .and_then(|p| Path::new(p).parent())
            .map(Path::to_path_buf)
    }

    fn report_model_error(&mut self, action: &str, e: &ModelError) {
        error!(action, error = %e, "Model operation failed");
        self.show_toast(format!("Could not {} model: {}", action, e), ToastKind::Error);
    }
}
