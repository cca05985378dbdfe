//! Recording, replay and sample library actions

use super::App;
use crate::playback::PlaybackKind;
use crate::recorder::Toggle;
use crate::types::{Target, ToastKind};
use std::time::Instant;
use tracing::{debug, error, info, warn};

impl App {
    pub(crate) fn toggle_recording(&mut self, tag: Option<Target>, now: Instant) {
        match self.recorder.toggle(tag, now) {
            Toggle::Started => {
                self.selected_sample = None;
                info!(tag = ?tag, "Recording started");
            }
            Toggle::Stopped => {
                let samples = self.recorder.samples();
                info!(samples = samples.len(), duration_ms = self.recorder.trajectory().duration_ms(), "Recording stopped");
                if samples.is_empty() {
                    return;
                }
                match self.store.insert(samples) {
                    Ok(id) => {
                        self.selected_sample = Some(id);
                        self.refresh_library();
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to store sample");
                        self.show_toast(format!("Could not store sample: {}", e), ToastKind::Error);
                    }
                }
            }
        }
    }

    /// Discard the current recording. The library entry it was stored as,
    /// or loaded from, goes with it; a running recording has none yet.
    pub(crate) fn remove_last(&mut self) {
        self.recorder.remove_last();
        self.playback.clear();
        let Some(id) = self.selected_sample.take() else {
            debug!("No stored sample behind the current trajectory");
            return;
        };
        match self.store.delete(id) {
            Ok(true) => info!(id, "Removed sample"),
            Ok(false) => debug!(id, "Sample already gone"),
            Err(e) => warn!(id, error = %e, "Failed to delete sample"),
        }
        self.refresh_library();
    }

    pub(crate) fn play(&mut self, now: Instant) {
        let duration = self.settings.playback_duration();
        self.playback
            .play(self.recorder.samples(), duration, PlaybackKind::Recording, now);
    }

    pub(crate) fn clear_samples(&mut self) {
        match self.store.clear() {
            Ok(removed) => {
                info!(removed, "Sample library cleared");
                self.selected_sample = None;
                self.show_toast(format!("Cleared {} samples", removed), ToastKind::Info);
            }
            Err(e) => {
                error!(error = %e, "Failed to clear samples");
                self.show_toast(format!("Could not clear samples: {}", e), ToastKind::Error);
            }
        }
        self.refresh_library();
    }

    /// Make a library entry the current trajectory
    pub(crate) fn load_sample(&mut self, id: i64) {
        if self.recorder.is_recording() {
            return;
        }
        match self.store.load_points(id) {
            Ok(Some(points)) => {
                debug!(id, points = points.len(), "Sample loaded");
                self.recorder.load(points);
                self.playback.clear();
                self.selected_sample = Some(id);
            }
            Ok(None) => {
                warn!(id, "Sample vanished from library");
                self.refresh_library();
            }
            Err(e) => {
                error!(id, error = %e, "Failed to load sample");
                self.show_toast(format!("Could not load sample: {}", e), ToastKind::Error);
            }
        }
    }

    pub(crate) fn refresh_library(&mut self) {
        match self.store.list() {
            Ok(list) => self.library = list,
            Err(e) => error!(error = %e, "Failed to list samples"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{record_sweep, test_app};
    use crate::types::Target;
    use std::time::{Duration, Instant};

    #[test]
    fn empty_recording_is_not_stored() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.toggle_recording(Some(Target::A), t0);
        app.toggle_recording(Some(Target::B), t0 + Duration::from_millis(50));
        assert!(app.library.is_empty());
    }

    #[test]
    fn remove_last_clears_recording_and_its_entry() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);
        let older = app.library[0].id;
        record_sweep(&mut app, t0 + Duration::from_secs(1));
        assert_eq!(app.library.len(), 2);

        app.play(t0);
        app.remove_last();
        assert!(app.recorder.samples().is_empty());
        assert!(app.recorder.recorded_text().is_empty());
        assert_eq!(app.playback.visible(t0 + Duration::from_secs(5)).count(), 0);
        assert_eq!(app.library.len(), 1);
        assert_eq!(app.library[0].id, older);
        assert_eq!(app.selected_sample, None);
    }

    #[test]
    fn second_remove_last_leaves_library_alone() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);
        record_sweep(&mut app, t0 + Duration::from_secs(1));

        app.remove_last();
        app.remove_last();
        assert_eq!(app.library.len(), 1);
    }

    #[test]
    fn remove_last_after_loading_deletes_the_loaded_entry() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);
        let older = app.library[0].id;
        record_sweep(&mut app, t0 + Duration::from_secs(1));
        let newer = app.library[0].id;

        app.load_sample(older);
        app.remove_last();
        assert_eq!(app.library.len(), 1);
        assert_eq!(app.library[0].id, newer);
    }

    #[test]
    fn remove_last_while_recording_keeps_library_and_dots() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);

        let t1 = t0 + Duration::from_secs(1);
        app.toggle_recording(Some(Target::A), t1);
        let size = app.canvas_size();
        app.recorder.record_motion(egui::pos2(100.0, 200.0), size, t1);
        app.remove_last();
        assert!(app.recorder.is_recording());
        assert_eq!(app.library.len(), 1);

        app.recorder
            .record_motion(egui::pos2(120.0, 210.0), size, t1 + Duration::from_millis(20));
        app.recorder
            .record_motion(egui::pos2(140.0, 220.0), size, t1 + Duration::from_millis(40));
        assert_eq!(app.recorder.dots().len(), 2);

        app.toggle_recording(Some(Target::B), t1 + Duration::from_millis(100));
        assert_eq!(app.library.len(), 2);
        assert_eq!(app.library[0].point_count, 2);
    }

    #[test]
    fn play_without_samples_does_nothing() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.play(t0);
        assert!(!app.playback.is_active(t0));
    }

    #[test]
    fn play_replays_current_trajectory() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);
        app.play(t0);
        assert_eq!(
            app.playback.visible(t0 + Duration::from_secs(1)).count(),
            app.recorder.samples().len()
        );
    }

    #[test]
    fn library_entries_can_be_reloaded() {
        let mut app = test_app();
        let t0 = Instant::now();
        record_sweep(&mut app, t0);
        let id = app.library[0].id;
        let recorded = app.recorder.samples().to_vec();

        app.remove_last();
        record_sweep(&mut app, t0);
        let newer = app.library[0].id;
        app.recorder.remove_last();

        app.load_sample(newer);
        assert_eq!(app.recorder.samples(), recorded.as_slice());
        assert_eq!(app.selected_sample, Some(newer));
        assert_ne!(id, newer);
    }

    #[test]
    fn clear_samples_empties_library_but_keeps_recording() {
        let mut app = test_app();
        record_sweep(&mut app, Instant::now());
        app.clear_samples();
        assert!(app.library.is_empty());
        assert!(!app.recorder.samples().is_empty());
        assert!(app.toast_message.is_some());
    }
}
