//! App module - contains the main application state and logic

mod canvas;
mod controls;
mod model_ops;
mod recording;
mod sidebar;
mod toast;

use crate::db::{SampleStore, SampleSummary};
use crate::model::PathModel;
use crate::playback::Playback;
use crate::recorder::Recorder;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: SampleStore,
    pub(crate) library: Vec<SampleSummary>,
    pub(crate) selected_sample: Option<i64>,
    pub(crate) recorder: Recorder,
    pub(crate) playback: Playback,
    pub(crate) targets: TargetLayout,
    pub(crate) model: Option<PathModel>,
    // Canvas rect in screen space, from the last frame
    pub(crate) canvas_rect: Option<egui::Rect>,
    pub(crate) sidebar_width: f32,
    // Toast notification
    pub(crate) toast_message: Option<(String, ToastKind)>,
    pub(crate) toast_start: Option<Instant>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, store: SampleStore, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for the control bar
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_store(store, settings, data_dir)
    }

    /// Everything except the egui context setup
    pub(crate) fn with_store(store: SampleStore, settings: Settings, data_dir: PathBuf) -> Self {
        let model = settings
            .last_model_path
            .as_deref()
            .map(Path::new)
            .filter(|p| p.exists())
            .and_then(|p| match PathModel::load(p) {
                Ok(model) => Some(model),
                Err(e) => {
                    warn!(error = %e, path = %p.display(), "Could not reload last model");
                    None
                }
            });

        let mut app = Self {
            store,
            library: Vec::new(),
            selected_sample: None,
            recorder: Recorder::new(settings.poll_interval(), settings.dot_clear_delay()),
            playback: Playback::default(),
            targets: TargetLayout::new(settings.target_a, settings.target_b),
            model,
            canvas_rect: None,
            sidebar_width: settings.sidebar_width,
            toast_message: None,
            toast_start: None,
            settings,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        };
        app.refresh_library();
        info!(samples = app.library.len(), model = app.model.is_some(), "App state ready");
        app
    }

    pub fn save_settings(&self) {
        let (target_a, target_b) = self.targets.as_arrays();
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            sidebar_width: self.sidebar_width,
            target_a,
            target_b,
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast_message = Some((message.into(), kind));
        self.toast_start = Some(Instant::now());
    }

    /// Canvas size from the last frame, zero before the first paint
    pub(crate) fn canvas_size(&self) -> egui::Vec2 {
        self.canvas_rect.map(|r| r.size()).unwrap_or(egui::Vec2::ZERO)
    }

    /// Target centre in canvas-local coordinates
    pub(crate) fn target_center_local(&self, target: Target) -> egui::Pos2 {
        let local = egui::Rect::from_min_size(egui::Pos2::ZERO, self.canvas_size());
        self.targets.center(target, local)
    }

    /// Ask for the next frame when a timer is pending
    pub(crate) fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.playback.is_active(now) || self.toast_message.is_some() {
            ctx.request_repaint();
            return;
        }
        if let Some(deadline) = self.recorder.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::Sample;
    use std::time::Duration;

    pub(super) fn test_app() -> App {
        let store = SampleStore::open_in_memory().unwrap();
        let dir = std::env::temp_dir().join("point-recorder-tests");
        let mut app = App::with_store(store, Settings::default(), dir);
        app.canvas_rect = Some(egui::Rect::from_min_size(
            egui::pos2(300.0, 0.0),
            egui::vec2(1000.0, 500.0),
        ));
        app
    }

    /// Record a straight sweep from A to B in canvas-local coordinates
    pub(super) fn record_sweep(app: &mut App, t0: Instant) {
        app.toggle_recording(Some(Target::A), t0);
        let size = app.canvas_size();
        for i in 0..=10u64 {
            let x = 50.0 + 90.0 * i as f32;
            let y = 250.0 + if i % 2 == 0 { 0.0 } else { 15.0 };
            app.recorder
                .record_motion(egui::pos2(x, y), size, t0 + Duration::from_millis(20 * i + 1));
        }
        app.toggle_recording(Some(Target::B), t0 + Duration::from_millis(300));
    }

    #[test]
    fn new_app_starts_idle_with_empty_library() {
        let app = test_app();
        assert!(!app.recorder.is_recording());
        assert!(app.library.is_empty());
        assert!(app.model.is_none());
    }

    #[test]
    fn target_centres_follow_canvas_size() {
        let app = test_app();
        assert_eq!(app.target_center_local(Target::A), egui::pos2(50.0, 250.0));
        assert_eq!(app.target_center_local(Target::B), egui::pos2(950.0, 250.0));
    }

    #[test]
    fn finished_recording_lands_in_library() {
        let mut app = test_app();
        record_sweep(&mut app, Instant::now());
        assert_eq!(app.library.len(), 1);
        assert_eq!(app.library[0].point_count, 11);
        let stored = app.store.load_points(app.library[0].id).unwrap().unwrap();
        assert_eq!(stored, app.recorder.samples().to_vec());
        assert_eq!(stored[0], Sample::new(50.0, 250.0, 1));
    }
}
