//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,
    pub sidebar_width: f32,

    // Targets, relative to the canvas
    pub target_a: [f32; 2],
    pub target_b: [f32; 2],

    // Timing
    pub poll_interval_ms: u64,
    pub dot_clear_delay_ms: u64,
    pub playback_duration_ms: u64,

    // Model
    pub model_resolution: usize,
    pub last_model_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            target_a: [0.05, 0.5],
            target_b: [0.95, 0.5],
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            dot_clear_delay_ms: DEFAULT_DOT_CLEAR_DELAY_MS,
            playback_duration_ms: DEFAULT_PLAYBACK_DURATION_MS,
            model_resolution: DEFAULT_MODEL_RESOLUTION,
            last_model_path: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// A zero interval would spin the repaint loop
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    pub fn dot_clear_delay(&self) -> Duration {
        Duration::from_millis(self.dot_clear_delay_ms)
    }

    pub fn playback_duration(&self) -> Duration {
        Duration::from_millis(self.playback_duration_ms)
    }
}
