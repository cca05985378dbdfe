//! Application constants and configuration

pub const APP_NAME: &str = "Point Recorder";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const STATUS_IDLE: &str = "Click on A to start recording.";
pub const STATUS_RECORDING: &str = "Recording...";

/// Timer-driven sampling period while recording
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// Recording dots are wiped this long after a recording stops
pub const DEFAULT_DOT_CLEAR_DELAY_MS: u64 = 5000;
/// Replays are squeezed into this window regardless of recorded length
pub const DEFAULT_PLAYBACK_DURATION_MS: u64 = 1000;
/// Number of evenly spaced steps a trained path keeps
pub const DEFAULT_MODEL_RESOLUTION: usize = 32;

/// Bumped whenever the saved model layout changes
pub const MODEL_FORMAT_VERSION: u32 = 1;

pub const TARGET_SIZE: egui::Vec2 = egui::vec2(32.0, 28.0);
/// Half the side of a drawn dot
pub const DOT_RADIUS: f32 = 1.0;

pub const DEFAULT_WINDOW_SIZE: egui::Vec2 = egui::vec2(1400.0, 600.0);
pub const DEFAULT_SIDEBAR_WIDTH: f32 = 300.0;
