//! Recording session: the recording flag, sample acceptance and the
//! delayed wipe of recording dots once a session ends.

use crate::constants::{STATUS_IDLE, STATUS_RECORDING};
use crate::trajectory::{format_recorded_text, Sample, Trajectory};
use crate::types::Target;
use egui::{Pos2, Vec2};
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of pressing Record or one of the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Stopped,
}

pub struct Recorder {
    recording: bool,
    started_at: Option<Instant>,
    trajectory: Trajectory,
    recorded_text: String,
    pointer_over_target: bool,
    show_dots: bool,
    poll_interval: Duration,
    next_poll: Option<Instant>,
    dot_clear_delay: Duration,
    clear_dots_at: Option<Instant>,
}

impl Recorder {
    pub fn new(poll_interval: Duration, dot_clear_delay: Duration) -> Self {
        Self {
            recording: false,
            started_at: None,
            trajectory: Trajectory::new(),
            recorded_text: String::new(),
            pointer_over_target: false,
            show_dots: false,
            poll_interval,
            next_poll: None,
            dot_clear_delay,
            clear_dots_at: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn status_text(&self) -> &'static str {
        if self.recording {
            STATUS_RECORDING
        } else {
            STATUS_IDLE
        }
    }

    pub fn samples(&self) -> &[Sample] {
        self.trajectory.samples()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Recording dots currently on the canvas
    pub fn dots(&self) -> &[Sample] {
        if self.show_dots {
            self.trajectory.samples()
        } else {
            &[]
        }
    }

    pub fn recorded_text(&self) -> &str {
        &self.recorded_text
    }

    /// The text area is editable; edits last until the next regeneration
    pub fn recorded_text_mut(&mut self) -> &mut String {
        &mut self.recorded_text
    }

    pub fn set_pointer_over_target(&mut self, over: bool) {
        self.pointer_over_target = over;
    }

    pub fn start(&mut self, now: Instant) {
        self.recording = true;
        self.trajectory.clear();
        self.started_at = Some(now);
        self.show_dots = true;
        // First poll fires immediately
        self.next_poll = Some(now);
        debug!("Recording started");
    }

    pub fn stop(&mut self) {
        self.recording = false;
        self.next_poll = None;
        self.regenerate_text();
        self.show_dots = true;
        debug!(samples = self.trajectory.len(), "Recording stopped");
    }

    pub fn toggle(&mut self, tag: Option<Target>, now: Instant) -> Toggle {
        if !self.recording {
            debug!(tag = ?tag, "Toggle from idle");
            self.start(now);
            Toggle::Started
        } else {
            self.stop();
            self.clear_dots_at = Some(now + self.dot_clear_delay);
            Toggle::Stopped
        }
    }

    /// Pointer moved to canvas-local `pos`. Returns true when a sample was kept.
    pub fn record_motion(&mut self, pos: Pos2, canvas_size: Vec2, now: Instant) -> bool {
        self.try_append(pos, canvas_size, now)
    }

    pub fn poll_due(&self, now: Instant) -> bool {
        self.recording && self.next_poll.is_some_and(|at| now >= at)
    }

    /// Timer-driven sample. Unlike motion samples this also refreshes the text.
    pub fn poll(&mut self, pos: Option<Pos2>, canvas_size: Vec2, now: Instant) -> bool {
        if !self.recording {
            return false;
        }
        self.next_poll = Some(now + self.poll_interval);
        let Some(pos) = pos else {
            return false;
        };
        let accepted = self.try_append(pos, canvas_size, now);
        if accepted {
            self.regenerate_text();
        }
        accepted
    }

    /// Fires the delayed dot wipe. The wipe is skipped if a new recording is running.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.clear_dots_at {
            if now >= at {
                self.clear_dots_at = None;
                if !self.recording {
                    self.show_dots = false;
                }
            }
        }
    }

    /// Earliest moment the recorder needs another frame
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.next_poll, self.clear_dots_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drop the current recording wholesale. A running recording keeps
    /// going and its later samples still show up as dots.
    pub fn remove_last(&mut self) {
        self.show_dots = self.recording;
        self.trajectory.clear();
        self.recorded_text.clear();
    }

    /// Replace the current trajectory, e.g. with a sample from the library
    pub fn load(&mut self, samples: Vec<Sample>) {
        self.recording = false;
        self.next_poll = None;
        self.clear_dots_at = None;
        self.trajectory = Trajectory::from_samples(samples);
        self.show_dots = true;
        self.regenerate_text();
    }

    fn try_append(&mut self, pos: Pos2, canvas_size: Vec2, now: Instant) -> bool {
        if !self.recording || self.pointer_over_target {
            return false;
        }
        let in_bounds =
            (0.0..=canvas_size.x).contains(&pos.x) && (0.0..=canvas_size.y).contains(&pos.y);
        if !in_bounds {
            return false;
        }
        let t = self
            .started_at
            .map(|start| now.saturating_duration_since(start).as_millis() as u64)
            .unwrap_or(0);
        self.trajectory.push(Sample::new(pos.x, pos.y, t));
        true
    }

    fn regenerate_text(&mut self) {
        self.recorded_text = format_recorded_text(self.trajectory.samples());
    }
}
