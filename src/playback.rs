//! Timed replay of a trajectory as a growing trail of dots

use crate::trajectory::Sample;
use egui::Pos2;
use std::time::{Duration, Instant};

/// What is being replayed, decides the dot colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackKind {
    Recording,
    Model,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackDot {
    pub pos: Pos2,
    pub delay: Duration,
}

pub struct Playback {
    dots: Vec<PlaybackDot>,
    started_at: Option<Instant>,
    kind: PlaybackKind,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            dots: Vec::new(),
            started_at: None,
            kind: PlaybackKind::Recording,
        }
    }
}

impl Playback {
    /// Schedule every sample at `t / total * duration`, `total` being the last
    /// sample's timestamp. Nothing happens for an empty slice.
    pub fn play(&mut self, samples: &[Sample], duration: Duration, kind: PlaybackKind, now: Instant) {
        let Some(last) = samples.last() else {
            return;
        };
        self.clear();

        let total = last.t;
        self.dots = samples
            .iter()
            .map(|s| {
                // A zero-length recording shows everything at once
                let delay = if total == 0 {
                    Duration::ZERO
                } else {
                    duration.mul_f64(s.t as f64 / total as f64)
                };
                PlaybackDot { pos: s.pos(), delay }
            })
            .collect();
        self.started_at = Some(now);
        self.kind = kind;
    }

    pub fn kind(&self) -> PlaybackKind {
        self.kind
    }

    /// Dots whose delay has elapsed. Dots stay on screen after the replay ends.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &PlaybackDot> + '_ {
        let elapsed = self
            .started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or(Duration::ZERO);
        self.dots.iter().filter(move |d| d.delay <= elapsed)
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.started_at.is_some() && !self.is_finished(now)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.visible(now).count() == self.dots.len()
    }

    pub fn clear(&mut self) {
        self.dots.clear();
        self.started_at = None;
    }
}
