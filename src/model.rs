//! Averaged path model trained from the sample library.
//!
//! Every sample is mapped into a frame where its first point sits at (0, 0)
//! and its last at (1, 0), with time scaled to 0..=1. The model keeps the
//! mean of those normalised paths on a fixed grid of time steps, which can
//! then be stretched back between any pair of targets.

use crate::constants::MODEL_FORMAT_VERSION;
use crate::trajectory::Sample;
use chrono::{DateTime, Utc};
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to access model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No usable samples to train on (need at least two points, distinct endpoints and a non-zero duration)")]
    NoUsableSamples,

    #[error("Unsupported model version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Model contains no path")]
    EmptyPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathModel {
    pub version: u32,
    /// Mean normalised path, `[along, across]` per time step
    pub path: Vec<[f32; 2]>,
    pub mean_duration_ms: u64,
    pub sample_count: usize,
    pub trained_at: DateTime<Utc>,
}

impl PathModel {
    /// Average every usable sample on `resolution` time steps (at least 2).
    pub fn train(samples: &[Vec<Sample>], resolution: usize) -> Result<Self, ModelError> {
        let resolution = resolution.max(2);
        let normalised: Vec<(Vec<[f32; 2]>, u64)> = samples
            .iter()
            .filter_map(|s| normalise(s, resolution))
            .collect();

        if normalised.is_empty() {
            return Err(ModelError::NoUsableSamples);
        }

        let n = normalised.len();
        let mut path = vec![[0.0_f32; 2]; resolution];
        let mut duration_sum = 0u64;
        for (steps, duration) in &normalised {
            for (acc, step) in path.iter_mut().zip(steps) {
                acc[0] += step[0];
                acc[1] += step[1];
            }
            duration_sum += duration;
        }
        for step in &mut path {
            step[0] /= n as f32;
            step[1] /= n as f32;
        }

        info!(
            used = n,
            skipped = samples.len() - n,
            resolution,
            "Path model trained"
        );

        Ok(Self {
            version: MODEL_FORMAT_VERSION,
            path,
            mean_duration_ms: duration_sum / n as u64,
            sample_count: n,
            trained_at: Utc::now(),
        })
    }

    /// Stretch the mean path between `a` and `b`, timed with the mean duration
    pub fn generate(&self, a: Pos2, b: Pos2) -> Vec<Sample> {
        let along = b - a;
        let across = along.rot90();
        let last = self.path.len().saturating_sub(1).max(1) as f64;

        self.path
            .iter()
            .enumerate()
            .map(|(i, [u, v])| {
                let p = a + along * *u + across * *v;
                let t = (self.mean_duration_ms as f64 * i as f64 / last).round() as u64;
                Sample::new(p.x, p.y, t)
            })
            .collect()
    }

    pub fn resolution(&self) -> usize {
        self.path.len()
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Model saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&json)?;
        if model.version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: model.version,
                expected: MODEL_FORMAT_VERSION,
            });
        }
        if model.path.is_empty() {
            return Err(ModelError::EmptyPath);
        }
        info!(path = %path.display(), samples = model.sample_count, "Model loaded");
        Ok(model)
    }
}

/// Map one sample into the unit A→B frame and resample it by time.
fn normalise(samples: &[Sample], resolution: usize) -> Option<(Vec<[f32; 2]>, u64)> {
    let (first, last) = match samples {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let origin = first.pos();
    let along = last.pos() - origin;
    let len_sq = along.length_sq();
    if len_sq <= f32::EPSILON {
        debug!("Skipping sample with coincident endpoints");
        return None;
    }
    if last.t <= first.t {
        debug!("Skipping sample without forward duration");
        return None;
    }
    let span = (last.t - first.t) as f32;
    let across = along.rot90();

    // (time, along, across); recorded time is not guaranteed monotonic
    let mut points: Vec<(f32, f32, f32)> = samples
        .iter()
        .map(|s| {
            let r: Vec2 = s.pos() - origin;
            let tau = (s.t.saturating_sub(first.t)) as f32 / span;
            (tau.min(1.0), r.dot(along) / len_sq, r.dot(across) / len_sq)
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let steps = (0..resolution)
        .map(|k| {
            let tau = k as f32 / (resolution - 1) as f32;
            interpolate(&points, tau)
        })
        .collect();

    Some((steps, last.t - first.t))
}

fn interpolate(points: &[(f32, f32, f32)], tau: f32) -> [f32; 2] {
    let idx = points.partition_point(|p| p.0 < tau);
    if idx == 0 {
        let p = points[0];
        return [p.1, p.2];
    }
    if idx >= points.len() {
        let p = points[points.len() - 1];
        return [p.1, p.2];
    }
    let (lo, hi) = (points[idx - 1], points[idx]);
    let width = hi.0 - lo.0;
    if width <= f32::EPSILON {
        return [hi.1, hi.2];
    }
    let w = (tau - lo.0) / width;
    [lo.1 + (hi.1 - lo.1) * w, lo.2 + (hi.2 - lo.2) * w]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(from: (f32, f32), to: (f32, f32), duration: u64) -> Vec<Sample> {
        (0..=4)
            .map(|i| {
                let f = i as f32 / 4.0;
                Sample::new(
                    from.0 + (to.0 - from.0) * f,
                    from.1 + (to.1 - from.1) * f,
                    duration * i / 4,
                )
            })
            .collect()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn straight_samples_train_a_straight_path() {
        let samples = vec![
            straight((0.0, 0.0), (100.0, 0.0), 400),
            straight((50.0, 50.0), (50.0, 250.0), 800),
        ];
        let model = PathModel::train(&samples, 5).unwrap();
        assert_eq!(model.sample_count, 2);
        assert_eq!(model.mean_duration_ms, 600);
        assert_eq!(model.resolution(), 5);
        for (i, [u, v]) in model.path.iter().enumerate() {
            assert!(close(*u, i as f32 / 4.0), "step {i}: u = {u}");
            assert!(close(*v, 0.0), "step {i}: v = {v}");
        }
    }

    #[test]
    fn generated_path_runs_between_new_targets() {
        let model = PathModel::train(&[straight((0.0, 0.0), (10.0, 0.0), 100)], 3).unwrap();
        let out = model.generate(egui::pos2(20.0, 20.0), egui::pos2(20.0, 120.0));
        assert_eq!(out.len(), 3);
        assert!(close(out[0].x, 20.0) && close(out[0].y, 20.0));
        assert!(close(out[1].x, 20.0) && close(out[1].y, 70.0));
        assert!(close(out[2].x, 20.0) && close(out[2].y, 120.0));
        assert_eq!(out[0].t, 0);
        assert_eq!(out[2].t, 100);
    }

    #[test]
    fn sideways_bulge_is_preserved() {
        // Arc bending to one side of the A→B line
        let arc = vec![
            Sample::new(0.0, 0.0, 0),
            Sample::new(50.0, 20.0, 50),
            Sample::new(100.0, 0.0, 100),
        ];
        let model = PathModel::train(&[arc], 3).unwrap();
        let mid = model.path[1];
        assert!(close(mid[0], 0.5));
        assert!(close(mid[1].abs(), 0.2));

        let out = model.generate(egui::pos2(0.0, 0.0), egui::pos2(200.0, 0.0));
        assert!(close(out[1].y.abs(), 40.0));
    }

    #[test]
    fn unusable_samples_are_skipped() {
        let samples = vec![
            vec![Sample::new(1.0, 1.0, 0)],
            vec![Sample::new(1.0, 1.0, 0), Sample::new(1.0, 1.0, 100)],
            vec![Sample::new(0.0, 0.0, 50), Sample::new(10.0, 0.0, 50)],
            straight((0.0, 0.0), (10.0, 10.0), 200),
        ];
        let model = PathModel::train(&samples, 8).unwrap();
        assert_eq!(model.sample_count, 1);
    }

    #[test]
    fn training_without_usable_samples_fails() {
        assert!(matches!(PathModel::train(&[], 8), Err(ModelError::NoUsableSamples)));
        let only_dot = vec![vec![Sample::new(3.0, 3.0, 10)]];
        assert!(matches!(PathModel::train(&only_dot, 8), Err(ModelError::NoUsableSamples)));
    }

    #[test]
    fn save_and_load_preserve_the_model() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("model.json");
        let model = PathModel::train(&[straight((0.0, 0.0), (30.0, 40.0), 300)], 4).unwrap();
        model.save(&file).unwrap();

        let loaded = PathModel::load(&file).unwrap();
        assert_eq!(loaded.version, model.version);
        assert_eq!(loaded.mean_duration_ms, 300);
        assert_eq!(loaded.sample_count, 1);
        assert_eq!(loaded.trained_at, model.trained_at);
        assert_eq!(loaded.resolution(), model.resolution());
        for (a, b) in loaded.path.iter().zip(&model.path) {
            assert!(close(a[0], b[0]) && close(a[1], b[1]));
        }
    }

    #[test]
    fn load_rejects_other_versions_and_empty_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = PathModel::train(&[straight((0.0, 0.0), (30.0, 40.0), 300)], 4).unwrap();

        model.version = MODEL_FORMAT_VERSION + 1;
        let file = dir.path().join("future.json");
        model.save(&file).unwrap();
        assert!(matches!(
            PathModel::load(&file),
            Err(ModelError::UnsupportedVersion { .. })
        ));

        model.version = MODEL_FORMAT_VERSION;
        model.path.clear();
        let file = dir.path().join("empty.json");
        model.save(&file).unwrap();
        assert!(matches!(PathModel::load(&file), Err(ModelError::EmptyPath)));
    }

    #[test]
    fn load_reports_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("garbage.json");
        std::fs::write(&file, "\"A\": {").unwrap();
        assert!(matches!(PathModel::load(&file), Err(ModelError::Json(_))));
        assert!(matches!(
            PathModel::load(&dir.path().join("missing.json")),
            Err(ModelError::Io(_))
        ));
    }
}
