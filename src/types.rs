//! Common types and data structures

use crate::constants::TARGET_SIZE;
use egui::{Pos2, Rect, Vec2};

/// The two on-canvas targets a trajectory runs between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    A,
    B,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::A, Target::B];

    pub fn label(self) -> &'static str {
        match self {
            Target::A => "A",
            Target::B => "B",
        }
    }
}

/// Target anchors stored relative to the canvas (0..=1 on both axes),
/// so resizing the window keeps them in place proportionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLayout {
    a: Vec2,
    b: Vec2,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self::new([0.05, 0.5], [0.95, 0.5])
    }
}

impl TargetLayout {
    pub fn new(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            a: clamp_relative(egui::vec2(a[0], a[1])),
            b: clamp_relative(egui::vec2(b[0], b[1])),
        }
    }

    pub fn relative(&self, target: Target) -> Vec2 {
        match target {
            Target::A => self.a,
            Target::B => self.b,
        }
    }

    pub fn as_arrays(&self) -> ([f32; 2], [f32; 2]) {
        ([self.a.x, self.a.y], [self.b.x, self.b.y])
    }

    /// Centre of a target inside `canvas`
    pub fn center(&self, target: Target, canvas: Rect) -> Pos2 {
        canvas.min + self.relative(target) * canvas.size()
    }

    pub fn rect(&self, target: Target, canvas: Rect) -> Rect {
        Rect::from_center_size(self.center(target, canvas), TARGET_SIZE)
    }

    /// Move a target by a pixel delta. A degenerate canvas leaves it untouched.
    pub fn drag_by(&mut self, target: Target, delta: Vec2, canvas_size: Vec2) {
        if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
            return;
        }
        let slot = match target {
            Target::A => &mut self.a,
            Target::B => &mut self.b,
        };
        *slot = clamp_relative(*slot + delta / canvas_size);
    }
}

fn clamp_relative(v: Vec2) -> Vec2 {
    let fix = |c: f32| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.5 };
    egui::vec2(fix(v.x), fix(v.y))
}

/// Toast severity, drives the border colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(1000.0, 400.0))
    }

    #[test]
    fn default_layout_sits_near_the_side_edges() {
        let layout = TargetLayout::default();
        assert_eq!(layout.center(Target::A, canvas()), egui::pos2(150.0, 250.0));
        assert_eq!(layout.center(Target::B, canvas()), egui::pos2(1050.0, 250.0));
    }

    #[test]
    fn drag_moves_in_pixels_and_stays_on_canvas() {
        let mut layout = TargetLayout::default();
        layout.drag_by(Target::A, egui::vec2(100.0, -40.0), canvas().size());
        let rel = layout.relative(Target::A);
        assert!((rel.x - 0.15).abs() < 1e-5);
        assert!((rel.y - 0.4).abs() < 1e-5);

        layout.drag_by(Target::B, egui::vec2(5000.0, 5000.0), canvas().size());
        assert_eq!(layout.relative(Target::B), egui::vec2(1.0, 1.0));
    }

    #[test]
    fn drag_on_empty_canvas_is_ignored() {
        let mut layout = TargetLayout::default();
        layout.drag_by(Target::A, egui::vec2(10.0, 10.0), Vec2::ZERO);
        assert_eq!(layout, TargetLayout::default());
    }

    #[test]
    fn target_rect_is_centred_on_anchor() {
        let layout = TargetLayout::default();
        let rect = layout.rect(Target::B, canvas());
        assert_eq!(rect.center(), egui::pos2(1050.0, 250.0));
        assert_eq!(rect.size(), TARGET_SIZE);
    }

    #[test]
    fn stored_positions_are_sanitised() {
        let layout = TargetLayout::new([-1.0, f32::NAN], [2.0, 0.25]);
        assert_eq!(layout.relative(Target::A), egui::vec2(0.0, 0.5));
        assert_eq!(layout.relative(Target::B), egui::vec2(1.0, 0.25));
    }
}
