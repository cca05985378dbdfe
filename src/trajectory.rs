//! Recorded samples and the text rendering shown in the side panel

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One recorded cursor position. `t` is milliseconds since recording started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub t: u64,
}

impl Sample {
    pub fn new(x: f32, y: f32, t: u64) -> Self {
        Self { x, y, t }
    }

    pub fn pos(&self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

/// Ordered samples of a single recording.
///
/// Nothing is validated here: `t` may go backwards and the list is unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the last sample, 0 when empty
    pub fn duration_ms(&self) -> u64 {
        self.last().map(|s| s.t).unwrap_or(0)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Coordinates always print in plain decimal with a fractional part
/// (`12.0`, `12.5`, `0.00001`), never in exponent form.
pub fn format_coord(v: f32) -> String {
    let plain = v.to_string();
    if plain.contains('.') || !v.is_finite() {
        plain
    } else {
        plain + ".0"
    }
}

/// Render samples as the indented "A"/"B"/"points" block.
///
/// The output is display text only: it ends with a trailing comma and has no
/// enclosing braces. An empty slice renders as an empty string.
pub fn format_recorded_text(samples: &[Sample]) -> String {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return String::new();
    };

    let mut out = String::new();
    // Writing into a String never fails
    let _ = write_endpoint(&mut out, "A", first, 0);
    let _ = write_endpoint(&mut out, "B", last, last.t);

    out.push_str("\"points\": [\n");
    if samples.len() > 2 {
        for point in &samples[1..samples.len() - 1] {
            out.push_str("    {\n");
            let _ = writeln!(out, "        \"x\": {},", format_coord(point.x));
            let _ = writeln!(out, "        \"y\": {},", format_coord(point.y));
            let _ = writeln!(out, "        \"t\": {}", point.t);
            out.push_str("    },\n");
        }
    }
    out.push_str("],\n");
    out
}

fn write_endpoint(out: &mut String, label: &str, sample: &Sample, t: u64) -> std::fmt::Result {
    writeln!(out, "\"{}\": {{", label)?;
    writeln!(out, "    \"x\": {},", format_coord(sample.x))?;
    writeln!(out, "    \"y\": {},", format_coord(sample.y))?;
    writeln!(out, "    \"t\": {}", t)?;
    out.push_str("},\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trajectory_renders_nothing() {
        assert_eq!(format_recorded_text(&[]), "");
    }

    #[test]
    fn single_sample_uses_it_for_both_endpoints() {
        let text = format_recorded_text(&[Sample::new(10.0, 20.5, 40)]);
        let expected = "\"A\": {\n    \"x\": 10.0,\n    \"y\": 20.5,\n    \"t\": 0\n},\n\
                        \"B\": {\n    \"x\": 10.0,\n    \"y\": 20.5,\n    \"t\": 40\n},\n\
                        \"points\": [\n],\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn interior_samples_are_listed_as_points() {
        let samples = [
            Sample::new(1.0, 1.0, 12),
            Sample::new(2.0, 3.0, 30),
            Sample::new(4.0, 5.0, 55),
            Sample::new(9.0, 9.0, 80),
        ];
        let text = format_recorded_text(&samples);

        // A always reports t = 0 regardless of the first sample's time
        assert!(text.starts_with("\"A\": {\n    \"x\": 1.0,\n    \"y\": 1.0,\n    \"t\": 0\n},\n"));
        assert!(text.contains("\"B\": {\n    \"x\": 9.0,\n    \"y\": 9.0,\n    \"t\": 80\n},\n"));
        assert!(text.contains("    {\n        \"x\": 2.0,\n        \"y\": 3.0,\n        \"t\": 30\n    },\n"));
        assert!(text.contains("        \"t\": 55\n"));
        assert!(!text.contains("\"t\": 12"));
        assert_eq!(text.matches("    {\n").count(), 2);
        assert!(text.ends_with("],\n"));
    }

    #[test]
    fn two_samples_have_no_points() {
        let text = format_recorded_text(&[Sample::new(0.0, 0.0, 0), Sample::new(5.0, 5.0, 10)]);
        assert!(text.ends_with("\"points\": [\n],\n"));
    }

    #[test]
    fn duration_is_last_timestamp() {
        let mut trajectory = Trajectory::new();
        assert_eq!(trajectory.duration_ms(), 0);
        trajectory.push(Sample::new(0.0, 0.0, 5));
        trajectory.push(Sample::new(1.0, 0.0, 250));
        assert_eq!(trajectory.duration_ms(), 250);
        assert_eq!(trajectory.len(), 2);
        trajectory.clear();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn coords_keep_a_fractional_part() {
        assert_eq!(format_coord(3.0), "3.0");
        assert_eq!(format_coord(3.25), "3.25");
        assert_eq!(format_coord(-7.0), "-7.0");
    }

    #[test]
    fn tiny_and_huge_coords_avoid_exponents() {
        assert_eq!(format_coord(0.00001), "0.00001");
        let huge = format_coord(1.0e12);
        assert!(!huge.contains('e'));
        assert!(huge.ends_with(".0"));
    }
}
