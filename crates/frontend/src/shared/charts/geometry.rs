//! Scales, ticks and SVG path strings for the chart components.
//!
//! Everything here is plain arithmetic so it can be unit tested without a DOM.

use std::f64::consts::{FRAC_PI_2, TAU};

pub const PALETTE: [&str; 8] = [
    "#f59e0b", "#3b82f6", "#10b981", "#a7f3d0", "#9333ea", "#ef4444", "#6366f1", "#f97316",
];

pub fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// SVG attribute text for a coordinate
pub fn coord(v: f64) -> String {
    format!("{:.2}", v)
}

/// Plot area inside an SVG viewBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.left - self.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(0.0)
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Rounds up to 1, 2, 2.5, 5 or 10 times a power of ten
pub fn nice_max(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    let fraction = value / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|step| fraction <= *step + 1e-9)
        .unwrap_or(10.0);
    nice * magnitude
}

/// `count + 1` evenly spaced ticks from 0 to `max`
pub fn ticks(max: f64, count: usize) -> Vec<f64> {
    let count = count.max(1);
    (0..=count).map(|i| max * i as f64 / count as f64).collect()
}

/// Linear map of `value` in `0..=max` onto `0..=length`
pub fn scale(value: f64, max: f64, length: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0) * length
}

/// Centre of band `index` out of `count` equal bands over `length`
pub fn band_center(index: usize, count: usize, length: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let band = length / count as f64;
    band * index as f64 + band / 2.0
}

/// Polyline through `points`
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            path.push(' ');
        }
        path.push_str(&format!("{} {:.2} {:.2}", if i == 0 { 'M' } else { 'L' }, x, y));
    }
    path
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    // 0 rad points up, angles run clockwise
    let a = angle - FRAC_PI_2;
    (cx + radius * a.cos(), cy + radius * a.sin())
}

/// Donut segment between `start` and `end` (radians, clockwise from 12 o'clock)
pub fn arc_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    // A full circle arc has identical end points and would draw nothing
    let end = if end - start >= TAU { start + TAU - 1e-4 } else { end };
    let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
    let (x0, y0) = polar(cx, cy, outer, start);
    let (x1, y1) = polar(cx, cy, outer, end);
    let (x2, y2) = polar(cx, cy, inner, end);
    let (x3, y3) = polar(cx, cy, inner, start);
    format!(
        "M {x0:.2} {y0:.2} A {outer} {outer} 0 {large} 1 {x1:.2} {y1:.2} \
         L {x2:.2} {y2:.2} A {inner} {inner} 0 {large} 0 {x3:.2} {y3:.2} Z"
    )
}

/// Point at `radius` in the middle of a segment, for outer labels
pub fn label_point(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> (f64, f64) {
    polar(cx, cy, radius, (start + end) / 2.0)
}

/// Start and end angle of every slice, proportional to `values`
pub fn slice_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let v = if v.is_finite() && *v > 0.0 { *v } else { 0.0 };
            let sweep = if total > 0.0 { v / total * TAU } else { 0.0 };
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_max() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(-5.0), 1.0);
        assert_eq!(nice_max(7.3), 10.0);
        assert_eq!(nice_max(1_800_000.0), 2_000_000.0);
        assert_eq!(nice_max(2_100_000.0), 2_500_000.0);
        assert_eq!(nice_max(5_000.0), 5_000.0);
    }

    #[test]
    fn test_ticks_and_scale() {
        assert_eq!(ticks(100.0, 4), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(scale(50.0, 100.0, 300.0), 150.0);
        assert_eq!(scale(500.0, 100.0, 300.0), 300.0);
        assert_eq!(scale(10.0, 0.0, 300.0), 0.0);
        assert_eq!(band_center(1, 4, 400.0), 150.0);
    }

    #[test]
    fn test_line_path() {
        assert_eq!(line_path(&[]), "");
        assert_eq!(
            line_path(&[(0.0, 10.0), (5.0, 2.5)]),
            "M 0.00 10.00 L 5.00 2.50"
        );
    }

    #[test]
    fn test_slice_angles_cover_circle() {
        let angles = slice_angles(&[1.0, 3.0, f64::NAN]);
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[1].1 - TAU).abs() < 1e-9);
        assert_eq!(angles[2].0, angles[2].1);
        assert!(slice_angles(&[0.0, 0.0]).iter().all(|(s, e)| s == e));
    }

    #[test]
    fn test_full_circle_arc_is_drawable() {
        let path = arc_path(100.0, 100.0, 80.0, 50.0, 0.0, TAU);
        assert!(path.starts_with("M 100.00 20.00 A 80 80 0 1 1"));
        assert!(path.ends_with('Z'));
    }
}
