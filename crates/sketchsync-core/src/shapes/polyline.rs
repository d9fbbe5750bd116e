//! Polyline shape: a freehand stroke built from segments.

use super::{Rgb, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered run of segments sharing one logical identity.
///
/// Moving or recoloring a polyline propagates to every constituent segment;
/// containment is true if any segment contains the point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyline {
    segments: Vec<Segment>,
    color: Rgb,
}

impl Polyline {
    /// A polyline with a single initial segment, as drawing gestures start.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) -> Self {
        Self {
            segments: vec![Segment::new(x1, y1, x2, y2, color)],
            color,
        }
    }

    /// Rebuild from already-parsed segments (wire decoding).
    pub fn from_segments(segments: Vec<Segment>, color: Rgb) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments, color }
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        for seg in &mut self.segments {
            seg.move_by(dx, dy);
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        for seg in &mut self.segments {
            seg.set_color(color);
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.segments.iter().any(|seg| seg.contains(x, y))
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polyline")?;
        for seg in &self.segments {
            write!(f, " {seg}")?;
        }
        write!(f, " {}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Polyline {
        let mut p = Polyline::new(0, 0, 10, 10, Rgb::BLACK);
        p.add_segment(Segment::new(10, 10, 20, 0, Rgb::BLACK));
        p
    }

    #[test]
    fn test_contains_any_segment() {
        let p = zigzag();
        assert!(p.contains(5, 5));
        assert!(p.contains(15, 5));
        assert!(!p.contains(10, 0));
    }

    #[test]
    fn test_move_propagates() {
        let mut p = zigzag();
        p.move_by(1, 1);
        assert_eq!(p.segments()[0].x1, 1);
        assert_eq!(p.segments()[1].y2, 1);
    }

    #[test]
    fn test_recolor_propagates() {
        let mut p = zigzag();
        let red = Rgb::new(255, 0, 0);
        p.set_color(red);
        assert_eq!(p.color(), red);
        assert!(p.segments().iter().all(|s| s.color() == red));
    }

    #[test]
    fn test_encoding_lists_segments() {
        let p = zigzag();
        let text = p.to_string();
        assert!(text.starts_with("polyline segment 0 0 10 10"));
        assert!(text.ends_with(&Rgb::BLACK.to_string()));
    }
}
