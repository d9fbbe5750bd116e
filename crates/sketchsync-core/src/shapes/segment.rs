//! Line segment shape.

use super::{Rgb, point_to_segment_dist};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How close (in pixels) a point must be to count as touching a segment.
const HIT_TOLERANCE: f64 = 3.0;

/// A straight line segment from `(x1, y1)` to `(x2, y2)`.
///
/// Endpoints keep the order they were given; unlike rectangles there is no
/// canonical corner ordering for a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    color: Rgb,
}

impl Segment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            color,
        }
    }

    pub fn set_start(&mut self, x: i32, y: i32) {
        self.x1 = x;
        self.y1 = y;
    }

    pub fn set_end(&mut self, x: i32, y: i32) {
        self.x2 = x;
        self.y2 = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        point_to_segment_dist(
            f64::from(x),
            f64::from(y),
            f64::from(self.x1),
            f64::from(self.y1),
            f64::from(self.x2),
            f64::from(self.y2),
        ) <= HIT_TOLERANCE
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} {} {} {} {}",
            self.x1, self.y1, self.x2, self.y2, self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_order_preserved() {
        let s = Segment::new(50, 50, 10, 10, Rgb::BLACK);
        assert_eq!((s.x1, s.y1, s.x2, s.y2), (50, 50, 10, 10));
    }

    #[test]
    fn test_contains_near_line() {
        let s = Segment::new(0, 0, 100, 0, Rgb::BLACK);
        assert!(s.contains(50, 0));
        assert!(s.contains(50, 3));
        assert!(!s.contains(50, 4));
        assert!(!s.contains(110, 0));
    }

    #[test]
    fn test_move_by() {
        let mut s = Segment::new(0, 0, 10, 10, Rgb::BLACK);
        s.move_by(-2, 7);
        assert_eq!((s.x1, s.y1, s.x2, s.y2), (-2, 7, 8, 17));
    }
}
