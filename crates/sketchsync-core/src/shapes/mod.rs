//! Shape definitions for the shared sketch.

mod ellipse;
mod polyline;
mod rectangle;
mod segment;

pub use ellipse::Ellipse;
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use segment::Segment;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Packed signed ARGB color as it appears on the wire.
///
/// The encoding matches `java.awt.Color#getRGB` in the original protocol:
/// alpha occupies the top byte and is always forced to 0xFF, so opaque black
/// is `-16777216`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(i32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0xFF00_0000u32 as i32);
    pub const WHITE: Rgb = Rgb(0xFFFF_FFFFu32 as i32);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(
            (0xFF00_0000u32 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)) as i32,
        )
    }

    /// Reconstruct from a packed wire value, normalizing alpha to 0xFF.
    pub fn from_packed(value: i32) -> Self {
        Self(((value as u32 & 0x00FF_FFFF) | 0xFF00_0000) as i32)
    }

    /// The packed signed value sent on the wire.
    pub fn packed(self) -> i32 {
        self.0
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distance from a point to a line segment (x1,y1)-(x2,y2).
pub(crate) fn point_to_segment_dist(x: f64, y: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let seg = (x2 - x1, y2 - y1);
    let pv = (x - x1, y - y1);
    let len_sq = seg.0 * seg.0 + seg.1 * seg.1;
    if len_sq < f64::EPSILON {
        return (pv.0 * pv.0 + pv.1 * pv.1).sqrt();
    }
    let t = ((pv.0 * seg.0 + pv.1 * seg.1) / len_sq).clamp(0.0, 1.0);
    let proj = (x1 + t * seg.0, y1 + t * seg.1);
    ((x - proj.0).powi(2) + (y - proj.1).powi(2)).sqrt()
}

/// Closed enum over every shape variant the protocol knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Ellipse(Ellipse),
    Rectangle(Rectangle),
    Segment(Segment),
    Polyline(Polyline),
}

impl Shape {
    /// Translate by (dx, dy).
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        match self {
            Shape::Ellipse(s) => s.move_by(dx, dy),
            Shape::Rectangle(s) => s.move_by(dx, dy),
            Shape::Segment(s) => s.move_by(dx, dy),
            Shape::Polyline(s) => s.move_by(dx, dy),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Shape::Ellipse(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
            Shape::Segment(s) => s.color(),
            Shape::Polyline(s) => s.color(),
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        match self {
            Shape::Ellipse(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
            Shape::Segment(s) => s.set_color(color),
            Shape::Polyline(s) => s.set_color(color),
        }
    }

    /// Check whether a point (in sketch coordinates) hits this shape.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self {
            Shape::Ellipse(s) => s.contains(x, y),
            Shape::Rectangle(s) => s.contains(x, y),
            Shape::Segment(s) => s.contains(x, y),
            Shape::Polyline(s) => s.contains(x, y),
        }
    }

    /// Wire-grammar variant name.
    pub fn variant(&self) -> &'static str {
        match self {
            Shape::Ellipse(_) => "ellipse",
            Shape::Rectangle(_) => "rectangle",
            Shape::Segment(_) => "segment",
            Shape::Polyline(_) => "polyline",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Ellipse(s) => s.fmt(f),
            Shape::Rectangle(s) => s.fmt(f),
            Shape::Segment(s) => s.fmt(f),
            Shape::Polyline(s) => s.fmt(f),
        }
    }
}
