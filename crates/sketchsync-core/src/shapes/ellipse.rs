//! Ellipse shape.

use super::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned ellipse, stored by the corners of its bounding box.
///
/// Corners are normalized so that `(x1, y1)` is the upper-left and
/// `(x2, y2)` the lower-right, whatever order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ellipse {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    color: Rgb,
}

impl Ellipse {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) -> Self {
        let mut ellipse = Self {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 0,
            color,
        };
        ellipse.set_corners(x1, y1, x2, y2);
        ellipse
    }

    /// Redefine the bounding box from two corners, normalizing their order.
    pub fn set_corners(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.x1 = x1.min(x2);
        self.y1 = y1.min(y2);
        self.x2 = x1.max(x2);
        self.y2 = y1.max(y2);
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
        let a = f64::from(self.x2 - self.x1) / 2.0;
        let b = f64::from(self.y2 - self.y1) / 2.0;
        let dx = f64::from(x) - f64::from(self.x1 + self.x2) / 2.0;
        let dy = f64::from(y) - f64::from(self.y1 + self.y2) / 2.0;
        (dx / a).powi(2) + (dy / b).powi(2) <= 1.0
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ellipse {} {} {} {} {}",
            self.x1, self.y1, self.x2, self.y2, self.color
        )
    }
}
