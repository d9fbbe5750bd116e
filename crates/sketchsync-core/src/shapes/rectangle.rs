//! Rectangle shape.

use super::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned rectangle defined by an upper-left corner `(x1, y1)` and
/// a lower-right corner `(x2, y2)`, with `x1 <= x2` and `y1 <= y2` always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    color: Rgb,
}

impl Rectangle {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) -> Self {
        let mut rect = Self {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 0,
            color,
        };
        rect.set_corners(x1, y1, x2, y2);
        rect
    }

    /// Redefine the rectangle from two corners, normalizing their order.
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
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rectangle {} {} {} {} {}",
            self.x1, self.y1, self.x2, self.y2, self.color
        )
    }
}
