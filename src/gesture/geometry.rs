//! Screen-space geometry.

use serde::{Deserialize, Serialize};

/// A screen coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width; never negative.
    pub width: f64,
    /// Height; never negative.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Returns `true` when `point` lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Returns the rectangle grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Distance from `point` to the nearest point of the rectangle; zero
    /// inside.
    #[must_use]
    pub fn distance_to(&self, point: Point) -> f64 {
        let dx = (self.left - point.x).max(point.x - self.right()).max(0.0);
        let dy = (self.top - point.y).max(point.y - self.bottom()).max(0.0);
        dx.hypot(dy)
    }
}
