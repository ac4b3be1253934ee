// Viewport geometry shared by the zoom/pan engine.
use std::ops::{Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// On-screen rectangle the image is displayed in, as reported by the DOM.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Center in viewport-local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Converts a client (page) position into viewport-local coordinates.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }

    /// Largest translation per axis that keeps the scaled image covering the viewport.
    /// Degenerate (zero or negative) sizes collapse to the center.
    pub fn max_offset(&self, scale: f64) -> Point {
        let grow = (scale - 1.0).max(0.0);
        Point::new(
            (self.width.max(0.0) * grow) / 2.0,
            (self.height.max(0.0) * grow) / 2.0,
        )
    }

    pub fn clamp_offset(&self, candidate: Point, scale: f64) -> Point {
        let max = self.max_offset(scale);
        Point::new(
            candidate.x.clamp(-max.x, max.x),
            candidate.y.clamp(-max.y, max.y),
        )
    }
}

/// Distance between two touch points, or None unless exactly two are active.
pub fn pinch_distance(touches: &[Point]) -> Option<f64> {
    match touches {
        [a, b] => Some(a.distance(*b)),
        _ => None,
    }
}
