//! Point and selection-region primitives.
//!
//! `Point` is a plain value type. `Region` is anything that can answer
//! "does this point fall inside me": the rubber band of the select tool,
//! a lasso polygon, or an ad-hoc closure.

use serde::{Deserialize, Serialize};

/// A 2D position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

// ─── Regions ─────────────────────────────────────────────────────────────

/// A selection region, tested against figure centers only.
pub trait Region {
    fn contains(&self, p: Point) -> bool;
}

impl<F> Region for F
where
    F: Fn(Point) -> bool,
{
    fn contains(&self, p: Point) -> bool {
        self(p)
    }
}

/// Axis-aligned rubber-band rectangle. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectRegion {
    pub min: Point,
    pub max: Point,
}

impl RectRegion {
    /// Normalize a drag from `start` to `end` into a region.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self {
            min: Point::new(start.x.min(end.x), start.y.min(end.y)),
            max: Point::new(start.x.max(end.x), start.y.max(end.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Region for RectRegion {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
