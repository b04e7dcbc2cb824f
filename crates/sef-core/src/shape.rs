//! Concrete shape variants and the geometry capability they share.
//!
//! The drawing model and selection engine only ever talk to `Geometry`;
//! the variants exist so hit testing and the file codec have something
//! real to work with.

use crate::geom::{Point, Region};
use kurbo::{BezPath, Shape as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What every figure must be able to answer about its own outline.
pub trait Geometry {
    /// Does `p` lie within this shape's boundary?
    fn contains(&self, p: Point) -> bool;

    /// Shift the shape by `(dx, dy)`.
    fn translate(&mut self, dx: f64, dy: f64);

    /// The point used for region selection.
    fn center(&self) -> Point;
}

// ─── Circle ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Geometry for Circle {
    fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    fn center(&self) -> Point {
        self.center
    }
}

// ─── Rectangle ───────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Build from two opposite corners of a drag, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }
}

impl Geometry for Rectangle {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin = self.origin.offset(dx, dy);
    }

    fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}

// ─── Triangle ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Isosceles triangle inscribed in the box spanned by two drag corners:
    /// apex centered on the top edge, base along the bottom edge.
    pub fn in_box(p: Point, q: Point) -> Self {
        let (left, right) = (p.x.min(q.x), p.x.max(q.x));
        let (top, bottom) = (p.y.min(q.y), p.y.max(q.y));
        Self::new(
            Point::new((left + right) / 2.0, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        )
    }

    /// Twice the signed area; zero when the vertices are collinear.
    pub fn doubled_area(&self) -> f64 {
        cross(self.a, self.b, self.c)
    }
}

/// Signed area of the parallelogram spanned by `a→b` and `a→p`.
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl Geometry for Triangle {
    fn contains(&self, p: Point) -> bool {
        // A flat triangle has no inside; the sign test would accept its
        // whole supporting line.
        if self.doubled_area() == 0.0 {
            return false;
        }
        let d1 = cross(self.a, self.b, p);
        let d2 = cross(self.b, self.c, p);
        let d3 = cross(self.c, self.a, p);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        // On an edge counts as inside.
        !(has_neg && has_pos)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.a = self.a.offset(dx, dy);
        self.b = self.b.offset(dx, dy);
        self.c = self.c.offset(dx, dy);
    }

    fn center(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }
}

// ─── Polygon ─────────────────────────────────────────────────────────────

/// Closed polygon. Fewer than three vertices contain nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }
}

impl Geometry for Polygon {
    fn contains(&self, p: Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        // Nonzero winding rule.
        self.to_path().winding(p.into()) != 0
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.offset(dx, dy);
        }
    }

    fn center(&self) -> Point {
        if self.points.is_empty() {
            return Point::ORIGIN;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────

/// Type discriminator for the shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
    Polygon,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the supported shape variants.
///
/// Serialized externally tagged, so the variant name is the per-record
/// type discriminator in the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Triangle(Triangle),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    fn geometry(&self) -> &dyn Geometry {
        match self {
            Shape::Circle(s) => s,
            Shape::Triangle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Polygon(s) => s,
        }
    }

    fn geometry_mut(&mut self) -> &mut dyn Geometry {
        match self {
            Shape::Circle(s) => s,
            Shape::Triangle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Polygon(s) => s,
        }
    }

    /// Reject geometry that could never have been drawn: non-finite
    /// coordinates, negative radius or size, flat triangles and polygons
    /// with fewer than three vertices.
    pub fn validate(&self) -> Result<(), String> {
        let finite = match self {
            Shape::Circle(c) => c.center.is_finite() && c.radius.is_finite(),
            Shape::Triangle(t) => t.a.is_finite() && t.b.is_finite() && t.c.is_finite(),
            Shape::Rectangle(r) => {
                r.origin.is_finite() && r.width.is_finite() && r.height.is_finite()
            }
            Shape::Polygon(p) => p.points.iter().all(|p| p.is_finite()),
        };
        if !finite {
            return Err(format!("{} has non-finite coordinates", self.kind()));
        }
        match self {
            Shape::Circle(c) if c.radius < 0.0 => Err(format!("negative radius {}", c.radius)),
            Shape::Rectangle(r) if r.width < 0.0 || r.height < 0.0 => Err(format!(
                "negative rectangle size {}x{}",
                r.width, r.height
            )),
            Shape::Triangle(t) if t.doubled_area() == 0.0 => {
                Err("triangle has zero area".to_string())
            }
            Shape::Polygon(p) if p.points.len() < 3 => {
                Err(format!("polygon has {} vertices", p.points.len()))
            }
            _ => Ok(()),
        }
    }
}

impl Geometry for Shape {
    fn contains(&self, p: Point) -> bool {
        self.geometry().contains(p)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.geometry_mut().translate(dx, dy);
    }

    fn center(&self) -> Point {
        self.geometry().center()
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Triangle> for Shape {
    fn from(s: Triangle) -> Self {
        Shape::Triangle(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Polygon> for Shape {
    fn from(s: Polygon) -> Self {
        Shape::Polygon(s)
    }
}

// Any shape doubles as a selection region (lasso).
impl Region for Shape {
    fn contains(&self, p: Point) -> bool {
        Geometry::contains(self, p)
    }
}
