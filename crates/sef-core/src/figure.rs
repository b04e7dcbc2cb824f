//! Figures: a shape plus paint and the transient selection flags.

use crate::geom::Point;
use crate::id::FigureId;
use crate::shape::{Geometry, Shape, ShapeKind};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    /// Default fill for new figures (pale green).
    pub const DEFAULT_FILL: Color = Color::rgb8(184, 255, 181);
    /// Default stroke for new figures (light gray).
    pub const DEFAULT_STROKE: Color = Color::rgb8(192, 192, 192);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> Option<u8> {
            Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
        };

        match bytes.len() {
            6 => Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => {
                let mut c = Self::rgb8(byte(0)?, byte(2)?, byte(4)?);
                c.a = byte(6)? as f32 / 255.0;
                Some(c)
            }
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(&self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (q(self.r), q(self.g), q(self.b), q(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Figure ──────────────────────────────────────────────────────────────

/// One drawable shape in a drawing.
///
/// `selected` and `transparent` are session-local: they are never written
/// to disk and only the selection engine may change them. `transparent`
/// marks a figure being dragged and is always false on unselected figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    #[serde(skip, default = "FigureId::fresh")]
    id: FigureId,
    pub shape: Shape,
    pub fill: Color,
    pub stroke: Color,
    #[serde(skip)]
    selected: bool,
    #[serde(skip)]
    transparent: bool,
}

impl Figure {
    pub fn new(shape: impl Into<Shape>, fill: Color, stroke: Color) -> Self {
        Self {
            id: FigureId::fresh(),
            shape: shape.into(),
            fill,
            stroke,
            selected: false,
            transparent: false,
        }
    }

    /// A figure painted with the default palette.
    pub fn with_default_paint(shape: impl Into<Shape>) -> Self {
        Self::new(shape, Color::DEFAULT_FILL, Color::DEFAULT_STROKE)
    }

    pub fn id(&self) -> FigureId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Give the figure a new identity. Used when a clone would otherwise
    /// share an id with a figure already in the drawing.
    pub(crate) fn renew_id(&mut self) {
        self.id = FigureId::fresh();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Set the selection flag and recompute the drag-preview flag from the
    /// current drag state.
    pub(crate) fn set_selected(&mut self, selected: bool, dragging: bool) {
        self.selected = selected;
        self.transparent = selected && dragging;
    }

    /// Recompute the drag-preview flag. Returns whether it changed.
    pub(crate) fn refresh_transparent(&mut self, dragging: bool) -> bool {
        let transparent = self.selected && dragging;
        std::mem::replace(&mut self.transparent, transparent) != transparent
    }

    /// Same shape and paint, ignoring identity and transient flags.
    pub fn same_content(&self, other: &Figure) -> bool {
        self.shape == other.shape && self.fill == other.fill && self.stroke == other.stroke
    }
}

impl Geometry for Figure {
    fn contains(&self, p: Point) -> bool {
        self.shape.contains(p)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.shape.translate(dx, dy);
    }

    fn center(&self) -> Point {
        self.shape.center()
    }
}
