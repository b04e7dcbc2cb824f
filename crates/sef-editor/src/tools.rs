//! Drawing modes and the tool controller.
//!
//! The controller turns pointer/key events into selection-engine calls
//! according to the active `Mode`.
//!
//! | Mode | Press | Drag | Release |
//! |------|-------|------|---------|
//! | Move | select figure under pointer, start drag | move selection | end drag |
//! | Select | start rubber band | grow rubber band | select by region (click = pick) |
//! | Circle / Rectangle / Triangle | anchor | preview | add figure |
//! | Polygon | add vertex (near first vertex closes) | preview edge | |
//!
//! Shift during a Move drag constrains motion to the dominant axis.
//! In Polygon mode, Enter closes the polygon and Escape cancels it.

use crate::config::Palette;
use crate::input::InputEvent;
use sef_core::{
    Circle, Figure, Point, Polygon, RectRegion, Rectangle, SelectionEngine, Shape, ShapeKind,
    Triangle,
};

/// The active drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pick and drag figures.
    #[default]
    Move,
    /// Rubber-band selection.
    Select,
    DrawCircle,
    DrawTriangle,
    DrawRectangle,
    DrawPolygon,
}

impl Mode {
    /// The kind of figure this mode draws, if it is a drawing mode.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Mode::DrawCircle => Some(ShapeKind::Circle),
            Mode::DrawTriangle => Some(ShapeKind::Triangle),
            Mode::DrawRectangle => Some(ShapeKind::Rectangle),
            Mode::DrawPolygon => Some(ShapeKind::Polygon),
            Mode::Move | Mode::Select => None,
        }
    }
}

/// In-progress pointer gesture.
#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging { last: Point },
    Marquee { start: Point, current: Point },
    Sketch { start: Point, current: Point },
    Polygon { points: Vec<Point>, cursor: Point },
}

pub struct ToolController {
    mode: Mode,
    gesture: Gesture,
    /// A click this close to the first polygon vertex closes the polygon.
    close_distance: f64,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl ToolController {
    pub fn new(close_distance: f64) -> Self {
        Self {
            mode: Mode::default(),
            gesture: Gesture::Idle,
            close_distance,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode, abandoning any gesture in progress.
    pub fn set_mode(&mut self, mode: Mode, engine: &mut SelectionEngine) {
        if self.mode != mode {
            log::debug!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.cancel(engine);
        self.mode = mode;
    }

    /// Abandon the current gesture.
    pub fn cancel(&mut self, engine: &mut SelectionEngine) {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            engine.set_drag_state(false);
        }
        self.gesture = Gesture::Idle;
    }

    /// Rubber band being dragged, for the host to draw.
    pub fn marquee(&self) -> Option<RectRegion> {
        match self.gesture {
            Gesture::Marquee { start, current } => Some(RectRegion::from_corners(start, current)),
            _ => None,
        }
    }

    /// Figure being drawn, for the host to draw.
    pub fn preview(&self) -> Option<Shape> {
        match &self.gesture {
            Gesture::Sketch { start, current } => self.sketch_shape(*start, *current),
            Gesture::Polygon { points, cursor } => {
                let mut pts = points.clone();
                pts.push(*cursor);
                Some(Polygon::new(pts).into())
            }
            _ => None,
        }
    }

    /// Handle one event. Returns `true` if the event was consumed and the
    /// host's overlay (rubber band, preview) may need redrawing.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        engine: &mut SelectionEngine,
        palette: &Palette,
    ) -> bool {
        match self.mode {
            Mode::Move => self.handle_move(event, engine),
            Mode::Select => self.handle_select(event, engine),
            Mode::DrawPolygon => self.handle_polygon(event, engine, palette),
            Mode::DrawCircle | Mode::DrawTriangle | Mode::DrawRectangle => {
                self.handle_sketch(event, engine, palette)
            }
        }
    }

    // ─── Move ────────────────────────────────────────────────────────────

    fn handle_move(&mut self, event: &InputEvent, engine: &mut SelectionEngine) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = Point::new(*x, *y);
                engine.set_drag_state(true);
                // Pressing on an already-selected figure keeps the whole
                // selection so it can be dragged together.
                let on_selection = engine
                    .pick_at_point(p)
                    .and_then(|id| engine.figure(id))
                    .is_some_and(|f| f.is_selected());
                if on_selection || engine.select_at_point(p).is_some() {
                    self.gesture = Gesture::Dragging { last: p };
                } else {
                    engine.set_drag_state(false);
                    self.gesture = Gesture::Idle;
                }
                true
            }
            InputEvent::PointerMove { x, y, modifiers } => {
                let Gesture::Dragging { last } = &mut self.gesture else {
                    return false;
                };
                let mut dx = x - last.x;
                let mut dy = y - last.y;
                *last = Point::new(*x, *y);
                if modifiers.shift {
                    if dx.abs() > dy.abs() {
                        dy = 0.0;
                    } else {
                        dx = 0.0;
                    }
                }
                engine.translate_selected(dx, dy);
                true
            }
            InputEvent::PointerUp { .. } => {
                let was_dragging = matches!(self.gesture, Gesture::Dragging { .. });
                self.cancel(engine);
                was_dragging
            }
            InputEvent::Key { .. } => false,
        }
    }

    // ─── Select ──────────────────────────────────────────────────────────

    fn handle_select(&mut self, event: &InputEvent, engine: &mut SelectionEngine) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = Point::new(*x, *y);
                self.gesture = Gesture::Marquee {
                    start: p,
                    current: p,
                };
                true
            }
            InputEvent::PointerMove { x, y, .. } => match &mut self.gesture {
                Gesture::Marquee { current, .. } => {
                    *current = Point::new(*x, *y);
                    true
                }
                _ => false,
            },
            InputEvent::PointerUp { x, y, .. } => {
                let Gesture::Marquee { start, .. } = self.gesture else {
                    return false;
                };
                self.gesture = Gesture::Idle;
                let end = Point::new(*x, *y);
                if start == end {
                    engine.select_at_point(end);
                } else {
                    engine.select_by_region(&RectRegion::from_corners(start, end));
                }
                true
            }
            InputEvent::Key { .. } => false,
        }
    }

    // ─── Circle / Rectangle / Triangle ───────────────────────────────────

    fn sketch_shape(&self, start: Point, end: Point) -> Option<Shape> {
        match self.mode {
            Mode::DrawCircle => {
                let radius = start.distance(end);
                (radius > 0.0).then(|| Circle::new(start, radius).into())
            }
            Mode::DrawRectangle => {
                let r = Rectangle::from_corners(start, end);
                (r.width > 0.0 && r.height > 0.0).then(|| r.into())
            }
            Mode::DrawTriangle => {
                let degenerate = start.x == end.x || start.y == end.y;
                (!degenerate).then(|| Triangle::in_box(start, end).into())
            }
            Mode::Move | Mode::Select | Mode::DrawPolygon => None,
        }
    }

    fn handle_sketch(
        &mut self,
        event: &InputEvent,
        engine: &mut SelectionEngine,
        palette: &Palette,
    ) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = Point::new(*x, *y);
                self.gesture = Gesture::Sketch {
                    start: p,
                    current: p,
                };
                true
            }
            InputEvent::PointerMove { x, y, .. } => match &mut self.gesture {
                Gesture::Sketch { current, .. } => {
                    *current = Point::new(*x, *y);
                    true
                }
                _ => false,
            },
            InputEvent::PointerUp { x, y, .. } => {
                let Gesture::Sketch { start, .. } = self.gesture else {
                    return false;
                };
                self.gesture = Gesture::Idle;
                if let Some(shape) = self.sketch_shape(start, Point::new(*x, *y)) {
                    engine.add_figure(Figure::new(shape, palette.fill, palette.stroke));
                }
                true
            }
            InputEvent::Key { .. } => false,
        }
    }

    // ─── Polygon ─────────────────────────────────────────────────────────

    fn finish_polygon(&mut self, engine: &mut SelectionEngine, palette: &Palette) {
        if let Gesture::Polygon { points, .. } = std::mem::replace(&mut self.gesture, Gesture::Idle)
        {
            if points.len() >= 3 {
                engine.add_figure(Figure::new(
                    Polygon::new(points),
                    palette.fill,
                    palette.stroke,
                ));
            } else {
                log::debug!("polygon discarded: {} vertices", points.len());
            }
        }
    }

    fn handle_polygon(
        &mut self,
        event: &InputEvent,
        engine: &mut SelectionEngine,
        palette: &Palette,
    ) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = Point::new(*x, *y);
                match &mut self.gesture {
                    Gesture::Polygon { points, cursor } => {
                        let closes = points.len() >= 3
                            && points[0].distance(p) <= self.close_distance;
                        if closes {
                            self.finish_polygon(engine, palette);
                        } else {
                            points.push(p);
                            *cursor = p;
                        }
                    }
                    _ => {
                        self.gesture = Gesture::Polygon {
                            points: vec![p],
                            cursor: p,
                        };
                    }
                }
                true
            }
            InputEvent::PointerMove { x, y, .. } => match &mut self.gesture {
                Gesture::Polygon { cursor, .. } => {
                    *cursor = Point::new(*x, *y);
                    true
                }
                _ => false,
            },
            InputEvent::PointerUp { .. } => matches!(self.gesture, Gesture::Polygon { .. }),
            InputEvent::Key { key, .. } => {
                if !matches!(self.gesture, Gesture::Polygon { .. }) {
                    return false;
                }
                match key.as_str() {
                    "Enter" => {
                        self.finish_polygon(engine, palette);
                        true
                    }
                    "Escape" => {
                        self.gesture = Gesture::Idle;
                        true
                    }
                    _ => false,
                }
            }
        }
    }
}
