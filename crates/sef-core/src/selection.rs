//! Selection engine: every selection-state transition and its side effects.
//!
//! The engine owns the `Drawing` and is the only place where a figure's
//! `selected`/`transparent` flags change. After an operation that may have
//! changed which figures are selected, it runs the change-notification
//! protocol:
//!
//! 1. Compute the current selection set.
//! 2. Compare it, as an unordered set, against the snapshot taken the last
//!    time the protocol ran.
//! 3. Only if they differ: request a canvas repaint, then tell the selection
//!    listener.
//! 4. Store the current set as the new snapshot.
//!
//! Clicking empty space twice therefore refreshes the UI once.
//!
//! Collaborators are called synchronously and always after the mutation
//! they report on.

use crate::codec::{self, CodecError};
use crate::figure::Figure;
use crate::geom::{Point, Region};
use crate::hit;
use crate::id::FigureId;
use crate::model::Drawing;
use crate::shape::{Geometry, ShapeKind};
use std::collections::HashSet;
use std::io::{Read, Write};

/// The rendering surface.
pub trait Canvas {
    fn request_repaint(&mut self);
}

/// The selection-summary panel.
pub trait SelectionListener {
    fn on_selection_changed(&mut self, summary: &SelectionSummary);
}

/// What the selection panel is told: the selected figures, front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub figures: Vec<(FigureId, ShapeKind)>,
}

impl SelectionSummary {
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FigureId> + '_ {
        self.figures.iter().map(|(id, _)| *id)
    }
}

pub struct SelectionEngine {
    drawing: Drawing,
    /// Selection set as of the last run of the notification protocol.
    last_selection: HashSet<FigureId>,
    dragging: bool,
    canvas: Option<Box<dyn Canvas>>,
    listener: Option<Box<dyn SelectionListener>>,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::with_drawing(Drawing::new())
    }

    pub fn with_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            last_selection: HashSet::new(),
            dragging: false,
            canvas: None,
            listener: None,
        }
    }

    pub fn set_canvas(&mut self, canvas: Box<dyn Canvas>) {
        self.canvas = Some(canvas);
    }

    pub fn set_selection_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listener = Some(listener);
    }

    /// Read access to the live drawing.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.drawing.get(id)
    }

    // ─── Drag state ──────────────────────────────────────────────────────

    /// Record whether a drag gesture is in progress.
    ///
    /// Selected figures are transparent exactly while a drag is active;
    /// the flag is recomputed for every figure here and whenever a figure's
    /// selection changes.
    pub fn set_drag_state(&mut self, dragging: bool) {
        if self.dragging == dragging {
            return;
        }
        self.dragging = dragging;
        let mut changed = false;
        for f in self.drawing.figures_mut() {
            changed |= f.refresh_transparent(dragging);
        }
        if changed {
            self.repaint();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // ─── Drawing mutations ───────────────────────────────────────────────

    /// Insert a new figure at the front.
    pub fn add_figure(&mut self, figure: Figure) -> FigureId {
        let id = self.drawing.add(figure);
        log::debug!("added figure {id}");
        self.repaint();
        id
    }

    /// Remove a figure by identity. Returns `None` if it was not present.
    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let removed = self.drawing.remove(id);
        if removed.is_some() {
            log::debug!("removed figure {id}");
            if !self.notify_selection_changed() {
                self.repaint();
            }
        } else {
            log::debug!("remove: no such figure {id}");
        }
        removed
    }

    /// Remove every selected figure. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let removed = self.drawing.remove_selected().len();
        log::debug!("removed {removed} selected figure(s)");
        self.notify_selection_changed();
        removed
    }

    /// Start a new, empty drawing.
    pub fn clear(&mut self) {
        self.replace_drawing(Drawing::new());
    }

    /// Swap in a whole new drawing in one step.
    pub fn replace_drawing(&mut self, drawing: Drawing) {
        log::debug!("drawing replaced ({} figures)", drawing.len());
        self.drawing = drawing;
        if !self.notify_selection_changed() {
            self.repaint();
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    fn clear_selection(&mut self) {
        let dragging = self.dragging;
        for f in self.drawing.figures_mut() {
            f.set_selected(false, dragging);
        }
    }

    fn select(&mut self, id: FigureId) -> bool {
        let dragging = self.dragging;
        match self.drawing.get_mut(id) {
            Some(f) => {
                f.set_selected(true, dragging);
                true
            }
            None => false,
        }
    }

    pub fn unselect_all(&mut self) {
        self.clear_selection();
        self.notify_selection_changed();
    }

    /// Make `id` the only selected figure and bring it to the front.
    ///
    /// Returns `false`, leaving the selection untouched, if `id` is not in
    /// the drawing.
    pub fn select_exactly_one(&mut self, id: FigureId) -> bool {
        if self.drawing.get(id).is_none() {
            return false;
        }
        self.clear_selection();
        self.select(id);
        self.drawing.reorder_by_selection();
        self.notify_selection_changed();
        true
    }

    /// Topmost figure containing `p`. Does not touch the selection.
    pub fn pick_at_point(&self, p: Point) -> Option<FigureId> {
        hit::pick_at_point(&self.drawing, p)
    }

    /// Replace the selection with the topmost figure at `p`, if any.
    /// The notification protocol runs whether or not something was hit.
    pub fn select_at_point(&mut self, p: Point) -> Option<FigureId> {
        self.clear_selection();
        let hit = self.pick_at_point(p);
        if let Some(id) = hit {
            self.select(id);
            self.drawing.reorder_by_selection();
        }
        self.notify_selection_changed();
        hit
    }

    /// Select exactly the figures whose center lies in `region`.
    pub fn select_by_region(&mut self, region: &dyn Region) {
        let dragging = self.dragging;
        for f in self.drawing.figures_mut() {
            let inside = region.contains(f.center());
            log::trace!("region test {} -> {inside}", f.id());
            f.set_selected(inside, dragging);
        }
        self.drawing.reorder_by_selection();
        self.notify_selection_changed();
    }

    /// Select every figure. Order is untouched: the whole list already
    /// forms the selected prefix.
    pub fn select_all(&mut self) {
        let dragging = self.dragging;
        for f in self.drawing.figures_mut() {
            f.set_selected(true, dragging);
        }
        self.notify_selection_changed();
    }

    pub fn count_selected(&self) -> usize {
        self.drawing.iter().filter(|f| f.is_selected()).count()
    }

    /// Selected figure ids, front to back.
    pub fn selected_ids(&self) -> Vec<FigureId> {
        self.drawing
            .iter()
            .filter(|f| f.is_selected())
            .map(Figure::id)
            .collect()
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        SelectionSummary {
            figures: self
                .drawing
                .iter()
                .filter(|f| f.is_selected())
                .map(|f| (f.id(), f.kind()))
                .collect(),
        }
    }

    /// Move every selected figure by `(dx, dy)`.
    ///
    /// Membership does not change, so only a repaint is requested.
    pub fn translate_selected(&mut self, dx: f64, dy: f64) {
        let mut moved = 0;
        for f in self.drawing.figures_mut().filter(|f| f.is_selected()) {
            f.translate(dx, dy);
            moved += 1;
        }
        if moved > 0 {
            self.repaint();
        }
    }

    // ─── Notification ────────────────────────────────────────────────────

    /// Run the change-notification protocol. Returns whether collaborators
    /// were notified.
    pub fn notify_selection_changed(&mut self) -> bool {
        let current: HashSet<FigureId> = self.selected_ids().into_iter().collect();
        let changed = current.len() != self.last_selection.len()
            || !current.iter().all(|id| self.last_selection.contains(id));

        if changed {
            log::debug!("selection changed: {} selected", current.len());
            self.repaint();
            let summary = self.selection_summary();
            if let Some(listener) = self.listener.as_mut() {
                listener.on_selection_changed(&summary);
            }
        }
        self.last_selection = current;
        changed
    }

    fn repaint(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.request_repaint();
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Write the whole drawing to `writer`. The drawing is not modified.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), CodecError> {
        codec::write_drawing(&self.drawing, writer)
    }

    /// Read a drawing from `reader` and swap it in.
    ///
    /// The source is decoded completely before anything changes; on error
    /// the current drawing is left exactly as it was.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), CodecError> {
        let drawing = codec::read_drawing(reader)?;
        self.replace_drawing(drawing);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Rectangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        repaints: usize,
        summaries: Vec<SelectionSummary>,
    }

    struct Recorder(Rc<RefCell<Calls>>);

    impl Canvas for Recorder {
        fn request_repaint(&mut self) {
            self.0.borrow_mut().repaints += 1;
        }
    }

    impl SelectionListener for Recorder {
        fn on_selection_changed(&mut self, summary: &SelectionSummary) {
            self.0.borrow_mut().summaries.push(summary.clone());
        }
    }

    fn engine_with_recorder() -> (SelectionEngine, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut engine = SelectionEngine::new();
        engine.set_canvas(Box::new(Recorder(calls.clone())));
        engine.set_selection_listener(Box::new(Recorder(calls.clone())));
        (engine, calls)
    }

    fn circle_at(x: f64, y: f64) -> Figure {
        Figure::with_default_paint(Circle::new(Point::new(x, y), 2.0))
    }

    #[test]
    fn select_all_then_unselect_notifies_each_time() {
        let (mut engine, calls) = engine_with_recorder();
        engine.add_figure(circle_at(0.0, 0.0));
        engine.add_figure(circle_at(10.0, 0.0));

        engine.select_all();
        assert_eq!(engine.count_selected(), 2);
        engine.select_all();
        engine.unselect_all();
        assert_eq!(engine.count_selected(), 0);
        assert_eq!(calls.borrow().summaries.len(), 2);
        assert_eq!(calls.borrow().summaries[0].len(), 2);
        assert!(calls.borrow().summaries[1].is_empty());
    }

    #[test]
    fn swapping_selection_of_equal_size_notifies() {
        let (mut engine, calls) = engine_with_recorder();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        let b = engine.add_figure(circle_at(10.0, 0.0));

        engine.select_exactly_one(a);
        engine.select_exactly_one(b);
        let summaries = &calls.borrow().summaries;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].ids().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn reselecting_same_figure_is_debounced() {
        let (mut engine, calls) = engine_with_recorder();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        engine.select_at_point(Point::new(0.0, 0.0));
        engine.select_exactly_one(a);
        assert_eq!(calls.borrow().summaries.len(), 1);
    }

    #[test]
    fn select_exactly_one_unknown_id_is_a_no_op() {
        let (mut engine, calls) = engine_with_recorder();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        engine.select_exactly_one(a);
        let stray = circle_at(0.0, 0.0).id();
        assert!(!engine.select_exactly_one(stray));
        assert_eq!(engine.selected_ids(), vec![a]);
        assert_eq!(calls.borrow().summaries.len(), 1);
    }

    #[test]
    fn selecting_while_dragging_sets_transparent() {
        let mut engine = SelectionEngine::new();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        let b = engine.add_figure(circle_at(50.0, 0.0));

        engine.set_drag_state(true);
        engine.select_at_point(Point::new(0.0, 0.0));
        assert!(engine.figure(a).unwrap().is_transparent());
        assert!(!engine.figure(b).unwrap().is_transparent());

        engine.set_drag_state(false);
        assert!(engine.figure(a).unwrap().is_selected());
        assert!(!engine.figure(a).unwrap().is_transparent());
    }

    #[test]
    fn select_at_point_miss_clears_selection() {
        let (mut engine, calls) = engine_with_recorder();
        engine.add_figure(circle_at(0.0, 0.0));
        engine.select_all();
        assert_eq!(engine.select_at_point(Point::new(100.0, 100.0)), None);
        assert_eq!(engine.count_selected(), 0);
        assert_eq!(calls.borrow().summaries.len(), 2);
    }

    #[test]
    fn remove_selected_notifies_and_keeps_order() {
        let (mut engine, calls) = engine_with_recorder();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        let b = engine.add_figure(circle_at(10.0, 0.0));
        let c = engine.add_figure(circle_at(20.0, 0.0));
        engine.select_exactly_one(b);

        assert_eq!(engine.remove_selected(), 1);
        assert_eq!(engine.drawing().ids(), vec![c, a]);
        let summaries = &calls.borrow().summaries;
        assert!(summaries.last().unwrap().is_empty());
    }

    #[test]
    fn removing_a_selected_figure_notifies() {
        let (mut engine, calls) = engine_with_recorder();
        let a = engine.add_figure(circle_at(0.0, 0.0));
        engine.select_exactly_one(a);
        assert!(engine.remove(a).is_some());
        assert!(engine.remove(a).is_none());
        assert_eq!(calls.borrow().summaries.len(), 2);
    }

    #[test]
    fn translate_only_requests_repaint() {
        let (mut engine, calls) = engine_with_recorder();
        engine.add_figure(Figure::with_default_paint(Rectangle::new(
            Point::ORIGIN,
            4.0,
            4.0,
        )));
        engine.select_all();
        let before = calls.borrow().repaints;
        engine.translate_selected(1.0, 1.0);
        assert_eq!(calls.borrow().repaints, before + 1);
        assert_eq!(calls.borrow().summaries.len(), 1);
    }

    #[test]
    fn clear_empties_and_reports_lost_selection() {
        let (mut engine, calls) = engine_with_recorder();
        engine.add_figure(circle_at(0.0, 0.0));
        engine.select_all();
        engine.clear();
        assert!(engine.drawing().is_empty());
        assert!(calls.borrow().summaries.last().unwrap().is_empty());
    }
}
