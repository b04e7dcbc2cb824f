//! The drawing model: an ordered list of figures.
//!
//! List order is z-order. Index 0 is the front: it is hit-tested first and
//! holds the most recently drawn or most recently selected figure.
//! After every selection-affecting operation the selected figures form a
//! contiguous prefix of the list.

use crate::figure::Figure;
use crate::id::FigureId;
use std::collections::HashSet;

/// The complete document: every figure, front to back.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    figures: Vec<Figure>,
}

impl Drawing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a drawing from figures already in front-to-back order.
    ///
    /// A figure whose id repeats one seen earlier in the list is given a
    /// fresh id, so every figure stays individually addressable.
    pub fn from_figures(mut figures: Vec<Figure>) -> Self {
        let mut seen = HashSet::with_capacity(figures.len());
        for f in &mut figures {
            if !seen.insert(f.id()) {
                f.renew_id();
                log::debug!("duplicate figure id, renumbered as {}", f.id());
                seen.insert(f.id());
            }
        }
        Self { figures }
    }

    /// Insert a figure at the front. Returns its id, which is fresh if the
    /// figure's own id is already in the drawing.
    pub fn add(&mut self, mut figure: Figure) -> FigureId {
        if self.get(figure.id()).is_some() {
            figure.renew_id();
        }
        let id = figure.id();
        self.figures.insert(0, figure);
        id
    }

    /// Remove a figure by identity. `None` if it is not in the drawing.
    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let pos = self.position(id)?;
        Some(self.figures.remove(pos))
    }

    /// Remove every selected figure, returning them in their previous order.
    ///
    /// Membership is decided once, over the whole list, before anything is
    /// dropped.
    pub fn remove_selected(&mut self) -> Vec<Figure> {
        let (removed, kept): (Vec<Figure>, Vec<Figure>) = std::mem::take(&mut self.figures)
            .into_iter()
            .partition(Figure::is_selected);
        self.figures = kept;
        removed
    }

    /// Replace the contents with an empty list.
    pub fn clear(&mut self) {
        self.figures = Vec::new();
    }

    /// Stable partition into `[selected…, unselected…]`.
    /// Relative order within each group is preserved, so a second call is a no-op.
    pub fn reorder_by_selection(&mut self) {
        let (mut selected, unselected): (Vec<Figure>, Vec<Figure>) =
            std::mem::take(&mut self.figures)
                .into_iter()
                .partition(Figure::is_selected);
        selected.extend(unselected);
        self.figures = selected;
    }

    /// All figures, front to back.
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub(crate) fn figures_mut(&mut self) -> impl Iterator<Item = &mut Figure> {
        self.figures.iter_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn get(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.figures.iter_mut().find(|f| f.id() == id)
    }

    /// Z-order index of a figure (0 = front).
    pub fn position(&self, id: FigureId) -> Option<usize> {
        self.figures.iter().position(|f| f.id() == id)
    }

    /// Ids of all figures, front to back.
    pub fn ids(&self) -> Vec<FigureId> {
        self.figures.iter().map(Figure::id).collect()
    }

}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Figure;
    type IntoIter = std::slice::Iter<'a, Figure>;

    fn into_iter(self) -> Self::IntoIter {
        self.figures.iter()
    }
}
