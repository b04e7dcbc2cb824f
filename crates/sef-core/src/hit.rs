//! Hit testing: point → figure lookup.
//!
//! Walks the drawing front-to-back; the first figure whose outline contains
//! the point wins. Containment itself is each shape's business.

use crate::geom::{Point, Region};
use crate::id::FigureId;
use crate::model::Drawing;
use crate::shape::Geometry;

/// Find the topmost figure at `p`.
/// Returns `None` if no figure is hit (background).
pub fn pick_at_point(drawing: &Drawing, p: Point) -> Option<FigureId> {
    let hit = drawing.iter().find(|f| f.contains(p)).map(|f| f.id());
    log::trace!("hit test ({}, {}) -> {:?}", p.x, p.y, hit);
    hit
}

/// Find every figure whose center lies in `region`, front to back.
/// Used for rubber-band selection.
pub fn figures_in_region(drawing: &Drawing, region: &dyn Region) -> Vec<FigureId> {
    drawing
        .iter()
        .filter(|f| region.contains(f.center()))
        .map(|f| f.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;
    use crate::geom::RectRegion;
    use crate::shape::{Circle, Rectangle};

    #[test]
    fn front_figure_wins_on_overlap() {
        let mut d = Drawing::new();
        let back = d.add(Figure::with_default_paint(Rectangle::new(
            Point::ORIGIN,
            10.0,
            10.0,
        )));
        let front = d.add(Figure::with_default_paint(Circle::new(
            Point::new(5.0, 5.0),
            3.0,
        )));
        assert_eq!(pick_at_point(&d, Point::new(5.0, 5.0)), Some(front));
        assert_eq!(pick_at_point(&d, Point::new(1.0, 1.0)), Some(back));
        assert_eq!(pick_at_point(&d, Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn region_matches_centers_not_extents() {
        let mut d = Drawing::new();
        // Large circle overlapping the region, but centered outside it.
        d.add(Figure::with_default_paint(Circle::new(
            Point::new(30.0, 30.0),
            25.0,
        )));
        let inside = d.add(Figure::with_default_paint(Circle::new(
            Point::new(10.0, 10.0),
            1.0,
        )));
        let region = RectRegion::from_corners(Point::new(5.0, 5.0), Point::new(15.0, 15.0));
        assert_eq!(figures_in_region(&d, &region), vec![inside]);
    }
}
