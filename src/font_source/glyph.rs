//! Glyphs under construction
//!
//! A `GlyphBuild` holds one character's traced outline and advance while
//! the spacing heuristics run. Side bearing setters follow font editor
//! semantics: moving the left side bearing shifts the outline and grows
//! the advance by the same amount, while setting the right side bearing
//! places the advance relative to the outline's right edge.

use crate::font_source::names::glyph_name;
use kurbo::{Affine, Point, Rect};

/// A closed polygonal contour in font units, y-up
pub type Contour = Vec<Point>;

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBuild {
    pub ch: char,
    pub name: String,
    pub width: f64,
    pub contours: Vec<Contour>,
}

impl GlyphBuild {
    pub fn new(ch: char, width: f64) -> Self {
        Self {
            ch,
            name: glyph_name(ch),
            width,
            contours: Vec::new(),
        }
    }

    /// Remove every contour, keeping the advance
    pub fn clear(&mut self) {
        self.contours.clear();
    }

    pub fn has_outline(&self) -> bool {
        self.points().next().is_some()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.contours.iter().flatten()
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        let mut points = self.points();
        let first = *points.next()?;
        Some(points.fold(Rect::from_points(first, first), |rect, pt| {
            rect.union_pt(*pt)
        }))
    }

    /// Leftmost and rightmost point x coordinates
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        self.bounding_box().map(|bbox| (bbox.x0, bbox.x1))
    }

    pub fn transform(&mut self, affine: Affine) {
        for point in self.contours.iter_mut().flatten() {
            *point = affine * *point;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform(Affine::translate((dx, dy)));
    }

    pub fn left_side_bearing(&self) -> Option<f64> {
        self.bounding_box().map(|bbox| bbox.x0)
    }

    pub fn right_side_bearing(&self) -> Option<f64> {
        self.bounding_box().map(|bbox| self.width - bbox.x1)
    }

    /// Move the outline so its left edge sits at `value`; the advance
    /// changes by the same delta. No-op for an empty glyph.
    pub fn set_left_side_bearing(&mut self, value: f64) {
        if let Some(current) = self.left_side_bearing() {
            let delta = value - current;
            self.translate(delta, 0.0);
            self.width += delta;
        }
    }

    /// Set the advance to the outline's right edge plus `value`. No-op for
    /// an empty glyph.
    pub fn set_right_side_bearing(&mut self, value: f64) {
        if let Some(bbox) = self.bounding_box() {
            self.width = bbox.x1 + value;
        }
    }

    /// Round every point and the advance to integer font units
    pub fn round(&mut self) {
        for point in self.contours.iter_mut().flatten() {
            *point = Point::new(point.x.round(), point.y.round());
        }
        self.width = self.width.round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_glyph(x0: f64, x1: f64, width: f64) -> GlyphBuild {
        let mut glyph = GlyphBuild::new('H', width);
        glyph.contours.push(vec![
            Point::new(x0, 0.0),
            Point::new(x1, 0.0),
            Point::new(x1, 700.0),
            Point::new(x0, 700.0),
        ]);
        glyph
    }

    #[test]
    fn test_bounding_box_of_empty_glyph() {
        let glyph = GlyphBuild::new('a', 300.0);
        assert_eq!(glyph.bounding_box(), None);
        assert!(!glyph.has_outline());
    }

    #[test]
    fn test_set_left_side_bearing_shifts_outline_and_advance() {
        let mut glyph = square_glyph(40.0, 240.0, 300.0);
        glyph.set_left_side_bearing(10.0);

        assert_eq!(glyph.left_side_bearing(), Some(10.0));
        assert_eq!(glyph.width, 270.0);
        // right side bearing is preserved
        assert_eq!(glyph.right_side_bearing(), Some(60.0));
    }

    #[test]
    fn test_set_right_side_bearing_moves_advance() {
        let mut glyph = square_glyph(40.0, 240.0, 300.0);
        glyph.set_right_side_bearing(25.0);
        assert_eq!(glyph.width, 265.0);
        assert_eq!(glyph.left_side_bearing(), Some(40.0));
    }

    #[test]
    fn test_bearing_setters_ignore_empty_glyph() {
        let mut glyph = GlyphBuild::new('a', 300.0);
        glyph.set_left_side_bearing(10.0);
        glyph.set_right_side_bearing(10.0);
        assert_eq!(glyph.width, 300.0);
    }

    #[test]
    fn test_translate_and_round() {
        let mut glyph = square_glyph(0.4, 100.6, 120.2);
        glyph.translate(0.0, 20.0);
        glyph.round();

        let bbox = glyph.bounding_box().unwrap();
        assert_eq!((bbox.x0, bbox.x1), (0.0, 101.0));
        assert_eq!((bbox.y0, bbox.y1), (20.0, 720.0));
        assert_eq!(glyph.width, 120.0);
    }
}
