//! Outline tracing
//!
//! Runs isobands over the ink grid and turns the resulting polygons into
//! font unit contours: scaled so the image height spans the descender to
//! ascender range, outer rings counter-clockwise and holes clockwise,
//! simplified and rounded to integer coordinates.

use crate::font_source::{Contour, TYPEFACE_METRICS};
use crate::outline::bitmap::{InkGrid, GRID_PADDING};
use anyhow::{anyhow, Result};
use contour_isobands::ContourBuilder;
use geo_types::LineString;
use kurbo::Point;

/// Upper isoband bound; above any ink value
const INK_CEILING: f64 = 2.0;

/// Rings enclosing less area than this are dropped as noise
const MIN_RING_AREA: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Ink coverage at which a pixel counts as part of the glyph
    pub threshold: f64,
    /// Douglas-Peucker tolerance in font units; 0 disables simplification
    pub simplify_tolerance: f64,
    pub ascender: f64,
    pub descender: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            simplify_tolerance: 2.0,
            ascender: f64::from(TYPEFACE_METRICS.ascender),
            descender: f64::from(TYPEFACE_METRICS.descender),
        }
    }
}

impl TraceOptions {
    fn scale(&self, grid: &InkGrid) -> f64 {
        (self.ascender - self.descender) / f64::from(grid.source_height)
    }
}

/// Trace an ink grid into closed contours
pub fn trace_grid(grid: &InkGrid, options: &TraceOptions) -> Result<Vec<Contour>> {
    if grid.source_height == 0 || !grid.has_ink(options.threshold) {
        return Ok(Vec::new());
    }

    let bands = ContourBuilder::new(grid.width, grid.height)
        .use_quad_tree(true)
        .contours(&grid.values, &[options.threshold, INK_CEILING])
        .map_err(|err| anyhow!("Isoband tracing failed: {err:?}"))?;

    let scale = options.scale(grid);
    let to_font_units = |x: f64, y: f64| {
        let pad = GRID_PADDING as f64;
        Point::new(
            (x - pad + 0.5) * scale,
            options.ascender - (y - pad + 0.5) * scale,
        )
    };

    let mut contours = Vec::new();
    for band in &bands {
        for polygon in band.geometry().0.iter() {
            let exterior = convert_ring(polygon.exterior(), &to_font_units, options);
            if let Some(ring) = exterior {
                contours.push(orient(ring, true));
            }
            for interior in polygon.interiors() {
                if let Some(ring) = convert_ring(interior, &to_font_units, options) {
                    contours.push(orient(ring, false));
                }
            }
        }
    }
    Ok(contours)
}

fn convert_ring(
    ring: &LineString<f64>,
    to_font_units: &impl Fn(f64, f64) -> Point,
    options: &TraceOptions,
) -> Option<Contour> {
    let mut points: Vec<Point> = ring
        .coords()
        .map(|coord| to_font_units(coord.x, coord.y))
        .collect();
    if points.first() != points.last() {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }

    if options.simplify_tolerance > 0.0 {
        points = douglas_peucker(&points, options.simplify_tolerance);
    }
    // the closing point duplicates the first
    points.pop();

    let points = finish_ring(points);
    (points.len() >= 3 && signed_area(&points).abs() >= MIN_RING_AREA).then_some(points)
}

/// Round, then drop repeated and collinear points
fn finish_ring(points: Vec<Point>) -> Contour {
    let mut rounded: Contour = Vec::with_capacity(points.len());
    for point in points {
        let point = Point::new(point.x.round(), point.y.round());
        if rounded.last() != Some(&point) {
            rounded.push(point);
        }
    }
    while rounded.len() > 1 && rounded.first() == rounded.last() {
        rounded.pop();
    }
    remove_collinear(rounded)
}

fn remove_collinear(mut points: Contour) -> Contour {
    let mut changed = true;
    while changed && points.len() > 3 {
        changed = false;
        let len = points.len();
        for index in 0..len {
            let prev = points[(index + len - 1) % len];
            let next = points[(index + 1) % len];
            if cross(prev, points[index], next).abs() < f64::EPSILON {
                points.remove(index);
                changed = true;
                break;
            }
        }
    }
    points
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Shoelace area; positive for counter-clockwise rings in y-up space
pub fn signed_area(points: &[Point]) -> f64 {
    let len = points.len();
    (0..len)
        .map(|index| {
            let a = points[index];
            let b = points[(index + 1) % len];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

fn orient(mut ring: Contour, counter_clockwise: bool) -> Contour {
    if (signed_area(&ring) > 0.0) != counter_clockwise {
        ring.reverse();
    }
    ring
}

fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let segment = end - start;
    let length = segment.hypot();
    if length == 0.0 {
        return (point - start).hypot();
    }
    segment.cross(point - start).abs() / length
}

/// Douglas-Peucker polyline simplification; keeps both endpoints
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];

    let (split, distance) = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(index, &point)| (index + 1, perpendicular_distance(point, first, last)))
        .fold((0, 0.0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if distance > tolerance {
        let mut simplified = douglas_peucker(&points[..=split], tolerance);
        simplified.pop();
        simplified.extend(douglas_peucker(&points[split..], tolerance));
        simplified
    } else {
        vec![first, last]
    }
}
