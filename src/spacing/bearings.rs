//! Side bearing heuristics
//!
//! Two strategies are available. The dynamic strategy measures the traced
//! outline and gives every glyph a fixed right bearing; the balanced
//! strategy derives both bearings from the outline width per character
//! class. The dynamic strategy falls back to the balanced one for glyphs
//! without outline points.

use crate::font_source::{GlyphBuild, MAX_SIDE_BEARING, MIN_SIDE_BEARING};
use crate::spacing::width::{is_narrow, is_round};
use tracing::debug;

/// Minimum advance for the straight capitals handled specially
const STRAIGHT_CAP_MIN_WIDTH: f64 = 350.0;

/// Gap kept between a straight capital's right bearing and its advance
const STRAIGHT_CAP_PADDING: f64 = 10.0;

const DYNAMIC_MIN_LEFT: f64 = 15.0;
const DYNAMIC_MAX_BEARING: f64 = 60.0;
const DYNAMIC_RIGHT: f64 = 30.0;
const DYNAMIC_I_BEARING: f64 = 10.0;
const DYNAMIC_I_MIN_WIDTH: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SpacingStrategy {
    /// Measure the outline and use fixed bearings
    #[default]
    Dynamic,
    /// Derive bearings from the outline width per character class
    Balanced,
}

/// Apply the selected side bearing strategy to a glyph
pub fn apply_side_bearings(glyph: &mut GlyphBuild, strategy: SpacingStrategy) {
    match strategy {
        SpacingStrategy::Dynamic => dynamic_side_bearings(glyph),
        SpacingStrategy::Balanced => auto_balance_side_bearings(glyph),
    }
}

/// `max(lo, min(trunc(value), hi))`
fn clamp_bearing(value: f64, lo: i32, hi: i32) -> i32 {
    lo.max((value as i32).min(hi))
}

/// Left and right bearings the balanced heuristic picks for a character
/// whose outline is `outline_width` units wide
pub fn balanced_bearings(ch: char, outline_width: f64) -> (i32, i32) {
    match ch {
        'F' | 'I' => (
            clamp_bearing(outline_width * 0.12, 20, 40),
            clamp_bearing(outline_width * 0.10, 25, 50),
        ),
        'T' => {
            let bearing = clamp_bearing(outline_width * 0.10, 20, 40);
            (bearing, bearing)
        }
        _ => {
            let ratio = if is_narrow(ch) {
                0.02
            } else if is_round(ch) {
                0.07
            } else {
                0.05
            };
            let bearing = clamp_bearing(outline_width * ratio, MIN_SIDE_BEARING, MAX_SIDE_BEARING);
            (bearing, bearing)
        }
    }
}

/// Set both bearings from the outline width. No-op for an empty glyph.
pub fn auto_balance_side_bearings(glyph: &mut GlyphBuild) {
    let Some(bbox) = glyph.bounding_box() else {
        return;
    };
    let (left, right) = balanced_bearings(glyph.ch, bbox.width());

    glyph.set_left_side_bearing(f64::from(left));
    glyph.set_right_side_bearing(f64::from(right));

    if matches!(glyph.ch, 'F' | 'I' | 'T') {
        debug!(
            "{} bbox={:?}, width={}, left={}, right={}",
            glyph.ch,
            bbox,
            bbox.width(),
            left,
            right
        );
        // measured against the outline before the bearings moved it
        let min_width = bbox.x1 + f64::from(right) + STRAIGHT_CAP_PADDING;
        glyph.width = glyph.width.max(min_width).max(STRAIGHT_CAP_MIN_WIDTH);
        debug!("{} final width={}", glyph.ch, glyph.width);
    }
}

/// Set bearings from the outline's horizontal extent
pub fn dynamic_side_bearings(glyph: &mut GlyphBuild) {
    let Some((min_x, max_x)) = glyph.x_extent() else {
        auto_balance_side_bearings(glyph);
        return;
    };

    let (left, right) = if glyph.ch == 'I' {
        (DYNAMIC_I_BEARING, DYNAMIC_I_BEARING)
    } else {
        (
            DYNAMIC_MIN_LEFT.max(min_x).min(DYNAMIC_MAX_BEARING),
            DYNAMIC_RIGHT.min(DYNAMIC_MAX_BEARING),
        )
    };

    glyph.set_left_side_bearing(left);
    glyph.set_right_side_bearing(right);
    if glyph.ch == 'I' {
        glyph.width = glyph.width.max(DYNAMIC_I_MIN_WIDTH);
    }

    debug!(
        "dynamic bearings: {} min_x={}, max_x={}, left={}, right={}, width={}",
        glyph.ch, min_x, max_x, left, right, glyph.width
    );
}
