//! Typeface metrics
//!
//! The fixed metrics table every generated font is built against. All
//! values are in font units for a 1000 unit em square unless noted.

/// Global typographic metrics for the generated typeface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypefaceMetrics {
    pub units_per_em: u32,
    /// 80% of the em square
    pub ascender: i32,
    /// 20% of the em square, below the baseline
    pub descender: i32,
    pub x_height: i32,
    pub cap_height: i32,
    pub line_gap: i32,

    /// Reference advance that width class ratios are applied to
    pub default_width: i32,
    /// Added to every class width in the first glyph pass
    pub default_spacing: i32,
    pub word_spacing: i32,
    pub sentence_spacing: i32,

    pub narrow_width: f64,
    pub medium_width: f64,
    pub wide_width: f64,

    /// Point size the adjustment factors are calibrated for
    pub optical_size: f64,

    pub left_side_bearing: f64,
    pub right_side_bearing: f64,

    /// Vertical shift applied to round characters
    pub overshoot: i32,
}

pub const TYPEFACE_METRICS: TypefaceMetrics = TypefaceMetrics {
    units_per_em: 1000,
    ascender: 800,
    descender: -200,
    x_height: 500,
    cap_height: 700,
    line_gap: 200,

    default_width: 512,
    default_spacing: 50,
    word_spacing: 250,
    sentence_spacing: 500,

    narrow_width: 0.45,
    medium_width: 0.55,
    wide_width: 0.85,

    optical_size: 12.0,

    left_side_bearing: 0.05,
    right_side_bearing: 0.05,

    overshoot: 20,
};

/// Smallest side bearing the balanced heuristic will produce
pub const MIN_SIDE_BEARING: i32 = 5;

/// Largest side bearing the balanced heuristic will produce
pub const MAX_SIDE_BEARING: i32 = 40;

impl TypefaceMetrics {
    /// Distance from descender to ascender; the span a glyph image is
    /// scaled to when traced
    pub fn body_height(&self) -> f64 {
        f64::from(self.ascender - self.descender)
    }

    /// Advance given to the space glyph when the charmap has none
    pub fn space_width(&self) -> i32 {
        (f64::from(self.default_width) * 0.5) as i32
    }
}
