//! Width classes and overshoot
//!
//! Characters are sorted into narrow, medium and wide classes by static
//! membership lists. The class picks the ratio of the default width used
//! as the glyph's starting advance.

use crate::font_source::{GlyphBuild, TYPEFACE_METRICS};

pub const NARROW_CHARS: &[char] = &['i', 'l', 'I', 'J', 'f', 't', '1'];

pub const MEDIUM_CHARS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'g', 'h', 'j', 'k', 'n', 'o', 'p', 'q', 'r', 's', 'u', 'v', 'x', 'y',
    'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'K', 'L', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'X', 'Y', 'Z', '2', '3', '4', '5', '6', '7', '8', '9', '0',
];

pub const WIDE_CHARS: &[char] = &['m', 'w', 'M', 'W'];

/// Round characters that get shifted by the overshoot amount
pub const ROUND_CHARS: &[char] = &[
    'o', 'O', 'e', 'E', 'c', 'C', 'g', 'G', 'p', 'P', 'q', 'Q', 'b', 'B', 'd', 'D',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthClass {
    Narrow,
    Medium,
    Wide,
}

impl WidthClass {
    pub fn ratio(self) -> f64 {
        match self {
            WidthClass::Narrow => TYPEFACE_METRICS.narrow_width,
            WidthClass::Medium => TYPEFACE_METRICS.medium_width,
            WidthClass::Wide => TYPEFACE_METRICS.wide_width,
        }
    }

    /// Class width before scaling and spacing are applied
    pub fn base_width(self) -> i32 {
        (f64::from(TYPEFACE_METRICS.default_width) * self.ratio()) as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidthClass::Narrow => "narrow",
            WidthClass::Medium => "medium",
            WidthClass::Wide => "wide",
        }
    }
}

/// Determine the width class of a character; unlisted characters are medium
pub fn width_class(ch: char) -> WidthClass {
    if NARROW_CHARS.contains(&ch) {
        WidthClass::Narrow
    } else if WIDE_CHARS.contains(&ch) {
        WidthClass::Wide
    } else {
        WidthClass::Medium
    }
}

pub fn is_narrow(ch: char) -> bool {
    width_class(ch) == WidthClass::Narrow
}

pub fn is_round(ch: char) -> bool {
    ROUND_CHARS.contains(&ch)
}

/// Advance assigned when a glyph is first created
pub fn initial_advance(ch: char, width_scale: f64) -> f64 {
    let base = f64::from(width_class(ch).base_width());
    (base * width_scale).trunc() + f64::from(TYPEFACE_METRICS.default_spacing)
}

/// Shift round characters up by the overshoot amount.
///
/// Returns whether the glyph was moved.
pub fn apply_overshoot(glyph: &mut GlyphBuild) -> bool {
    if !is_round(glyph.ch) || glyph.bounding_box().is_none() {
        return false;
    }
    glyph.translate(0.0, f64::from(TYPEFACE_METRICS.overshoot));
    true
}
