//! Spacing heuristics
//!
//! Width classes, overshoot, side bearings and kerning. Everything here is
//! a fixed table or plain arithmetic over a `GlyphBuild`.

pub mod bearings;
pub mod kerning;
pub mod width;

pub use bearings::{apply_side_bearings, SpacingStrategy};
pub use kerning::{default_kerning_pairs, dynamic_i_kerning, KerningTable};
pub use width::{apply_overshoot, initial_advance, width_class, WidthClass};
