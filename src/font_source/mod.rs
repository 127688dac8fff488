//! Font source data structures
//!
//! The fixed metrics table, glyph naming, and the mutable glyph model the
//! spacing passes operate on before the font is handed to the compiler.

pub mod glyph;
pub mod metrics;
pub mod names;

pub use glyph::{Contour, GlyphBuild};
pub use metrics::{TypefaceMetrics, MAX_SIDE_BEARING, MIN_SIDE_BEARING, TYPEFACE_METRICS};
pub use names::glyph_name;
