//! Bitmap import and outline tracing

pub mod bitmap;
pub mod trace;

pub use bitmap::{load_ink_grid, InkGrid};
pub use trace::{trace_grid, TraceOptions};

use crate::font_source::Contour;
use anyhow::Result;
use std::path::Path;

/// Decode a glyph image and trace it into rounded font unit contours
pub fn import_outline(path: &Path, options: &TraceOptions) -> Result<Vec<Contour>> {
    let grid = load_ink_grid(path)?;
    trace_grid(&grid, options)
}
