//! Glyph image decoding
//!
//! Images are reduced to an ink coverage grid: 1.0 for an opaque black
//! pixel, 0.0 for white or fully transparent, with a one pixel empty
//! border so every traced shape closes inside the grid.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

/// Empty pixels added around the image on every side
pub const GRID_PADDING: usize = 1;

/// Row-major ink coverage values
#[derive(Debug, Clone, PartialEq)]
pub struct InkGrid {
    /// Grid width including padding
    pub width: usize,
    /// Grid height including padding
    pub height: usize,
    pub values: Vec<f64>,
    pub source_width: u32,
    pub source_height: u32,
}

impl InkGrid {
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (source_width, source_height) = rgba.dimensions();

        Self::from_fn(source_width, source_height, |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            (1.0 - luma / 255.0) * (f64::from(a) / 255.0)
        })
    }

    /// Build a padded grid from a per-pixel ink function
    pub fn from_fn(source_width: u32, source_height: u32, ink: impl Fn(u32, u32) -> f64) -> Self {
        let width = source_width as usize + 2 * GRID_PADDING;
        let height = source_height as usize + 2 * GRID_PADDING;
        let mut values = vec![0.0; width * height];

        for y in 0..source_height {
            for x in 0..source_width {
                let index = (y as usize + GRID_PADDING) * width + x as usize + GRID_PADDING;
                values[index] = ink(x, y).clamp(0.0, 1.0);
            }
        }

        Self {
            width,
            height,
            values,
            source_width,
            source_height,
        }
    }

    /// Parse a grid from text rows where `#` is ink
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let source_height = rows.len() as u32;
        let source_width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        Self::from_fn(source_width, source_height, |x, y| {
            match rows[y as usize].as_bytes().get(x as usize) {
                Some(b'#') => 1.0,
                _ => 0.0,
            }
        })
    }

    pub fn has_ink(&self, threshold: f64) -> bool {
        self.values.iter().any(|&value| value >= threshold)
    }
}

/// Decode an image file into an ink grid
pub fn load_ink_grid(path: &Path) -> Result<InkGrid> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    Ok(InkGrid::from_image(&image))
}
