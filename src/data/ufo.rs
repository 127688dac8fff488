//! UFO assembly
//!
//! Converts the built glyphs, the metrics table and the kerning table into
//! a `norad::Font` that the compiler can consume.

use crate::font_source::{GlyphBuild, TypefaceMetrics};
use crate::spacing::KerningTable;
use anyhow::{Context, Result};
use norad::{Contour, ContourPoint, Font, Glyph, Name, PointType};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Naming and metadata for the generated font
#[derive(Debug, Clone, PartialEq)]
pub struct FontNames {
    pub family_name: String,
    pub full_name: String,
    pub postscript_name: String,
    pub copyright: String,
}

impl FontNames {
    /// Use the display name as family and full name; the PostScript name
    /// drops spaces. The copyright carries the given year.
    pub fn new(font_name: &str, year: i32) -> Self {
        Self {
            family_name: font_name.to_string(),
            full_name: font_name.to_string(),
            postscript_name: font_name.replace(' ', ""),
            copyright: format!("Copyright (c) {year}"),
        }
    }
}

/// Font info populated from the names and metrics table
pub fn font_info(names: &FontNames, metrics: &TypefaceMetrics) -> norad::FontInfo {
    let mut info = norad::FontInfo::default();

    info.family_name = Some(names.family_name.clone());
    info.style_name = Some("Regular".to_string());
    info.postscript_font_name = Some(names.postscript_name.clone());
    info.postscript_full_name = Some(names.full_name.clone());
    info.copyright = Some(names.copyright.clone());
    info.version_major = Some(1);
    info.version_minor = Some(0);

    info.units_per_em =
        norad::fontinfo::NonNegativeIntegerOrFloat::new(f64::from(metrics.units_per_em));
    info.ascender = Some(f64::from(metrics.ascender));
    info.descender = Some(f64::from(metrics.descender));
    info.x_height = Some(f64::from(metrics.x_height));
    info.cap_height = Some(f64::from(metrics.cap_height));

    info.open_type_hhea_ascender = Some(metrics.ascender);
    info.open_type_hhea_descender = Some(metrics.descender);
    info.open_type_hhea_line_gap = Some(metrics.line_gap);
    info.open_type_os2_typo_ascender = Some(metrics.ascender);
    info.open_type_os2_typo_descender = Some(metrics.descender);
    info.open_type_os2_typo_line_gap = Some(metrics.line_gap);
    // win metrics are unsigned magnitudes
    info.open_type_os2_win_ascent = Some(metrics.ascender.unsigned_abs());
    info.open_type_os2_win_descent = Some(metrics.descender.unsigned_abs());

    info
}

/// Convert a built glyph into a norad glyph
pub fn to_norad_glyph(glyph: &GlyphBuild) -> Glyph {
    let mut norad_glyph = Glyph::new(&glyph.name);
    norad_glyph.width = glyph.width;
    norad_glyph.codepoints.insert(glyph.ch);
    norad_glyph.contours = glyph
        .contours
        .iter()
        .filter(|contour| contour.len() >= 3)
        .map(|contour| {
            let points = contour
                .iter()
                .map(|pt| ContourPoint::new(pt.x, pt.y, PointType::Line, false, None, None))
                .collect();
            Contour::new(points, None)
        })
        .collect();
    norad_glyph
}

/// Convert a character-keyed kerning table into UFO kerning, skipping
/// pairs whose glyphs are not in `glyphs`
pub fn to_norad_kerning(
    table: &KerningTable,
    glyphs: &[GlyphBuild],
) -> Result<BTreeMap<Name, BTreeMap<Name, f64>>> {
    let name_of = |ch: char| glyphs.iter().find(|glyph| glyph.ch == ch).map(|g| &g.name);

    let mut kerning: BTreeMap<Name, BTreeMap<Name, f64>> = BTreeMap::new();
    for (&(left, right), &value) in table {
        let (Some(left_name), Some(right_name)) = (name_of(left), name_of(right)) else {
            continue;
        };
        let left_name = Name::new(left_name)
            .with_context(|| format!("Invalid glyph name '{left_name}'"))?;
        let right_name = Name::new(right_name)
            .with_context(|| format!("Invalid glyph name '{right_name}'"))?;
        kerning
            .entry(left_name)
            .or_default()
            .insert(right_name, f64::from(value));
    }
    Ok(kerning)
}

/// Assemble the complete font
pub fn build_font(
    names: &FontNames,
    metrics: &TypefaceMetrics,
    glyphs: &[GlyphBuild],
    kerning: &KerningTable,
) -> Result<Font> {
    let mut font = Font::new();
    font.font_info = font_info(names, metrics);

    let layer = font.default_layer_mut();
    for glyph in glyphs {
        layer.insert_glyph(to_norad_glyph(glyph));
    }

    font.kerning = to_norad_kerning(kerning, glyphs)?;
    debug!(
        "Assembled UFO with {} glyphs and {} kerning groups",
        glyphs.len(),
        font.kerning.len()
    );
    Ok(font)
}

/// Write the font as a UFO package
pub fn save_ufo(font: &Font, path: &Path) -> Result<()> {
    font.save(path)
        .with_context(|| format!("Failed to write UFO to {}", path.display()))?;
    debug!("Wrote UFO to {}", path.display());
    Ok(())
}
