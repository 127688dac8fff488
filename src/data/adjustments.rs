//! Typographic adjustments document
//!
//! Every key is optional. Missing keys take the defaults below, and the
//! raw values are turned into font units through factors calibrated for
//! the reference optical size.

use crate::font_source::TYPEFACE_METRICS;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Horizontal per-character position multiplier; not scaled by optical size
pub const POSITION_X_FACTOR: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adjustments {
    pub letter_spacing: f64,
    pub baseline_offset: f64,
    /// Percentage of the class width
    pub char_width: f64,
    pub kerning_pairs: BTreeMap<String, f64>,
    pub char_positions: BTreeMap<String, CharPosition>,
    /// Point size the font is tuned for
    pub optical_size: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            letter_spacing: 0.0,
            baseline_offset: 0.0,
            char_width: 100.0,
            kerning_pairs: BTreeMap::new(),
            char_positions: BTreeMap::new(),
            optical_size: TYPEFACE_METRICS.optical_size,
        }
    }
}

/// Per-character nudge. Values may be numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharPosition {
    #[serde(deserialize_with = "number_or_string", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "number_or_string", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl CharPosition {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberLike {
        Number(f64),
        Text(String),
    }

    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberLike::Number(value)) => Ok(Some(value)),
        Some(NumberLike::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("not a number: {text:?}"))),
    }
}

/// Adjustment values converted to font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactors {
    pub width_scale: f64,
    pub size_factor: f64,
    pub letter_spacing: f64,
    pub baseline_offset: f64,
    pub kerning: f64,
    pub position: f64,
}

impl Adjustments {
    /// Load adjustments from `path`. A missing path or file yields the
    /// defaults; unreadable or malformed files are errors.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.filter(|path| path.exists()) else {
            match path {
                Some(path) => warn!("No adjustments file found at {}", path.display()),
                None => warn!("No adjustments file given, using defaults"),
            }
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read adjustments {}", path.display()))?;
        let adjustments = Self::from_json(&contents)
            .with_context(|| format!("Invalid adjustments {}", path.display()))?;
        info!("Loaded adjustments from {}", path.display());
        Ok(adjustments)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn factors(&self) -> AdjustmentFactors {
        let size_factor = self.optical_size / TYPEFACE_METRICS.optical_size;
        AdjustmentFactors {
            width_scale: self.char_width / 100.0,
            size_factor,
            letter_spacing: 20.0 * size_factor,
            baseline_offset: 40.0 * size_factor,
            kerning: 20.0 * size_factor,
            position: 40.0 * size_factor,
        }
    }

    /// Position entry for a character, if one with at least one axis exists
    pub fn position_for(&self, ch: char) -> Option<&CharPosition> {
        let mut buf = [0u8; 4];
        self.char_positions
            .get(ch.encode_utf8(&mut buf) as &str)
            .filter(|position| !position.is_empty())
    }

    /// Letter spacing converted to font units
    pub fn spacing_units(&self) -> f64 {
        (self.letter_spacing * self.factors().letter_spacing).trunc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_absent() {
        let adjustments = Adjustments::from_json("{}").unwrap();
        assert_eq!(adjustments, Adjustments::default());

        let factors = adjustments.factors();
        assert_eq!(factors.width_scale, 1.0);
        assert_eq!(factors.size_factor, 1.0);
        assert_eq!(factors.letter_spacing, 20.0);
        assert_eq!(factors.baseline_offset, 40.0);
        assert_eq!(factors.kerning, 20.0);
        assert_eq!(factors.position, 40.0);
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let adjustments =
            Adjustments::from_json(r#"{"letterSpacing": 2, "opticalSize": 24}"#).unwrap();
        assert_eq!(adjustments.letter_spacing, 2.0);
        assert_eq!(adjustments.char_width, 100.0);
        assert_eq!(adjustments.baseline_offset, 0.0);

        let factors = adjustments.factors();
        assert_eq!(factors.size_factor, 2.0);
        assert_eq!(factors.letter_spacing, 40.0);
        assert_eq!(adjustments.spacing_units(), 80.0);
    }

    #[test]
    fn test_char_positions_accept_numeric_strings() {
        let adjustments = Adjustments::from_json(
            r#"{"charPositions": {"A": {"x": "1.5", "y": -2}, "B": {}, "C": {"y": 0.5}}}"#,
        )
        .unwrap();

        let a = adjustments.position_for('A').unwrap();
        assert_eq!(a.x, Some(1.5));
        assert_eq!(a.y, Some(-2.0));
        // empty entries behave as if absent
        assert!(adjustments.position_for('B').is_none());
        assert_eq!(adjustments.position_for('C').unwrap().x, None);
        assert!(adjustments.position_for('D').is_none());
    }

    #[test]
    fn test_bad_position_value_is_an_error() {
        assert!(Adjustments::from_json(r#"{"charPositions": {"A": {"x": "left"}}}"#).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let adjustments = Adjustments::from_json(r#"{"fontWeight": 700, "charWidth": 90}"#).unwrap();
        assert_eq!(adjustments.factors().width_scale, 0.9);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("adjustments.json");
        assert_eq!(Adjustments::load(Some(&missing)).unwrap(), Adjustments::default());
        assert_eq!(Adjustments::load(None).unwrap(), Adjustments::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjustments.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Adjustments::load(Some(&path)).is_err());
    }
}
