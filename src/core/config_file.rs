//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphforge/settings.json

use crate::outline::TraceOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FONTC: &str = "fontc";

/// User configuration from ~/.config/glyphforge/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    /// fontc binary, looked up on PATH when relative
    pub fontc_path: Option<PathBuf>,
    /// ttfautohint binary; hinting is skipped when unset
    pub ttfautohint_path: Option<PathBuf>,
    /// Ink coverage at which a pixel becomes part of the outline
    pub trace_threshold: Option<f64>,
    /// Outline simplification tolerance in font units
    pub simplify_tolerance: Option<f64>,
    /// Write logs to ~/.config/glyphforge/logs/ as well as stderr
    pub log_to_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the glyphforge config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphforge")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::config_path())
    }

    /// `Ok(None)` when the file does not exist; read and parse failures are
    /// returned so the caller can report them once logging is up
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }
}

/// Effective settings after layering CLI, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fontc_path: PathBuf,
    pub ttfautohint_path: Option<PathBuf>,
    pub trace: TraceOptions,
    pub log_to_file: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None, false)
    }
}

impl Settings {
    /// Priority order:
    /// 1. CLI argument
    /// 2. Config file setting (~/.config/glyphforge/settings.json)
    /// 3. Built-in default
    pub fn resolve(config: Option<ConfigFile>, cli_fontc: Option<PathBuf>, cli_log_file: bool) -> Self {
        let config = config.unwrap_or_default();
        let defaults = TraceOptions::default();

        let trace = TraceOptions {
            threshold: config
                .trace_threshold
                .filter(|value| *value > 0.0 && *value <= 1.0)
                .unwrap_or(defaults.threshold),
            simplify_tolerance: config
                .simplify_tolerance
                .filter(|value| *value >= 0.0)
                .unwrap_or(defaults.simplify_tolerance),
            ..defaults
        };

        Self {
            fontc_path: cli_fontc
                .or(config.fontc_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FONTC)),
            ttfautohint_path: config.ttfautohint_path,
            trace,
            log_to_file: cli_log_file || config.log_to_file.unwrap_or(false),
        }
    }
}
