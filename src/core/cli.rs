//! Command line interface for glyphforge
//!
//! Positional arguments follow the batch conversion order: character map,
//! output base path, font name, then the optional format and adjustments
//! file. Everything else is an option.

use crate::compile::OutputFormat;
use crate::spacing::SpacingStrategy;
use clap::Parser;
use std::path::PathBuf;

/// glyphforge CLI arguments
///
/// Examples:
///   glyphforge charmap.json out/MyFont "My Font"                    # out/MyFont.ttf
///   glyphforge charmap.json out/MyFont "My Font" woff2              # out/MyFont.woff2
///   glyphforge charmap.json out/MyFont "My Font" otf adjust.json    # with adjustments
///   glyphforge charmap.json out/MyFont "My Font" --keep-ufo build   # keep the UFO source
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphforge",
    version,
    about = "Build a font from per-character glyph images",
    long_about = "glyphforge traces one image per character, spaces and kerns the glyphs with fixed heuristics plus optional adjustments, and compiles the result to TTF, OTF, WOFF or WOFF2."
)]
pub struct CliArgs {
    /// JSON array of {"char", "path"} entries
    #[clap(value_name = "CHARMAP_FILE")]
    pub charmap_file: PathBuf,

    /// Output path without extension; the format's extension is appended
    #[clap(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,

    /// Family name of the generated font
    #[clap(value_name = "FONT_NAME")]
    pub font_name: String,

    /// Output format
    #[clap(value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Ttf)]
    pub format: OutputFormat,

    /// JSON adjustments document (letter spacing, baseline, kerning, ...)
    #[clap(value_name = "ADJUSTMENTS_FILE")]
    pub adjustments_file: Option<PathBuf>,

    /// Side bearing heuristic
    #[clap(
        long = "spacing",
        value_enum,
        default_value_t = SpacingStrategy::Dynamic,
        help = "Side bearing heuristic",
        long_help = "Side bearing heuristic. 'dynamic' measures each outline and uses fixed bearings; 'balanced' derives bearings from the outline width per character class."
    )]
    pub spacing: SpacingStrategy,

    /// Directory to write the intermediate UFO into and keep
    #[clap(
        long = "keep-ufo",
        value_name = "DIR",
        help = "Keep the intermediate UFO in this directory"
    )]
    pub keep_ufo: Option<PathBuf>,

    /// fontc binary to compile with
    #[clap(
        long = "fontc",
        value_name = "PATH",
        help = "fontc binary (overrides settings.json)"
    )]
    pub fontc: Option<PathBuf>,

    /// Also write logs to ~/.config/glyphforge/logs/
    #[clap(long = "log-file", help = "Also write logs to the daily log file")]
    pub log_file: bool,

    /// Enable debug logging
    #[clap(long = "verbose", short = 'v', help = "Enable debug logging")]
    pub verbose: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if !self.charmap_file.is_file() {
            return Err(format!(
                "Character map does not exist: {}\nMake sure the path is correct and the file exists.",
                self.charmap_file.display()
            ));
        }
        if self.font_name.trim().is_empty() {
            return Err("Font name must not be empty".to_string());
        }
        if let Some(dir) = &self.keep_ufo {
            if dir.exists() && !dir.is_dir() {
                return Err(format!(
                    "--keep-ufo must name a directory: {}",
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    /// Final output path, `<output_file>.<format>`
    pub fn output_path(&self) -> PathBuf {
        self.format.output_path(&self.output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments_use_defaults() {
        let args = CliArgs::try_parse_from(["glyphforge", "map.json", "out/Font", "My Font"]).unwrap();
        assert_eq!(args.format, OutputFormat::Ttf);
        assert_eq!(args.adjustments_file, None);
        assert_eq!(args.spacing, SpacingStrategy::Dynamic);
        assert_eq!(args.output_path(), PathBuf::from("out/Font.ttf"));
    }

    #[test]
    fn test_all_positionals() {
        let args = CliArgs::try_parse_from([
            "glyphforge",
            "map.json",
            "out/Font",
            "My Font",
            "woff2",
            "adjust.json",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Woff2);
        assert_eq!(args.adjustments_file, Some(PathBuf::from("adjust.json")));
    }

    #[test]
    fn test_missing_arguments_are_rejected() {
        assert!(CliArgs::try_parse_from(["glyphforge", "map.json", "out/Font"]).is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(CliArgs::try_parse_from(["glyphforge", "m.json", "o", "F", "pfb"]).is_err());
    }

    #[test]
    fn test_validate_requires_existing_charmap() {
        let args = CliArgs::try_parse_from(["glyphforge", "/no/such/map.json", "o", "F"]).unwrap();
        assert!(args.validate().is_err());
    }
}
