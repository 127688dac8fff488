//! Font binary output
//!
//! fontc compiles the UFO to a TrueType font; the requested output format
//! is then produced by wrapping that font's tables.

pub mod autohint;
pub mod fontc;
pub mod sfnt;
pub mod woff;
pub mod woff2;

pub use autohint::AutoHinter;
pub use fontc::FontCompiler;

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Ttf,
    /// OpenType with TrueType outlines
    Otf,
    Woff,
    Woff2,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Ttf => "ttf",
            OutputFormat::Otf => "otf",
            OutputFormat::Woff => "woff",
            OutputFormat::Woff2 => "woff2",
        }
    }

    /// `<output_file>.<extension>`
    pub fn output_path(self, output_file: &Path) -> PathBuf {
        let mut path = output_file.as_os_str().to_owned();
        path.push(".");
        path.push(self.extension());
        PathBuf::from(path)
    }

    /// Produce the final file contents from a compiled sfnt font
    pub fn encode(self, font: Vec<u8>) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Ttf | OutputFormat::Otf => {
                sfnt::Sfnt::parse(&font)?;
                Ok(font)
            }
            OutputFormat::Woff => woff::encode_woff(&font),
            OutputFormat::Woff2 => woff2::encode_woff2(&font),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
