//! Character map documents
//!
//! A JSON array of `{ "char": "A", "path": "glyphs/A.png" }` entries
//! naming the image each character is traced from.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry as it appears in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharMapping {
    #[serde(rename = "char")]
    pub character: String,
    pub path: PathBuf,
}

/// A validated entry
#[derive(Debug, Clone, PartialEq)]
pub struct CharEntry {
    pub ch: char,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct CharMap {
    pub entries: Vec<CharEntry>,
    /// Directory of the charmap file, used to resolve relative image paths
    pub base_dir: Option<PathBuf>,
}

impl CharMap {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read character map {}", path.display()))?;
        let mut charmap = Self::from_json(&contents)
            .with_context(|| format!("Invalid character map {}", path.display()))?;
        charmap.base_dir = path.parent().map(Path::to_path_buf);
        Ok(charmap)
    }

    /// Parse a charmap document. Later entries for the same character
    /// replace the path of earlier ones.
    pub fn from_json(contents: &str) -> Result<Self> {
        let mappings: Vec<CharMapping> = serde_json::from_str(contents)?;
        let mut entries: Vec<CharEntry> = Vec::with_capacity(mappings.len());

        for (index, mapping) in mappings.into_iter().enumerate() {
            let ch = single_char(&mapping.character).with_context(|| {
                format!("Entry {index} has invalid char {:?}", mapping.character)
            })?;
            match entries.iter_mut().find(|entry| entry.ch == ch) {
                Some(existing) => existing.path = mapping.path,
                None => entries.push(CharEntry {
                    ch,
                    path: mapping.path,
                }),
            }
        }

        Ok(Self {
            entries,
            base_dir: None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharEntry> {
        self.entries.iter()
    }

    /// Locate an entry's image: as given first, then relative to the
    /// charmap's own directory.
    pub fn resolve_image(&self, entry: &CharEntry) -> Option<PathBuf> {
        if entry.path.exists() {
            return Some(entry.path.clone());
        }
        if entry.path.is_relative() {
            if let Some(base_dir) = &self.base_dir {
                let candidate = base_dir.join(&entry.path);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

fn single_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        (None, _) => bail!("expected one character, got an empty string"),
        (Some(_), Some(_)) => bail!("expected one character, got {}", value.chars().count()),
    }
}
