//! sfnt table access
//!
//! Pulls the tables out of a compiled font so the web containers can
//! rewrap them. Table contents are never interpreted.

use anyhow::{Context, Result};
use read_fonts::FontRef;

const HEADER_LEN: usize = 12;
const RECORD_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    pub tag: [u8; 4],
    pub checksum: u32,
    pub data: &'a [u8],
}

impl Table<'_> {
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sfnt<'a> {
    pub flavor: u32,
    /// In table directory order
    pub tables: Vec<Table<'a>>,
}

impl<'a> Sfnt<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let font = FontRef::new(data).context("Not an sfnt font")?;
        let directory = &font.table_directory;

        let tables = directory
            .table_records()
            .iter()
            .map(|record| {
                let tag = record.tag();
                let table_data = font
                    .table_data(tag)
                    .with_context(|| format!("Table '{tag}' lies outside the font"))?;
                Ok(Table {
                    tag: tag.to_be_bytes(),
                    checksum: record.checksum(),
                    data: table_data.as_bytes(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            flavor: directory.sfnt_version(),
            tables,
        })
    }

    /// Size of this font written as a plain sfnt with padded tables
    pub fn total_sfnt_size(&self) -> u32 {
        let tables: usize = self.tables.iter().map(|table| padded_len(table.data.len())).sum();
        (HEADER_LEN + RECORD_LEN * self.tables.len() + tables) as u32
    }
}

pub fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

pub fn pad_to_four(out: &mut Vec<u8>) {
    out.resize(padded_len(out.len()), 0);
}
