//! WOFF 1.0 container
//!
//! Each sfnt table is zlib compressed on its own and stored only when
//! compression makes it smaller.

use crate::compile::sfnt::{pad_to_four, padded_len, Sfnt};
use anyhow::{Context, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

pub const WOFF_SIGNATURE: u32 = u32::from_be_bytes(*b"wOFF");

const HEADER_LEN: usize = 44;
const ENTRY_LEN: usize = 20;

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Wrap a compiled sfnt font in a WOFF container
pub fn encode_woff(font: &[u8]) -> Result<Vec<u8>> {
    let sfnt = Sfnt::parse(font).context("Cannot build WOFF from compiled font")?;

    let mut tables: Vec<_> = sfnt.tables.iter().collect();
    tables.sort_by_key(|table| table.tag);

    let mut stored = Vec::with_capacity(tables.len());
    for table in &tables {
        let compressed = compress(table.data)
            .with_context(|| format!("Failed to compress table '{}'", table.tag_str()))?;
        if compressed.len() < table.data.len() {
            stored.push(compressed);
        } else {
            stored.push(table.data.to_vec());
        }
    }

    let directory_end = HEADER_LEN + ENTRY_LEN * tables.len();
    let total_len = directory_end + stored.iter().map(|data| padded_len(data.len())).sum::<usize>();

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&WOFF_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&sfnt.flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&sfnt.total_sfnt_size().to_be_bytes());
    // font version 1.0
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    // no metadata or private block
    out.extend_from_slice(&[0u8; 20]);

    let mut offset = directory_end;
    for (table, data) in tables.iter().zip(&stored) {
        out.extend_from_slice(&table.tag);
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(&(table.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&table.checksum.to_be_bytes());
        offset += padded_len(data.len());
    }
    for data in &stored {
        out.extend_from_slice(data);
        pad_to_four(&mut out);
    }

    debug_assert_eq!(out.len(), total_len);
    Ok(out)
}
