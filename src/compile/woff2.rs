//! WOFF2 container
//!
//! Tables are stored with the null transform and compressed together as one
//! brotli stream. `glyf` and `loca` signal the null transform with version 3,
//! every other table with version 0.

use crate::compile::sfnt::{pad_to_four, Sfnt, Table};
use anyhow::{Context, Result};
use std::io::Write;

pub const WOFF2_SIGNATURE: u32 = u32::from_be_bytes(*b"wOF2");

const HEADER_LEN: usize = 48;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW: u32 = 22;
const CUSTOM_TAG_INDEX: u8 = 63;
const NULL_TRANSFORM_GLYF: u8 = 3 << 6;

/// Tags with a one byte directory encoding, by index
pub const KNOWN_TAGS: [[u8; 4]; 63] = [
    *b"cmap", *b"head", *b"hhea", *b"hmtx", *b"maxp", *b"name", *b"OS/2", *b"post",
    *b"cvt ", *b"fpgm", *b"glyf", *b"loca", *b"prep", *b"CFF ", *b"VORG", *b"EBDT",
    *b"EBLC", *b"gasp", *b"hdmx", *b"kern", *b"LTSH", *b"PCLT", *b"VDMX", *b"vhea",
    *b"vmtx", *b"BASE", *b"GDEF", *b"GPOS", *b"GSUB", *b"EBSC", *b"JSTF", *b"MATH",
    *b"CBDT", *b"CBLC", *b"COLR", *b"CPAL", *b"SVG ", *b"sbix", *b"acnt", *b"avar",
    *b"bdat", *b"bloc", *b"bsln", *b"cvar", *b"fdsc", *b"feat", *b"fmtx", *b"fvar",
    *b"gvar", *b"hsty", *b"just", *b"lcar", *b"mort", *b"morx", *b"opbd", *b"prop",
    *b"trak", *b"Zapf", *b"Silf", *b"Glat", *b"Gloc", *b"Feat", *b"Sill",
];

/// Append a UIntBase128 value: big-endian groups of seven bits, high bit
/// set on every byte but the last
pub fn write_base128(out: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    loop {
        groups[len] = (value & 0x7F) as u8;
        value >>= 7;
        len += 1;
        if value == 0 {
            break;
        }
    }
    for index in (0..len).rev() {
        let continuation = if index == 0 { 0 } else { 0x80 };
        out.push(groups[index] | continuation);
    }
}

fn write_directory_entry(out: &mut Vec<u8>, table: &Table) {
    let transform = if &table.tag == b"glyf" || &table.tag == b"loca" {
        NULL_TRANSFORM_GLYF
    } else {
        0
    };
    match KNOWN_TAGS.iter().position(|tag| tag == &table.tag) {
        Some(index) => out.push(index as u8 | transform),
        None => {
            out.push(CUSTOM_TAG_INDEX | transform);
            out.extend_from_slice(&table.tag);
        }
    }
    write_base128(out, table.data.len() as u32);
}

/// Directory order: sfnt order, with `loca` moved directly behind `glyf`
fn directory_order<'a, 'b>(sfnt: &'b Sfnt<'a>) -> Vec<&'b Table<'a>> {
    let mut tables: Vec<&Table> = sfnt.tables.iter().collect();
    tables.sort_by_key(|table| table.tag);
    if let Some(loca_index) = tables.iter().position(|table| &table.tag == b"loca") {
        let loca = tables.remove(loca_index);
        match tables.iter().position(|table| &table.tag == b"glyf") {
            Some(glyf_index) => tables.insert(glyf_index + 1, loca),
            None => tables.insert(loca_index, loca),
        }
    }
    tables
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut writer =
        brotli::CompressorWriter::new(Vec::new(), 4096, BROTLI_QUALITY, BROTLI_WINDOW);
    writer.write_all(data)?;
    writer.flush()?;
    Ok(writer.into_inner())
}

/// Wrap a compiled sfnt font in a WOFF2 container
pub fn encode_woff2(font: &[u8]) -> Result<Vec<u8>> {
    let sfnt = Sfnt::parse(font).context("Cannot build WOFF2 from compiled font")?;
    let tables = directory_order(&sfnt);

    let mut directory = Vec::new();
    let mut stream = Vec::new();
    for table in &tables {
        write_directory_entry(&mut directory, table);
        stream.extend_from_slice(table.data);
    }
    let compressed = compress(&stream).context("Failed to compress WOFF2 table data")?;

    let mut out = Vec::with_capacity(HEADER_LEN + directory.len() + compressed.len() + 3);
    out.extend_from_slice(&WOFF2_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&sfnt.flavor.to_be_bytes());
    // total length, patched below
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&sfnt.total_sfnt_size().to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    // no metadata or private block
    out.extend_from_slice(&[0u8; 20]);

    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    pad_to_four(&mut out);

    let total_len = (out.len() as u32).to_be_bytes();
    out[8..12].copy_from_slice(&total_len);
    Ok(out)
}
