//! Legacy Word 97-2003 (.doc) text extraction.
//!
//! The binary format stores text in the `WordDocument` stream of an OLE
//! compound file. Its location is described by the piece table (PlcPcd)
//! inside the Clx structure of the table stream. Each piece is either
//! 8-bit Windows-1252 ("compressed") or UTF-16LE.

use cfb::CompoundFile;
use docqa_core::{AppError, AppResult};
use std::io::{Cursor, Read};

const WORD_IDENT: u16 = 0xA5EC;
const FLAG_ENCRYPTED: u16 = 0x0100;
const FLAG_WHICH_TABLE: u16 = 0x0200;
const FC_COMPRESSED: u32 = 0x4000_0000;

// Offsets into FibRgLw97 and FibRgFcLcb97, in entries
const CCP_TEXT_INDEX: usize = 3;
const FC_CLX_INDEX: usize = 33;

const CLX_PRC: u8 = 0x01;
const CLX_PCDT: u8 = 0x02;
const PCD_SIZE: usize = 8;

// Field markers
const FIELD_BEGIN: char = '\u{13}';
const FIELD_SEPARATOR: char = '\u{14}';
const FIELD_END: char = '\u{15}';

/// Extract the main document text.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let mut file = CompoundFile::open(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Not an OLE compound file: {}", e)))?;

    let word = read_stream(&mut file, "/WordDocument")?;
    let fib = Fib::parse(&word)?;

    if fib.encrypted {
        return Err(AppError::Extraction(
            "Encrypted Word documents are not supported".to_string(),
        ));
    }

    let table_name = if fib.uses_table_1 { "/1Table" } else { "/0Table" };
    let table = read_stream(&mut file, table_name)?;

    let clx = slice(&table, fib.fc_clx as usize, fib.lcb_clx as usize)?;
    let pieces = parse_piece_table(clx)?;

    let mut raw = String::new();
    for piece in &pieces {
        piece.decode_into(&word, &mut raw)?;
    }

    let main_text: String = if fib.ccp_text > 0 {
        raw.chars().take(fib.ccp_text as usize).collect()
    } else {
        raw
    };

    Ok(clean_text(&main_text))
}

fn read_stream(file: &mut CompoundFile<Cursor<&[u8]>>, name: &str) -> AppResult<Vec<u8>> {
    let mut stream = file
        .open_stream(name)
        .map_err(|e| AppError::Extraction(format!("Missing {} stream: {}", name, e)))?;

    let mut buf = Vec::new();
    stream
        .read_to_end(&mut buf)
        .map_err(|e| AppError::Extraction(format!("Failed to read {} stream: {}", name, e)))?;

    Ok(buf)
}

/// The parts of the File Information Block needed to find the text.
#[derive(Debug)]
struct Fib {
    encrypted: bool,
    uses_table_1: bool,
    ccp_text: u32,
    fc_clx: u32,
    lcb_clx: u32,
}

impl Fib {
    fn parse(word: &[u8]) -> AppResult<Self> {
        if read_u16(word, 0)? != WORD_IDENT {
            return Err(AppError::Extraction(
                "WordDocument stream has an invalid signature".to_string(),
            ));
        }

        let flags = read_u16(word, 0x0A)?;

        // FibBase is 32 bytes, followed by three variable-length blocks
        let csw = read_u16(word, 32)? as usize;
        let rg_lw_count_at = 34 + csw * 2;
        let cslw = read_u16(word, rg_lw_count_at)? as usize;
        let rg_lw_at = rg_lw_count_at + 2;

        let ccp_text = read_u32(word, rg_lw_at + CCP_TEXT_INDEX * 4)?;

        let rg_fc_count_at = rg_lw_at + cslw * 4;
        let cb_rg_fc_lcb = read_u16(word, rg_fc_count_at)? as usize;
        if cb_rg_fc_lcb <= FC_CLX_INDEX {
            return Err(AppError::Extraction(
                "File Information Block has no Clx entry".to_string(),
            ));
        }

        let clx_at = rg_fc_count_at + 2 + FC_CLX_INDEX * 8;

        Ok(Self {
            encrypted: flags & FLAG_ENCRYPTED != 0,
            uses_table_1: flags & FLAG_WHICH_TABLE != 0,
            ccp_text,
            fc_clx: read_u32(word, clx_at)?,
            lcb_clx: read_u32(word, clx_at + 4)?,
        })
    }
}

/// One contiguous run of characters in the WordDocument stream.
#[derive(Debug, PartialEq)]
struct Piece {
    cp_start: u32,
    cp_end: u32,
    fc: u32,
}

impl Piece {
    fn decode_into(&self, word: &[u8], out: &mut String) -> AppResult<()> {
        let count = self.cp_end.saturating_sub(self.cp_start) as usize;

        if self.fc & FC_COMPRESSED != 0 {
            let offset = ((self.fc & !FC_COMPRESSED) / 2) as usize;
            let bytes = slice(word, offset, count)?;
            out.extend(bytes.iter().map(|b| decode_cp1252(*b)));
        } else {
            let bytes = slice(word, self.fc as usize, count * 2)?;
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            out.push_str(&String::from_utf16_lossy(&units));
        }

        Ok(())
    }
}

/// Walk the Clx, skipping property modifiers, and parse the PlcPcd.
fn parse_piece_table(clx: &[u8]) -> AppResult<Vec<Piece>> {
    let mut pos = 0usize;

    while pos < clx.len() {
        match clx[pos] {
            CLX_PRC => {
                let cb = read_u16(clx, pos + 1)? as usize;
                pos += 3 + cb;
            }
            CLX_PCDT => {
                let lcb = read_u32(clx, pos + 1)? as usize;
                let plc = slice(clx, pos + 5, lcb)?;
                return parse_plc_pcd(plc);
            }
            other => {
                return Err(AppError::Extraction(format!(
                    "Unexpected Clx entry type 0x{:02X}",
                    other
                )));
            }
        }
    }

    Err(AppError::Extraction("Clx has no piece table".to_string()))
}

fn parse_plc_pcd(plc: &[u8]) -> AppResult<Vec<Piece>> {
    // n+1 character positions followed by n 8-byte piece descriptors
    if plc.len() < 4 || (plc.len() - 4) % (4 + PCD_SIZE) != 0 {
        return Err(AppError::Extraction(format!(
            "Malformed piece table of {} bytes",
            plc.len()
        )));
    }

    let count = (plc.len() - 4) / (4 + PCD_SIZE);
    let pcd_at = (count + 1) * 4;

    let mut pieces = Vec::with_capacity(count);
    for i in 0..count {
        pieces.push(Piece {
            cp_start: read_u32(plc, i * 4)?,
            cp_end: read_u32(plc, (i + 1) * 4)?,
            fc: read_u32(plc, pcd_at + i * PCD_SIZE + 2)?,
        });
    }

    Ok(pieces)
}

/// Turn Word control characters into plain text and drop field codes.
fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // One entry per open field: true while still inside its code part
    let mut fields: Vec<bool> = Vec::new();

    for c in raw.chars() {
        match c {
            FIELD_BEGIN => fields.push(true),
            FIELD_SEPARATOR => {
                if let Some(in_code) = fields.last_mut() {
                    *in_code = false;
                }
            }
            FIELD_END => {
                fields.pop();
            }
            _ if fields.iter().any(|in_code| *in_code) => {}
            '\r' | '\u{0B}' | '\u{0C}' => out.push('\n'),
            '\u{07}' => out.push('\t'),
            '\u{1E}' => out.push('-'),
            '\t' | '\n' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out.trim_end().to_string()
}

fn decode_cp1252(b: u8) -> char {
    const HIGH: [char; 32] = [
        '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8D}', 'Ž',
        '\u{8F}', '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ',
        '\u{9D}', 'ž', 'Ÿ',
    ];

    match b {
        0x80..=0x9F => HIGH[(b - 0x80) as usize],
        _ => char::from(b),
    }
}

fn slice(data: &[u8], offset: usize, len: usize) -> AppResult<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            AppError::Extraction(format!(
                "Structure at offset {} (len {}) is out of bounds",
                offset, len
            ))
        })
}

fn read_u16(data: &[u8], offset: usize) -> AppResult<u16> {
    let b = slice(data, offset, 2)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> AppResult<u32> {
    let b = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}
