//! Dictionary converter
//!
//! Turns a raw frequency dictionary into the canonical sorted store.
//! Raw lines look like:
//!
//! ```text
//! 的 4886 de:99.9671% di:0.0329%
//! 梀 4356 su yin
//! ```
//!
//! One character, a frequency field that is dropped, then pronunciations
//! with an optional `:probability` suffix.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::core::error::{PinyinError, Result as PinyinResult};
use crate::core::model::{PronunciationSet, Record};
use crate::core::util::{open_input, open_output};

/// Summary of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertStats {
    pub records: usize,

    /// Longest record line in bytes, newline included
    pub max_line: usize,
}

/// Parse one raw line. Lines that do not look like records yield `None`.
pub fn parse_line(line: &str, lineno: usize) -> PinyinResult<Option<Record>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Ok(None);
    }

    let mut chars = fields[0].chars();
    let character = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => return Ok(None),
    };

    let pronunciations = fields[2..]
        .iter()
        .map(|field| {
            let token = field.split_once(':').map_or(*field, |(head, _)| head);
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(PinyinError::InvalidPronunciation {
                    line: lineno,
                    token: (*field).to_string(),
                });
            }
            Ok(token.to_string())
        })
        .collect::<PinyinResult<PronunciationSet>>()?;

    Ok(Some(Record::new(character, pronunciations)))
}

/// Collect every record, sorted by code point. A repeated character keeps
/// its last definition.
pub fn parse_raw<B: BufRead>(input: B) -> PinyinResult<BTreeMap<char, PronunciationSet>> {
    let mut records = BTreeMap::new();
    for (i, line) in input.lines().enumerate() {
        let lineno = i + 1;
        if let Some(record) = parse_line(&line?, lineno)? {
            if records
                .insert(record.character, record.pronunciations)
                .is_some()
            {
                warn!(line = lineno, ch = %record.character, "duplicate character; keeping the later entry");
            }
        }
    }
    Ok(records)
}

/// Write the framed store: a leading `\n`, then one line per record.
pub fn write_store<W: Write>(
    out: &mut W,
    records: &BTreeMap<char, PronunciationSet>,
) -> io::Result<ConvertStats> {
    let mut stats = ConvertStats::default();
    out.write_all(b"\n")?;
    for (ch, pronunciations) in records {
        let mut line = String::new();
        line.push(*ch);
        line.push_str(&pronunciations.join(","));
        line.push('\n');
        out.write_all(line.as_bytes())?;

        stats.records += 1;
        stats.max_line = stats.max_line.max(line.len());
    }
    Ok(stats)
}

/// Convert a raw dictionary stream into a store stream.
pub fn convert<B: BufRead, W: Write>(input: B, out: &mut W) -> PinyinResult<ConvertStats> {
    let records = parse_raw(input)?;
    Ok(write_store(out, &records)?)
}

/// Run the `convert` command
pub fn run_convert(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let reader = open_input(input)?;
    let mut writer = open_output(output)?;

    let stats = convert(reader, &mut writer)?;
    writer.flush().context("Failed to flush converted data file")?;

    info!(
        records = stats.records,
        max_line = stats.max_line,
        "converted pinyin data file; pass the max_line value as --max-line"
    );
    Ok(())
}
