//! Record decoder: one store line into a character and its pronunciations.

use crate::core::error::{PinyinError, Result};
use crate::core::model::Record;

/// Decode a record line (without its newline) that starts at byte `offset`.
///
/// Only UTF-8 well-formedness is checked here; pronunciation tokens were
/// validated when the store was built.
pub fn decode(line: &[u8], offset: u64) -> Result<Record> {
    let text = std::str::from_utf8(line).map_err(|_| PinyinError::InvalidUtf8 { offset })?;

    let mut chars = text.chars();
    let character = chars.next().ok_or(PinyinError::BlankRecord { offset })?;

    let rest = chars.as_str();
    let pronunciations = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::to_string).collect()
    };

    Ok(Record::new(character, pronunciations))
}

/// Decode only the leading character. The search uses this to compare
/// without splitting the pronunciation list.
pub fn leading_char(line: &[u8], offset: u64) -> Result<char> {
    // A UTF-8 code point is at most 4 bytes.
    let head = &line[..line.len().min(4)];
    let valid = match std::str::from_utf8(head) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 => {
            // valid_up_to() is on a char boundary, so this cannot fail.
            std::str::from_utf8(&head[..e.valid_up_to()])
                .map_err(|_| PinyinError::InvalidUtf8 { offset })?
        }
        Err(_) => return Err(PinyinError::InvalidUtf8 { offset }),
    };
    valid
        .chars()
        .next()
        .ok_or(PinyinError::BlankRecord { offset })
}
