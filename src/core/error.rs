//! Error types shared by the store, combinator and flows.

use thiserror::Error;

/// Every anomaly the engine can detect. None of them is recovered locally;
/// the caller decides whether one bad query aborts the batch.
#[derive(Debug, Error)]
pub enum PinyinError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data file does not start with a newline")]
    MissingLeadingNewline,

    #[error("data file does not end with a newline")]
    MissingTrailingNewline,

    #[error("data file has line longer than {bound}, specify a correct --max-line option")]
    LineTooLong { bound: usize },

    #[error("data file has a blank record at byte {offset}")]
    BlankRecord { offset: u64 },

    #[error("data file has invalid UTF-8 in the record at byte {offset}")]
    InvalidUtf8 { offset: u64 },

    /// The search window lost its newline framing. Indicates a bug, not bad data.
    #[error("binary search invariant violated: {what} (low={low}, high={high}, realmid={realmid})")]
    SearchInvariant {
        what: &'static str,
        low: u64,
        high: u64,
        realmid: u64,
    },

    #[error("no pinyin found for character {0}")]
    NotFound(char),

    #[error("{origin} {word} contains non-Han character {ch:?}")]
    NonHan {
        word: String,
        origin: String,
        ch: char,
    },

    #[error("line {line} of pinyin data file has non-pinyin {token:?}")]
    InvalidPronunciation { line: usize, token: String },

    #[error("--max-line must be at least 1")]
    InvalidMaxLine,
}

impl PinyinError {
    /// Stable machine-readable code, used by the jsonl output.
    pub fn as_code(&self) -> &'static str {
        match self {
            PinyinError::Io(_) => "IO_ERROR",
            PinyinError::MissingLeadingNewline => "MISSING_LEADING_NEWLINE",
            PinyinError::MissingTrailingNewline => "MISSING_TRAILING_NEWLINE",
            PinyinError::LineTooLong { .. } => "LINE_TOO_LONG",
            PinyinError::BlankRecord { .. } => "BLANK_RECORD",
            PinyinError::InvalidUtf8 { .. } => "INVALID_UTF8",
            PinyinError::SearchInvariant { .. } => "SEARCH_INVARIANT",
            PinyinError::NotFound(_) => "LOOKUP_MISS",
            PinyinError::NonHan { .. } => "NON_HAN",
            PinyinError::InvalidPronunciation { .. } => "INVALID_PRONUNCIATION",
            PinyinError::InvalidMaxLine => "INVALID_MAX_LINE",
        }
    }

    /// Whether the error comes from a malformed data file rather than a query.
    pub fn is_format_violation(&self) -> bool {
        matches!(
            self,
            PinyinError::MissingLeadingNewline
                | PinyinError::MissingTrailingNewline
                | PinyinError::LineTooLong { .. }
                | PinyinError::BlankRecord { .. }
                | PinyinError::InvalidUtf8 { .. }
                | PinyinError::InvalidPronunciation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PinyinError>;
