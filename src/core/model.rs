//! Data model
//!
//! Records decoded from the store, validated query words, and the
//! serializable per-word result used by the jsonl output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::combine::{product_len, Renderings};
use crate::core::error::{PinyinError, Result};

/// Matches the first code point outside the Han script.
static NON_HAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\P{Han}").expect("Invalid NON_HAN_RE regex"));

/// Ordered romanizations of one character, duplicates preserved.
pub type PronunciationSet = Vec<String>;

/// One line of the store: a character and its pronunciations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub character: char,
    pub pronunciations: PronunciationSet,
}

impl Record {
    pub fn new(character: char, pronunciations: PronunciationSet) -> Self {
        Self {
            character,
            pronunciations,
        }
    }

    /// Canonical line without the trailing newline: `<char><p1>,<p2>...`
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(4 + self.pronunciations.len() * 6);
        line.push(self.character);
        line.push_str(&self.pronunciations.join(","));
        line
    }
}

/// Where a query word came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    /// 0-based command-line argument index
    Arg(usize),
    /// 1-based stdin line number
    Line(usize),
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySource::Arg(i) => write!(f, "arg {}", i),
            QuerySource::Line(n) => write!(f, "line {}", n),
        }
    }
}

/// A query word made only of Han characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    source: QuerySource,
}

impl Word {
    /// Validate `text`, rejecting it if any code point is not Han.
    pub fn parse(text: &str, source: QuerySource) -> Result<Self> {
        if let Some(m) = NON_HAN_RE.find(text) {
            let ch = m.as_str().chars().next().unwrap_or_default();
            return Err(PinyinError::NonHan {
                word: text.to_string(),
                origin: source.to_string(),
                ch,
            });
        }
        Ok(Self {
            text: text.to_string(),
            source,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> QuerySource {
        self.source
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }
}

/// The kind of a jsonl output item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Word,
    Error,
}

/// Error information attached to an output item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl From<&PinyinError> for ErrorInfo {
    fn from(err: &PinyinError) -> Self {
        Self {
            code: err.as_code().to_string(),
            message: err.to_string(),
        }
    }
}

/// One word's result in structured form. The renderings are streamed
/// while the item is serialized.
#[derive(Debug, Clone, Serialize)]
pub struct WordItem<'a> {
    pub kind: Kind,
    pub word: &'a str,

    /// `arg N` or `line N`
    pub source: String,

    /// Product size; absent when it does not fit in a u128
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u128>,

    pub renderings: Renderings<'a>,
}

impl<'a> WordItem<'a> {
    pub fn new(word: &'a Word, lists: &'a [PronunciationSet]) -> Self {
        Self {
            kind: Kind::Word,
            word: word.as_str(),
            source: word.source().to_string(),
            count: product_len(lists),
            renderings: Renderings::new(lists),
        }
    }
}

/// A failed word in structured form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    pub kind: Kind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub errors: Vec<ErrorInfo>,
}

impl ErrorItem {
    pub fn new(err: &PinyinError) -> Self {
        Self {
            kind: Kind::Error,
            word: None,
            source: None,
            errors: vec![ErrorInfo::from(err)],
        }
    }

    pub fn with_word(mut self, word: &str, source: QuerySource) -> Self {
        self.word = Some(word.to_string());
        self.source = Some(source.to_string());
        self
    }
}
