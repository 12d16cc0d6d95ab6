//! Renderer module
//!
//! Writes per-word results in the selected output format: text or jsonl.

use serde::Serialize;
use std::io::{self, Write};

use crate::core::combine::{write_line, Renderings};
use crate::core::error::PinyinError;
use crate::core::model::{ErrorItem, PronunciationSet, QuerySource, Word, WordItem};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One space-separated line per word
    #[default]
    Text,
    /// One JSON object per word
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for word results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Write every rendering of `word`. Both formats stream the renderings
    /// as they are generated.
    pub fn render_word<W: Write>(
        &self,
        writer: &mut W,
        word: &Word,
        lists: &[PronunciationSet],
    ) -> io::Result<usize> {
        match self.config.format {
            OutputFormat::Text => write_line(writer, Renderings::new(lists)),
            OutputFormat::Jsonl => {
                let item = WordItem::new(word, lists);
                self.write_item(writer, &item)?;
                Ok(item
                    .count
                    .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX)))
            }
        }
    }

    /// Emit a structured error item. Text output leaves errors to stderr.
    pub fn render_error<W: Write>(
        &self,
        writer: &mut W,
        err: &PinyinError,
        word: Option<(&str, QuerySource)>,
    ) -> io::Result<()> {
        if self.config.format != OutputFormat::Jsonl {
            return Ok(());
        }
        let mut item = ErrorItem::new(err);
        if let Some((text, source)) = word {
            item = item.with_word(text, source);
        }
        self.write_item(writer, &item)
    }

    fn write_item<W: Write, T: Serialize>(&self, writer: &mut W, item: &T) -> io::Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut *writer, item)?;
        } else {
            serde_json::to_writer(&mut *writer, item)?;
        }
        writer.write_all(b"\n")
    }
}
