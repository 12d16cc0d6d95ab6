//! Query driver
//!
//! Validates each word, looks every character up in the store, and writes
//! the word's renderings before reading the next word.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::core::combine::product_len;
use crate::core::error::{PinyinError, Result as PinyinResult};
use crate::core::model::{QuerySource, Word};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{open_input, open_output, trim_line_end};
use crate::store::locator::{DictStore, StoreConfig};
use crate::store::reader::ReadAt;

/// Resolve one word and write its renderings. Returns the rendering count.
///
/// On failure the word's own error is returned even if writing the jsonl
/// error item fails as well.
pub fn process_word<R: ReadAt, W: Write>(
    store: &DictStore<R>,
    text: &str,
    source: QuerySource,
    renderer: &Renderer,
    out: &mut W,
) -> PinyinResult<usize> {
    let result = resolve_and_render(store, text, source, renderer, out);
    if let Err(err) = &result {
        let reported = renderer
            .render_error(out, err, Some((text, source)))
            .and_then(|()| out.flush());
        if let Err(io_err) = reported {
            warn!(source = %source, error = %io_err, "could not write error item");
        }
    }
    result
}

fn resolve_and_render<R: ReadAt, W: Write>(
    store: &DictStore<R>,
    text: &str,
    source: QuerySource,
    renderer: &Renderer,
    out: &mut W,
) -> PinyinResult<usize> {
    let word = Word::parse(text, source)?;
    let lists = word
        .chars()
        .map(|ch| store.lookup(ch))
        .collect::<PinyinResult<Vec<_>>>()?;

    debug!(
        word = %word.as_str(),
        source = %source,
        renderings = ?product_len(&lists),
        "resolved word"
    );

    let count = renderer.render_word(out, &word, &lists)?;
    out.flush()?;
    Ok(count)
}

/// Query each command-line argument in order.
pub fn query_args<R: ReadAt, W: Write>(
    store: &DictStore<R>,
    words: &[String],
    renderer: &Renderer,
    out: &mut W,
) -> PinyinResult<usize> {
    for (i, word) in words.iter().enumerate() {
        process_word(store, word, QuerySource::Arg(i), renderer, out)?;
    }
    Ok(words.len())
}

/// Query one word per input line. A final line without `\n` still counts.
pub fn query_lines<R: ReadAt, B: BufRead, W: Write>(
    store: &DictStore<R>,
    mut input: B,
    renderer: &Renderer,
    out: &mut W,
) -> PinyinResult<usize> {
    let mut line = String::new();
    let mut lineno = 0;
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        lineno += 1;
        process_word(
            store,
            trim_line_end(&line),
            QuerySource::Line(lineno),
            renderer,
            out,
        )?;
    }
    Ok(lineno)
}

/// Run the `of` command
pub fn run_query(config: &StoreConfig, words: &[String], render_config: RenderConfig) -> Result<()> {
    let store = DictStore::open(config).map_err(|err| match err {
        PinyinError::Io(_) => anyhow::Error::new(err)
            .context(format!("cannot open data file {}", config.path.display())),
        other => anyhow::Error::new(other),
    })?;

    debug!(
        size = store.size(),
        max_line = store.max_line(),
        "data file ready"
    );

    let renderer = Renderer::with_config(render_config);
    let mut out = open_output(None)?;

    let result = if words.is_empty() {
        let input = open_input(None)?;
        query_lines(&store, input, &renderer, &mut out)
    } else {
        query_args(&store, words, &renderer, &mut out)
    };
    let processed = result.map_err(|err| {
        if err.is_format_violation() {
            anyhow::Error::new(err).context(format!("malformed data file {}", config.path.display()))
        } else {
            anyhow::Error::new(err)
        }
    })?;

    out.flush().context("Failed to flush output")?;
    info!(words = processed, "query finished");
    Ok(())
}
