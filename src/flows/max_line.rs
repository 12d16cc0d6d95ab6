//! Longest line of a stream, in bytes with its newline.

use anyhow::{Context, Result};
use std::io::{self, BufRead};
use std::path::Path;

use crate::core::util::open_input;

/// Largest line size in `input`. A final line without `\n` counts its own
/// bytes; empty input gives 0.
pub fn max_line_len<B: BufRead>(mut input: B) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut max = 0;
    loop {
        buf.clear();
        let n = input.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        max = max.max(n);
    }
    Ok(max)
}

/// Run the `max-line` command
pub fn run_max_line(input: Option<&Path>) -> Result<()> {
    let reader = open_input(input)?;
    let max = max_line_len(reader).context("error when reading line")?;
    println!("{}", max);
    Ok(())
}
