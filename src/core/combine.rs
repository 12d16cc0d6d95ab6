//! Word combinator
//!
//! Enumerates the Cartesian product of per-character pronunciation lists,
//! last position varying fastest, without materializing the product.

use serde::{Serialize, Serializer};
use std::io::{self, Write};

use crate::core::model::PronunciationSet;

/// Lazy iterator over every rendering of a word.
///
/// State is one index per position, so memory stays proportional to the
/// word length however large the product gets. A clone resumes from the
/// same position; [`Renderings::new`] starts over.
#[derive(Debug, Clone)]
pub struct Renderings<'a> {
    lists: &'a [PronunciationSet],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Renderings<'a> {
    pub fn new(lists: &'a [PronunciationSet]) -> Self {
        Self {
            lists,
            indices: vec![0; lists.len()],
            done: lists.iter().any(|list| list.is_empty()),
        }
    }

    /// Move the odometer one step; marks exhaustion on wrap-around.
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Renderings<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut rendering = String::new();
        for (list, &i) in self.lists.iter().zip(&self.indices) {
            rendering.push_str(&list[i]);
        }
        self.advance();
        Some(rendering)
    }
}

/// Serializes as a sequence of the renderings still to come, generated one
/// at a time. The iterator itself is not advanced.
impl Serialize for Renderings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.clone())
    }
}

/// Number of renderings `lists` produces, or `None` on overflow.
pub fn product_len(lists: &[PronunciationSet]) -> Option<u128> {
    lists
        .iter()
        .try_fold(1u128, |acc, list| acc.checked_mul(list.len() as u128))
}

/// Stream renderings as one space-separated line ending in `\n`.
/// Returns how many renderings were written.
pub fn write_line<W: Write, I: IntoIterator<Item = String>>(
    writer: &mut W,
    renderings: I,
) -> io::Result<usize> {
    let mut count = 0;
    for rendering in renderings {
        if count > 0 {
            writer.write_all(b" ")?;
        }
        writer.write_all(rendering.as_bytes())?;
        count += 1;
    }
    writer.write_all(b"\n")?;
    Ok(count)
}
