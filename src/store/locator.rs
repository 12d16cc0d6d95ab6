//! Disk binary-search locator
//!
//! Finds a character's record in the sorted store using bounded positioned
//! reads only. No index is built and the file is never loaded whole.
//!
//! The store is framed by a leading and a trailing `\n`, so during the
//! search `file[low - 1]` (or `file[low]`) and `file[high]` are always
//! newlines and neither end of the file needs special handling.

use std::cmp::Ordering;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::core::error::{PinyinError, Result};
use crate::core::model::{PronunciationSet, Record};
use crate::store::reader::{read_full_at, ReadAt};
use crate::store::record::{decode, leading_char};

/// Default maximum byte size of a store line, newline included.
pub const DEFAULT_MAX_LINE: usize = 32;

/// Where the store lives and how long its lines may be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,

    /// Upper bound on line size in bytes, trusted and never measured.
    pub max_line: usize,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_line: DEFAULT_MAX_LINE,
        }
    }

    pub fn with_max_line(mut self, max_line: usize) -> Self {
        self.max_line = max_line;
        self
    }
}

/// A record found by [`DictStore::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Byte offset of the first byte of the record line
    pub offset: u64,

    /// Line length in bytes, newline excluded
    pub len: usize,

    pub record: Record,
}

/// Read-only sorted record store.
#[derive(Debug)]
pub struct DictStore<R = File> {
    source: R,
    size: u64,
    max_line: usize,
}

impl DictStore<File> {
    /// Open the store file and check its newline framing.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if config.max_line == 0 {
            return Err(PinyinError::InvalidMaxLine);
        }
        let file = File::open(&config.path)?;
        let size = file.metadata()?.len();
        debug!(
            path = %config.path.display(),
            size,
            max_line = config.max_line,
            "opened pinyin data file"
        );
        Self::from_source(file, size, config.max_line)
    }
}

impl<R: ReadAt> DictStore<R> {
    /// Wrap any positioned byte source of `size` bytes.
    pub fn from_source(source: R, size: u64, max_line: usize) -> Result<Self> {
        if max_line == 0 {
            return Err(PinyinError::InvalidMaxLine);
        }

        let mut b = [0u8; 1];
        if size == 0 || read_full_at(&source, &mut b, 0)? != 1 || b[0] != b'\n' {
            return Err(PinyinError::MissingLeadingNewline);
        }
        if read_full_at(&source, &mut b, size - 1)? != 1 || b[0] != b'\n' {
            return Err(PinyinError::MissingTrailingNewline);
        }

        Ok(Self {
            source,
            size,
            max_line,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn max_line(&self) -> usize {
        self.max_line
    }

    /// Pronunciations of `target`, or [`PinyinError::NotFound`].
    pub fn lookup(&self, target: char) -> Result<PronunciationSet> {
        let located = self.locate(target)?;
        trace!(ch = %target, offset = located.offset, len = located.len, "located");
        Ok(located.record.pronunciations)
    }

    /// Binary search for the record whose leading character is `target`.
    ///
    /// The window `[low, high)` shrinks every round. Each round reads at most
    /// three windows of `max_line` bytes.
    pub fn locate(&self, target: char) -> Result<Located> {
        // No line is longer than the file, so the window never needs to be.
        let window = self
            .max_line
            .min(usize::try_from(self.size).unwrap_or(usize::MAX));
        let bound = window as u64;
        let mut buf = vec![0u8; window];
        let (mut low, mut high) = (1u64, self.size - 1);

        while low < high {
            let mid = low + (high - low) / 2;

            // The next newline at or after mid is the real mid.
            let n = self.read_window(&mut buf, mid)?;
            let mut realmid = mid + self.find_newline(&buf[..n])? as u64;

            if realmid > high {
                return Err(PinyinError::SearchInvariant {
                    what: "forward scan moved past high",
                    low,
                    high,
                    realmid,
                });
            }
            if realmid == high {
                // file[mid..high] has no newline; take the last one before mid.
                let (off, len) = if mid >= bound {
                    (mid - bound, window)
                } else {
                    (0, mid as usize)
                };
                let n = self.read_window(&mut buf[..len], off)?;
                realmid = off + self.find_last_newline(&buf[..n])? as u64;
                if realmid + 1 < low {
                    return Err(PinyinError::SearchInvariant {
                        what: "backward scan moved before low - 1",
                        low,
                        high,
                        realmid,
                    });
                }
            }

            let start = realmid + 1;
            let n = self.read_window(&mut buf, start)?;
            let len = self.find_newline(&buf[..n])?;
            let line = &buf[..len];
            let found = leading_char(line, start)?;
            trace!(low, high, mid, realmid, found = %found, "search step");

            match target.cmp(&found) {
                Ordering::Equal => {
                    let record = decode(line, start)?;
                    return Ok(Located {
                        offset: start,
                        len,
                        record,
                    });
                }
                Ordering::Less => high = realmid,
                Ordering::Greater => low = start + len as u64,
            }
        }

        debug!(ch = %target, "character not in data file");
        Err(PinyinError::NotFound(target))
    }

    fn read_window(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        Ok(read_full_at(&self.source, buf, offset)?)
    }

    fn find_newline(&self, window: &[u8]) -> Result<usize> {
        window
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(PinyinError::LineTooLong {
                bound: self.max_line,
            })
    }

    fn find_last_newline(&self, window: &[u8]) -> Result<usize> {
        window
            .iter()
            .rposition(|&b| b == b'\n')
            .ok_or(PinyinError::LineTooLong {
                bound: self.max_line,
            })
    }
}
