//! Loading line-delimited word lists
//!
//! Input is read as UTF-8, the same encoding the hash functions apply, so a
//! word loaded here hashes identically to the same word typed as a literal.

use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read one word per line, skipping empty lines
///
/// Line terminators (`\n` or `\r\n`) are stripped; other whitespace is kept.
/// Invalid UTF-8 surfaces as [`BloomError::Io`](crate::BloomError::Io).
pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            words.push(line);
        }
    }
    Ok(words)
}

/// Read a word list from a file
pub fn load_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let words = read_words(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = words.len(), "loaded word list");
    Ok(words)
}
