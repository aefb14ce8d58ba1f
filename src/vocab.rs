//! Loading vocabulary data from disk.
//!
//! Two inputs feed a [`SentenceCodec`](crate::codec::SentenceCodec):
//!
//! - a frequency CSV with a header naming a `word` and a `frequency` column
//!   (other columns, such as a leading `index`, are ignored);
//! - a dictionary list with one word per line, of which the first
//!   `2^group_bits` are used.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::dictionary::DictionaryIndex;
use crate::error::{Error, Result};

/// Parse `(word, count)` rows from a frequency CSV.
///
/// Blank lines are skipped. Fields are split on commas and trimmed; quoting
/// is not supported.
///
/// # Errors
/// `Error::Parse` for a missing header column, a short row or a
/// non-numeric count; `Error::Io` for read failures.
pub fn read_frequencies<R: BufRead>(reader: R) -> Result<Vec<(String, u64)>> {
    let mut lines = reader.lines().enumerate();

    let (word_col, freq_col) = loop {
        let Some((n, line)) = lines.next() else {
            return Err(Error::Parse {
                line: 1,
                message: "missing header row".to_string(),
            });
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let header: Vec<&str> = line.split(',').map(str::trim).collect();
        let column = |name: &str| {
            header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| Error::Parse {
                    line: n + 1,
                    message: format!("header has no {name:?} column"),
                })
        };
        break (column("word")?, column("frequency")?);
    };

    let mut rows = Vec::new();
    for (n, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (Some(word), Some(count)) = (fields.get(word_col), fields.get(freq_col)) else {
            return Err(Error::Parse {
                line: n + 1,
                message: format!("expected at least {} fields", word_col.max(freq_col) + 1),
            });
        };
        let count = count.parse::<u64>().map_err(|e| Error::Parse {
            line: n + 1,
            message: format!("invalid frequency {count:?}: {e}"),
        })?;
        rows.push((word.to_lowercase(), count));
    }

    debug!(rows = rows.len(), "read word frequencies");
    Ok(rows)
}

/// Read one lowercase word per line, skipping blank lines.
pub fn read_word_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_lowercase());
        }
    }
    Ok(words)
}

/// Build a dictionary from the first `2^group_bits` words of a list.
///
/// # Errors
/// `Error::DictionarySize` if the list is too short, plus anything
/// [`DictionaryIndex::with_group_bits`] rejects.
pub fn dictionary_from_list(mut words: Vec<String>, group_bits: u32) -> Result<DictionaryIndex> {
    if !(1..=32).contains(&group_bits) {
        return Err(Error::InvalidGroupBits(group_bits));
    }
    let needed = 1usize << group_bits;
    if words.len() < needed {
        return Err(Error::DictionarySize {
            expected: needed,
            actual: words.len(),
        });
    }
    let unused = words.len() - needed;
    words.truncate(needed);
    debug!(unused, "truncated dictionary list");
    DictionaryIndex::with_group_bits(words, group_bits)
}

/// Load a frequency CSV from `path`.
pub fn load_frequencies(path: impl AsRef<Path>) -> Result<Vec<(String, u64)>> {
    let file = File::open(path.as_ref())?;
    read_frequencies(BufReader::new(file))
}

/// Load a dictionary list from `path` and index its first `2^group_bits` words.
pub fn load_dictionary(path: impl AsRef<Path>, group_bits: u32) -> Result<DictionaryIndex> {
    let file = File::open(path.as_ref())?;
    dictionary_from_list(read_word_list(BufReader::new(file))?, group_bits)
}
