//! Error types for interval word coding.

use thiserror::Error;

/// Error variants for table construction, coding and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// No word carries a positive count, so there is nothing to partition.
    #[error("empty frequency table: no word has a positive count")]
    EmptyTable,

    /// An explicit interval list does not partition `[0, 1)`.
    #[error("invalid partition at entry {index}: {reason}")]
    InvalidPartition {
        /// Offending entry.
        index: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// The table has no interval for the end-of-sentence marker.
    #[error("frequency table has no end-of-sentence marker")]
    NoEndMarker,

    /// The word collides with the synthetic end-of-sentence marker.
    #[error("word {0:?} is reserved as the end-of-sentence marker")]
    ReservedWord(String),

    /// The word has no interval in the frequency table.
    #[error("word {0:?} is not in the frequency table")]
    UnknownWord(String),

    /// One or more words of a sentence have no interval in the frequency table.
    #[error("cannot encode sentence: unknown words {0:?}")]
    UnknownWords(Vec<String>),

    /// The output word is not one of the dictionary words.
    #[error("word {0:?} is not in the dictionary")]
    UnknownDictionaryWord(String),

    /// The dictionary does not hold exactly `2^group_bits` words.
    #[error("dictionary must hold {expected} words, got {actual}")]
    DictionarySize {
        /// Required number of words.
        expected: usize,
        /// Number of words supplied.
        actual: usize,
    },

    /// The same word appears twice in the dictionary.
    #[error("duplicate dictionary word {0:?}")]
    DuplicateDictionaryWord(String),

    /// Group width outside `1..=32`.
    #[error("invalid group width: {0} bits")]
    InvalidGroupBits(u32),

    /// A character other than `0`, `1` or whitespace in a textual bitstring.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit {
        /// Character offset in the input.
        position: usize,
        /// The rejected character.
        found: char,
    },

    /// The word's interval is too narrow to isolate within f64 precision.
    #[error("code for {word:?} exceeds {max_bits} bits")]
    CodeTooLong {
        /// Word being encoded.
        word: String,
        /// Precision limit.
        max_bits: u32,
    },

    /// A run of bits narrowed past f64 precision without resolving a word.
    #[error("bit run of {bits} bits did not resolve to a word")]
    UnresolvedRun {
        /// Length of the run when decoding gave up.
        bits: usize,
    },

    /// The decoded bitstream never produced the end-of-sentence marker.
    #[error("decoded bitstream has no end-of-sentence marker")]
    MissingEndMarker,

    /// Malformed line in a vocabulary file.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// An I/O error occurred while loading vocabulary data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for word coding operations.
pub type Result<T> = std::result::Result<T, Error>;
