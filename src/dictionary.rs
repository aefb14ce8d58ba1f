//! Fixed-width dictionary of filler words.
//!
//! A [`DictionaryIndex`] holds exactly `2^bits` distinct words and maps each
//! `bits`-wide integer to one of them and back. The words carry no meaning of
//! their own; they are a pronounceable spelling of the group value.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};

/// Group width used by [`DictionaryIndex::new`].
pub const DEFAULT_GROUP_BITS: u32 = 18;

/// Bijection between `[0, 2^bits)` and a list of words.
#[derive(Clone, Debug)]
pub struct DictionaryIndex {
    words: Vec<String>,
    index: HashMap<String, u32>,
    group_bits: u32,
}

impl DictionaryIndex {
    /// Build an 18-bit dictionary from exactly `2^18` words.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_group_bits(words, DEFAULT_GROUP_BITS)
    }

    /// Build a dictionary from exactly `2^group_bits` words.
    ///
    /// Words are lowercased; position in the input is the encoded value.
    ///
    /// # Errors
    /// - `Error::InvalidGroupBits` unless `1 <= group_bits <= 32`.
    /// - `Error::DictionarySize` if the word count is not `2^group_bits`.
    /// - `Error::DuplicateDictionaryWord` if two words coincide.
    pub fn with_group_bits<I, S>(words: I, group_bits: u32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !(1..=32).contains(&group_bits) {
            return Err(Error::InvalidGroupBits(group_bits));
        }
        let expected = 1usize << group_bits;

        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();
        if words.len() != expected {
            return Err(Error::DictionarySize {
                expected,
                actual: words.len(),
            });
        }

        let mut index = HashMap::with_capacity(words.len());
        for (value, word) in words.iter().enumerate() {
            if index.insert(word.clone(), value as u32).is_some() {
                return Err(Error::DuplicateDictionaryWord(word.clone()));
            }
        }

        debug!(words = words.len(), group_bits, "built dictionary index");
        Ok(Self {
            words,
            index,
            group_bits,
        })
    }

    /// Bits carried by one dictionary word.
    pub fn group_bits(&self) -> u32 {
        self.group_bits
    }

    /// Number of words, always `2^group_bits`.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed dictionary.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word spelling `value`, if `value < 2^group_bits`.
    pub fn word(&self, value: u32) -> Option<&str> {
        self.words.get(value as usize).map(String::as_str)
    }

    /// Value spelled by `word`, matched exactly.
    pub fn index(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }
}
