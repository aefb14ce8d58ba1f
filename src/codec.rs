//! Sentence-level coding.
//!
//! Encoding appends the end-of-sentence marker, concatenates the word codes,
//! zero-pads the result to a whole number of groups and spells every group
//! with a dictionary word:
//!
//! ```text
//! "to be or not"  ->  0110 1011100 0011 10110111 0100  (+ padding)
//!                 ->  |  18 bits  |  18 bits  |
//!                 ->  "plinth"    "ogee"
//! ```
//!
//! Decoding spells the words back into groups and narrows the bitstream until
//! the marker appears. Anything after the marker is padding.

use tracing::{debug, warn};

use crate::bits::Bitstring;
use crate::coder::WordCoder;
use crate::decoder::BitstreamDecoder;
use crate::dictionary::DictionaryIndex;
use crate::error::{Error, Result};
use crate::table::{FrequencyTable, EOF_MARKER};

/// Encodes and decodes whole sentences.
#[derive(Clone, Copy, Debug)]
pub struct SentenceCodec<'a> {
    table: &'a FrequencyTable,
    dictionary: &'a DictionaryIndex,
}

impl<'a> SentenceCodec<'a> {
    /// Pair a frequency table with a dictionary.
    ///
    /// # Errors
    /// - `Error::NoEndMarker` if the table cannot code the end of a sentence.
    /// - `Error::EmptyTable` if the marker is the table's only word.
    pub fn new(table: &'a FrequencyTable, dictionary: &'a DictionaryIndex) -> Result<Self> {
        if !table.has_end_marker() {
            return Err(Error::NoEndMarker);
        }
        if table.len() < 2 {
            return Err(Error::EmptyTable);
        }
        Ok(Self { table, dictionary })
    }

    /// The frequency table.
    pub fn table(&self) -> &'a FrequencyTable {
        self.table
    }

    /// The dictionary.
    pub fn dictionary(&self) -> &'a DictionaryIndex {
        self.dictionary
    }

    /// Concatenated codes of `sentence` followed by the marker, unpadded.
    ///
    /// # Errors
    /// - `Error::ReservedWord` if the sentence contains the marker itself.
    /// - `Error::UnknownWords` listing every word missing from the table.
    pub fn encode_bits<S: AsRef<str>>(&self, sentence: &[S]) -> Result<Bitstring> {
        let coder = WordCoder::new(self.table);
        let mut bits = Bitstring::new();
        let mut unknown = Vec::new();

        for (position, word) in sentence.iter().enumerate() {
            let word = word.as_ref();
            if word == EOF_MARKER {
                return Err(Error::ReservedWord(word.to_string()));
            }
            match coder.encode(word) {
                Ok(code) => bits.extend_from(&code),
                Err(Error::UnknownWord(word)) => {
                    warn!(word = %word, position, "word not in frequency table");
                    unknown.push(word);
                }
                Err(e) => return Err(e),
            }
        }
        if !unknown.is_empty() {
            return Err(Error::UnknownWords(unknown));
        }

        bits.extend_from(&coder.encode(EOF_MARKER)?);
        Ok(bits)
    }

    /// Encode a sentence into dictionary words.
    ///
    /// # Errors
    /// See [`SentenceCodec::encode_bits`].
    pub fn encode<S: AsRef<str>>(&self, sentence: &[S]) -> Result<Vec<&'a str>> {
        let group_bits = self.dictionary.group_bits();
        let mut bits = self.encode_bits(sentence)?;
        let payload_bits = bits.len();
        let padding = bits.pad_to_multiple(group_bits as usize);

        let words = bits
            .groups(group_bits as usize)
            .map(|value| {
                self.dictionary.word(value).ok_or(Error::DictionarySize {
                    expected: 1usize << group_bits,
                    actual: self.dictionary.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            input_words = sentence.len(),
            payload_bits,
            padding,
            output_words = words.len(),
            "encoded sentence"
        );
        Ok(words)
    }

    /// Decode dictionary words back into the encoded sentence.
    ///
    /// # Errors
    /// - `Error::UnknownDictionaryWord` for a word outside the dictionary.
    /// - `Error::MissingEndMarker` if the bitstream ends without the marker.
    /// - `Error::UnresolvedRun` if the bits cannot be narrowed to a word.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<&'a str>> {
        let (sentence, terminated) = self.decode_until_marker(words)?;
        if !terminated {
            return Err(Error::MissingEndMarker);
        }
        Ok(sentence)
    }

    /// Decode like [`SentenceCodec::decode`], but without requiring the marker.
    ///
    /// When the marker is absent every decoded word is returned, which may
    /// include spurious words decoded from padding.
    pub fn decode_lossy<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<&'a str>> {
        let (sentence, terminated) = self.decode_until_marker(words)?;
        if !terminated {
            warn!(
                words = sentence.len(),
                "no end-of-sentence marker, keeping every decoded word"
            );
        }
        Ok(sentence)
    }

    /// Whitespace-separated convenience form of [`SentenceCodec::encode`].
    pub fn encode_sentence(&self, text: &str) -> Result<String> {
        let sentence: Vec<&str> = text.split_whitespace().collect();
        Ok(self.encode(&sentence)?.join(" "))
    }

    /// Whitespace-separated convenience form of [`SentenceCodec::decode`].
    pub fn decode_sentence(&self, text: &str) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        Ok(self.decode(&words)?.join(" "))
    }

    /// Spell dictionary words back into their fixed-width groups.
    pub fn unpack<S: AsRef<str>>(&self, words: &[S]) -> Result<Bitstring> {
        let group_bits = self.dictionary.group_bits();
        let mut bits = Bitstring::with_capacity(words.len() * group_bits as usize);
        for word in words {
            let word = word.as_ref().to_lowercase();
            let Some(value) = self.dictionary.index(&word) else {
                return Err(Error::UnknownDictionaryWord(word));
            };
            bits.push_bits(u64::from(value), group_bits);
        }
        Ok(bits)
    }

    fn decode_until_marker<S: AsRef<str>>(&self, words: &[S]) -> Result<(Vec<&'a str>, bool)> {
        let bits = self.unpack(words)?;
        let mut decoder = BitstreamDecoder::new(self.table);
        let mut sentence = Vec::new();

        for (position, bit) in bits.iter().enumerate() {
            match decoder.push_bit(bit)? {
                Some(EOF_MARKER) => {
                    debug!(
                        output_words = sentence.len(),
                        padding = bits.len() - position - 1,
                        "decoded sentence"
                    );
                    return Ok((sentence, true));
                }
                Some(word) => sentence.push(word),
                None => {}
            }
        }
        Ok((sentence, false))
    }
}
