//! # Interval Word Coding
//!
//! *Re-spell an English sentence as fewer, denser dictionary words.*
//!
//! ## Intuition First
//!
//! A word drawn from everyday English carries far fewer than 18 bits: "the"
//! is so common that naming it tells you almost nothing. A word picked
//! uniformly from a list of `2^18` Scrabble words, on the other hand, carries
//! exactly 18 bits. So if we squeeze the information out of a sentence and
//! re-spell it using uniformly chosen words, the sentence gets shorter.
//!
//! ## The Problem
//!
//! We need a prefix-free binary code for an alphabet of a quarter million
//! words whose lengths track the words' frequencies, cheap enough to compute
//! per word without building a Huffman tree over the whole vocabulary.
//!
//! ## Mathematical Formulation
//!
//! Sort the words by descending frequency and give word `w` the interval
//!
//! ```text
//! [ F(w) , F(w) + p(w) )      F(w) = Σ p(v) over words v ranked before w
//! ```
//!
//! Its code is the shortest bitstring `b1…bn` whose dyadic interval
//! `[0.b1…bn, 0.b1…bn + 2^-n)` lies inside it. Distinct words have disjoint
//! intervals, so no code is a prefix of another, and
//!
//! ```text
//! ⌈-log2 p(w)⌉  <=  n  <=  ⌈-log2 p(w)⌉ + 1
//! ```
//!
//! A synthetic end-of-sentence marker gets probability `1/25` so the decoder
//! can tell the last word from the zero padding of the final 18-bit group.
//!
//! ## Pipeline
//!
//! ```text
//! counts ─▶ FrequencyTable ─▶ WordCoder ─▶ Bitstring ─▶ 18-bit groups ─▶ DictionaryIndex ─▶ words
//! words  ─▶ DictionaryIndex ─▶ Bitstring ─▶ BitstreamDecoder ─▶ words up to the marker
//! ```
//!
//! ## Complexity Analysis
//!
//! - **Encode**: `O(-log2 p)` bisection steps per word.
//! - **Decode**: `O(bits · log n)`, one binary search of the table per bit.
//! - **Space**: both tables are built once and only read afterwards, so a
//!   [`SentenceCodec`] can be shared across threads freely.
//!
//! ## Failure Modes
//!
//! 1. **Out-of-vocabulary words** cannot be encoded; the whole sentence is
//!    rejected rather than silently dropping a word.
//! 2. **Precision**: intervals narrower than `2^-53` cannot be isolated with
//!    `f64` bounds. Real frequency lists are nowhere near this.
//!
//! ## Example
//!
//! ```
//! use wordcode::{DictionaryIndex, FrequencyTable, SentenceCodec};
//!
//! let table = FrequencyTable::build([("to", 40u64), ("be", 30), ("or", 20), ("not", 15)])?;
//! let words = (0..16).map(|i| format!("word{i}"));
//! let dictionary = DictionaryIndex::with_group_bits(words, 4)?;
//! let codec = SentenceCodec::new(&table, &dictionary)?;
//!
//! let encoded = codec.encode_sentence("to be or not to be")?;
//! assert_eq!(codec.decode_sentence(&encoded)?, "to be or not to be");
//! # Ok::<(), wordcode::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod codec;
pub mod coder;
pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod table;
pub mod vocab;

pub use bits::Bitstring;
pub use codec::SentenceCodec;
pub use coder::WordCoder;
pub use decoder::{BitstreamDecoder, Decoded};
pub use dictionary::DictionaryIndex;
pub use error::{Error, Result};
pub use table::{FrequencyTable, TableBuilder, TableEntry, EOF_MARKER};
