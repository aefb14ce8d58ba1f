//! MSB-first bit sequences.
//!
//! A [`Bitstring`] is read left to right as the binary fraction `0.b1 b2 b3 …`.
//! It is the currency between [`WordCoder`](crate::coder::WordCoder),
//! [`BitstreamDecoder`](crate::decoder::BitstreamDecoder) and the fixed-width
//! packing done by [`SentenceCodec`](crate::codec::SentenceCodec).
//!
//! The textual form is a string of `0`/`1` characters; whitespace is ignored
//! when parsing so grouped dumps like `"010011 110"` read back unchanged.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Width of a dyadic interval at depth `depth`, i.e. `2^-depth`.
///
/// Exact for every depth up to 63.
pub(crate) fn dyadic_width(depth: u32) -> f64 {
    1.0 / (1u64 << depth.min(63)) as f64
}

/// An ordered sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create an empty bitstring.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty bitstring with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the bitstring holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the low `width` bits of `value`, most significant first.
    ///
    /// `width` is clamped to 64.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        let width = width.min(64);
        for shift in (0..width).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &Bitstring) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Right-pad with zeros until the length is a multiple of `width`.
    ///
    /// Returns the number of zeros added. An already aligned bitstring is left
    /// untouched.
    pub fn pad_to_multiple(&mut self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let padding = (width - self.bits.len() % width) % width;
        self.bits.resize(self.bits.len() + padding, false);
        padding
    }

    /// Split into consecutive `width`-bit big-endian integers.
    ///
    /// A trailing partial group is read as if zero-padded on the right.
    /// `width` must be in `1..=32`.
    pub fn groups(&self, width: usize) -> impl Iterator<Item = u32> + '_ {
        debug_assert!((1..=32).contains(&width));
        self.bits.chunks(width.max(1)).map(move |chunk| {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));
            value << (width - chunk.len())
        })
    }
}

impl FromIterator<bool> for Bitstring {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Bitstring {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                c if c.is_whitespace() => continue,
                found => return Err(Error::InvalidBit { position, found }),
            }
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
