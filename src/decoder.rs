//! Bitstream decoding by interval narrowing.
//!
//! The decoder keeps a window `[lower, upper)` that starts at `[0, 1)` and is
//! halved by every bit: a `1` raises `lower` by `2^-r`, a `0` lowers `upper`
//! by `2^-r`, where `r` counts the bits of the current run. As soon as no
//! table boundary lies strictly inside the window, the window belongs to a
//! single entry; that word is emitted and the window resets for the next run.
//!
//! Codes produced by [`WordCoder`](crate::coder::WordCoder) are the shortest
//! dyadic intervals inside their word, so a run resolves exactly at the last
//! bit of each code and concatenated codes need no separators.

use tracing::{debug, trace};

use crate::bits::{dyadic_width, Bitstring};
use crate::coder::MAX_CODE_BITS;
use crate::error::{Error, Result};
use crate::table::FrequencyTable;

/// Words recovered from a bitstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded<'t> {
    /// Words in the order their codes appeared.
    pub words: Vec<&'t str>,
    /// Bits of a final run that never resolved to a word.
    pub trailing_bits: usize,
}

/// Streaming decoder over a [`FrequencyTable`].
#[derive(Clone, Debug)]
pub struct BitstreamDecoder<'t> {
    table: &'t FrequencyTable,
    lower: f64,
    upper: f64,
    run: u32,
}

impl<'t> BitstreamDecoder<'t> {
    /// Create a decoder with an empty run.
    pub fn new(table: &'t FrequencyTable) -> Self {
        Self {
            table,
            lower: 0.0,
            upper: 1.0,
            run: 0,
        }
    }

    /// Drop the current run and start again from `[0, 1)`.
    pub fn reset(&mut self) {
        self.lower = 0.0;
        self.upper = 1.0;
        self.run = 0;
    }

    /// Bits consumed since the last emitted word.
    pub fn pending_bits(&self) -> usize {
        self.run as usize
    }

    /// The current window `(lower, upper)`.
    pub fn window(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Narrow the window by one bit.
    ///
    /// Returns the word whose interval now encloses the window, if any.
    ///
    /// # Errors
    /// Returns `Error::UnresolvedRun` if a run grows past
    /// [`MAX_CODE_BITS`](crate::coder::MAX_CODE_BITS) without resolving.
    pub fn push_bit(&mut self, bit: bool) -> Result<Option<&'t str>> {
        if self.run >= MAX_CODE_BITS {
            return Err(Error::UnresolvedRun {
                bits: self.run as usize + 1,
            });
        }
        self.run += 1;
        let step = dyadic_width(self.run);
        if bit {
            self.lower += step;
        } else {
            self.upper -= step;
        }

        // Entries whose lower bound falls below the window's end, and entries
        // whose lower bound is at or below its start. Equal counts mean no
        // boundary lies strictly inside the window.
        let lowers = self.table.lowers();
        let upper_index = lowers.partition_point(|&l| l < self.upper);
        let lower_index = lowers.partition_point(|&l| l <= self.lower);
        if upper_index != lower_index {
            return Ok(None);
        }

        // lowers[0] == 0.0 <= self.lower, so lower_index >= 1.
        let entry = &self.table.entries()[lower_index - 1];
        debug_assert!(entry.encloses(self.lower, self.upper));
        trace!(word = %entry.word, bits = self.run, "decoded word");
        self.reset();
        Ok(Some(entry.word.as_str()))
    }

    /// Decode a whole bitstream.
    ///
    /// A final run that does not resolve is reported in
    /// [`Decoded::trailing_bits`] rather than treated as an error; it is
    /// normally group padding.
    pub fn decode(mut self, bits: &Bitstring) -> Result<Decoded<'t>> {
        let mut words = Vec::new();
        for bit in bits.iter() {
            if let Some(word) = self.push_bit(bit)? {
                words.push(word);
            }
        }
        let trailing_bits = self.pending_bits();
        if trailing_bits > 0 {
            debug!(trailing_bits, "discarding unresolved trailing run");
        }
        Ok(Decoded {
            words,
            trailing_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::WordCoder;
    use crate::table::TableEntry;
    use proptest::prelude::*;

    fn abc() -> FrequencyTable {
        FrequencyTable::from_entries(vec![
            TableEntry { word: "a".into(), lower: 0.0, upper: 0.5 },
            TableEntry { word: "b".into(), lower: 0.5, upper: 0.75 },
            TableEntry { word: "c".into(), lower: 0.75, upper: 1.0 },
        ])
        .unwrap()
    }

    #[test]
    fn test_decode_concatenated_codes() {
        let table = abc();
        let bits: Bitstring = "0 10 11 0".parse().unwrap();
        let decoded = BitstreamDecoder::new(&table).decode(&bits).unwrap();
        assert_eq!(decoded.words, vec!["a", "b", "c", "a"]);
        assert_eq!(decoded.trailing_bits, 0);
    }

    #[test]
    fn test_partial_run_is_discarded() {
        let table = abc();
        let bits: Bitstring = "111".parse().unwrap();
        let decoded = BitstreamDecoder::new(&table).decode(&bits).unwrap();
        assert_eq!(decoded.words, vec!["c"]);
        assert_eq!(decoded.trailing_bits, 1);
    }

    #[test]
    fn test_push_bit_narrows_window() {
        let table = abc();
        let mut decoder = BitstreamDecoder::new(&table);
        assert_eq!(decoder.push_bit(true).unwrap(), None);
        assert_eq!(decoder.window(), (0.5, 1.0));
        assert_eq!(decoder.pending_bits(), 1);

        assert_eq!(decoder.push_bit(false).unwrap(), Some("b"));
        assert_eq!(decoder.window(), (0.0, 1.0));
        assert_eq!(decoder.pending_bits(), 0);
    }

    #[test]
    fn test_window_on_boundary_resolves() {
        // [0.5, 1.0) starts on the boundary at 0.5 without crossing it
        let table = FrequencyTable::from_entries(vec![
            TableEntry { word: "x".into(), lower: 0.0, upper: 0.5 },
            TableEntry { word: "y".into(), lower: 0.5, upper: 1.0 },
        ])
        .unwrap();
        let bits: Bitstring = "1".parse().unwrap();
        let decoded = BitstreamDecoder::new(&table).decode(&bits).unwrap();
        assert_eq!(decoded.words, vec!["y"]);
    }

    #[test]
    fn test_non_dyadic_boundary_never_resolves() {
        let third = 1.0 / 3.0;
        let table = FrequencyTable::from_entries(vec![
            TableEntry { word: "x".into(), lower: 0.0, upper: third },
            TableEntry { word: "y".into(), lower: third, upper: 1.0 },
        ])
        .unwrap();
        // 0.010101… chases 1/3 forever
        let bits: Bitstring = "01".repeat(40).parse().unwrap();
        let result = BitstreamDecoder::new(&table).decode(&bits);
        assert!(matches!(result, Err(Error::UnresolvedRun { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_codes_decode_back(
            counts in prop::collection::vec(1u64..5_000, 1..30),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
        ) {
            let words: Vec<(String, u64)> = counts
                .iter()
                .enumerate()
                .map(|(i, &c)| (format!("w{i}"), c))
                .collect();
            let table = FrequencyTable::build(words).unwrap();
            let coder = WordCoder::new(&table);

            let message: Vec<&str> = picks
                .iter()
                .map(|p| table.entries()[p.index(table.len())].word.as_str())
                .collect();
            let mut bits = Bitstring::new();
            for word in &message {
                bits.extend_from(&coder.encode(word).unwrap());
            }

            let decoded = BitstreamDecoder::new(&table).decode(&bits).unwrap();
            prop_assert_eq!(decoded.words, message);
            prop_assert_eq!(decoded.trailing_bits, 0);
        }
    }
}
