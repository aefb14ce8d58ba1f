//! Word frequency tables.
//!
//! A [`FrequencyTable`] partitions `[0, 1)` into one half-open interval per
//! word, widest first. Each word's width is its share of the total count, and
//! a synthetic end-of-sentence marker ([`EOF_MARKER`]) takes a fixed share of
//! the mass so it can be coded like any other word.
//!
//! ```text
//! 0.0          0.31       0.45   0.49  …                            1.0
//! |    "the"    |   "of"   | ";"  | …                               |
//! ```
//!
//! Bounds are computed from exact integer prefix sums divided by the grand
//! total, so `entries[i].upper == entries[i + 1].lower` holds bit for bit and
//! the last `upper` is exactly `1.0`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};

/// Word reserved for the end-of-sentence marker.
pub const EOF_MARKER: &str = ";";

/// Default cap on table entries, one less than the number of 18-bit groups.
pub const DEFAULT_MAX_ENTRIES: usize = (1 << 18) - 1;

/// The marker's count is `sum(counts) / DEFAULT_EOF_DIVISOR`.
pub const DEFAULT_EOF_DIVISOR: u64 = 24;

/// Slack allowed when validating an explicit partition.
pub const PARTITION_TOLERANCE: f64 = 1e-9;

/// One word and its interval `[lower, upper)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableEntry {
    /// Lowercase word.
    pub word: String,
    /// Cumulative probability of every wider word.
    pub lower: f64,
    /// `lower` plus this word's probability.
    pub upper: f64,
}

impl TableEntry {
    /// Probability mass of the word.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `[lower, upper)` lies entirely inside this entry.
    pub fn encloses(&self, lower: f64, upper: f64) -> bool {
        lower >= self.lower && upper <= self.upper
    }
}

/// Immutable probability partition of `[0, 1)` over a word alphabet.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    entries: Vec<TableEntry>,
    // `lower` column, kept separately for binary search.
    lowers: Vec<f64>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Build a table from `(word, count)` pairs with default settings.
    ///
    /// See [`TableBuilder::build`].
    pub fn build<I, S>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        TableBuilder::new().build(counts)
    }

    /// Start configuring a table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Build a table from an explicit, already ordered partition.
    ///
    /// The entries must start at `0.0`, be contiguous, have positive width
    /// and end at `1.0`, each within [`PARTITION_TOLERANCE`]. Small gaps are
    /// snapped shut so that adjacent bounds compare equal afterwards.
    ///
    /// No end-of-sentence marker is added.
    pub fn from_entries(entries: Vec<TableEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyTable);
        }

        let mut snapped = Vec::with_capacity(entries.len());
        let mut previous_upper = 0.0f64;
        for (index, entry) in entries.into_iter().enumerate() {
            if (entry.lower - previous_upper).abs() > PARTITION_TOLERANCE {
                let reason = if index == 0 {
                    "first entry must start at 0"
                } else {
                    "entry does not start where the previous one ends"
                };
                return Err(Error::InvalidPartition { index, reason });
            }
            if entry.upper <= previous_upper || !entry.upper.is_finite() {
                return Err(Error::InvalidPartition {
                    index,
                    reason: "entry has no positive width",
                });
            }
            snapped.push(TableEntry {
                word: entry.word.to_lowercase(),
                lower: previous_upper,
                upper: entry.upper,
            });
            previous_upper = entry.upper;
        }

        let last = snapped.len() - 1;
        if (previous_upper - 1.0).abs() > PARTITION_TOLERANCE {
            return Err(Error::InvalidPartition {
                index: last,
                reason: "last entry must end at 1",
            });
        }
        snapped[last].upper = 1.0;

        Self::from_snapped(snapped)
    }

    fn from_snapped(entries: Vec<TableEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.word.clone(), position).is_some() {
                return Err(Error::InvalidPartition {
                    index: position,
                    reason: "word appears more than once",
                });
            }
        }
        let lowers = entries.iter().map(|e| e.lower).collect();
        Ok(Self {
            entries,
            lowers,
            index,
        })
    }

    /// Entry for `word`, matched exactly.
    pub fn lookup(&self, word: &str) -> Option<&TableEntry> {
        self.position(word).map(|i| &self.entries[i])
    }

    /// Rank of `word` (0 = widest interval).
    pub fn position(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Entry at rank `i`.
    pub fn get(&self, i: usize) -> Option<&TableEntry> {
        self.entries.get(i)
    }

    /// All entries, widest first.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// The `lower` column, ascending.
    pub fn lowers(&self) -> &[f64] {
        &self.lowers
    }

    /// Number of entries, including the end-of-sentence marker if present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the end-of-sentence marker has an interval.
    pub fn has_end_marker(&self) -> bool {
        self.index.contains_key(EOF_MARKER)
    }
}

/// Settings for [`FrequencyTable`] construction.
#[derive(Clone, Debug)]
pub struct TableBuilder {
    max_entries: usize,
    eof_divisor: u64,
}

impl TableBuilder {
    /// Builder with the default cap and marker share.
    pub fn new() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            eof_divisor: DEFAULT_EOF_DIVISOR,
        }
    }

    /// Keep at most `max_entries` words (marker included), widest first.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Give the marker a count of `sum(counts) / divisor`. A divisor of 0 is
    /// treated as 1.
    pub fn eof_divisor(mut self, divisor: u64) -> Self {
        self.eof_divisor = divisor.max(1);
        self
    }

    /// Build the partition.
    ///
    /// Words are lowercased and duplicate spellings have their counts summed.
    /// Zero-count words are dropped. The marker is appended with count
    /// `max(sum / eof_divisor, 1)`, then everything is stably sorted by
    /// descending count, so ties keep input order. Only the first
    /// `max_entries` survive and the bounds are normalized by their total.
    ///
    /// # Errors
    /// - `Error::EmptyTable` if no count is positive.
    /// - `Error::ReservedWord` if a word equals [`EOF_MARKER`].
    pub fn build<I, S>(&self, counts: I) -> Result<FrequencyTable>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        // Counts are widened so merged duplicates and prefix sums cannot wrap.
        let mut words: Vec<(String, u128)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (word, count) in counts {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if word == EOF_MARKER {
                return Err(Error::ReservedWord(word));
            }
            match seen.entry(word) {
                Entry::Occupied(slot) => {
                    let pair = &mut words[*slot.get()];
                    pair.1 += u128::from(count);
                }
                Entry::Vacant(slot) => {
                    words.push((slot.key().clone(), u128::from(count)));
                    slot.insert(words.len() - 1);
                }
            }
        }

        let sum: u128 = words.iter().map(|&(_, c)| c).sum();
        if sum == 0 {
            return Err(Error::EmptyTable);
        }
        let supplied = words.len();
        words.retain(|&(_, count)| count > 0);

        let eof_count = (sum / u128::from(self.eof_divisor)).max(1);
        words.push((EOF_MARKER.to_string(), eof_count));
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words.truncate(self.max_entries);

        let total: u128 = words.iter().map(|&(_, c)| c).sum();
        let total_f = total as f64;
        let mut cumulative = 0u128;
        let entries: Vec<TableEntry> = words
            .into_iter()
            .map(|(word, count)| {
                let lower = cumulative as f64 / total_f;
                cumulative += count;
                TableEntry {
                    word,
                    lower,
                    upper: cumulative as f64 / total_f,
                }
            })
            .collect();

        debug!(
            supplied,
            entries = entries.len(),
            total = %total,
            eof_count = %eof_count,
            "built frequency table"
        );

        FrequencyTable::from_snapped(entries)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyTable {
        FrequencyTable::build([("the", 500u64), ("of", 300), ("and", 150), ("zebra", 30)]).unwrap()
    }

    #[test]
    fn test_partition_is_contiguous() {
        let table = sample();
        let entries = table.entries();
        assert_eq!(entries[0].lower, 0.0);
        assert_eq!(entries[entries.len() - 1].upper, 1.0);
        for pair in entries.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
            assert!(pair[0].width() > 0.0);
        }
    }

    #[test]
    fn test_eof_marker_inserted_and_sorted() {
        let table = sample();
        // sum = 980, marker = 40, which ranks after "and" (150) and before "zebra" (30)
        let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["the", "of", "and", EOF_MARKER, "zebra"]);

        let eof = table.lookup(EOF_MARKER).unwrap();
        assert!((eof.width() - 40.0 / 1020.0).abs() < 1e-12);
        assert!(table.has_end_marker());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let table = FrequencyTable::build([("b", 10u64), ("a", 10), ("c", 10)]).unwrap();
        let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(&words[..3], &["b", "a", "c"]);
    }

    #[test]
    fn test_truncation_keeps_widest() {
        let table = FrequencyTable::builder()
            .max_entries(3)
            .build([("a", 400u64), ("b", 300), ("c", 200), ("d", 100)])
            .unwrap();
        // marker = 1000 / 24 = 41 ranks last and falls off along with "d"
        let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "c"]);
        assert_eq!(table.get(2).unwrap().upper, 1.0);
        assert!(!table.has_end_marker());
    }

    #[test]
    fn test_small_totals_still_get_a_marker() {
        let table = FrequencyTable::build([("a", 2u64), ("b", 1)]).unwrap();
        let eof = table.lookup(EOF_MARKER).unwrap();
        assert_eq!(eof.width(), 0.25);
    }

    #[test]
    fn test_eof_divisor_sets_marker_share() {
        let counts = [("a", 90u64), ("b", 10)];

        // marker = 100 / 10 = 10, tied with "b" and placed after it
        let table = FrequencyTable::builder().eof_divisor(10).build(counts).unwrap();
        let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", EOF_MARKER]);
        let eof = table.lookup(EOF_MARKER).unwrap();
        assert!((eof.width() - 10.0 / 110.0).abs() < 1e-12);

        // a zero divisor acts as 1: the marker takes as much as every word together
        let table = FrequencyTable::builder().eof_divisor(0).build(counts).unwrap();
        assert_eq!(table.position(EOF_MARKER), Some(0));
        assert_eq!(table.lookup(EOF_MARKER).unwrap().width(), 0.5);

        // 100 / 1000 rounds down to 0 and is lifted to a count of 1
        let table = FrequencyTable::builder().eof_divisor(1000).build(counts).unwrap();
        let eof = table.lookup(EOF_MARKER).unwrap();
        assert!((eof.width() - 1.0 / 101.0).abs() < 1e-12);
        assert_eq!(eof.upper, 1.0);
    }

    #[test]
    fn test_huge_counts_keep_a_valid_partition() {
        let table = FrequencyTable::build([("a", u64::MAX), ("b", 5)]).unwrap();
        let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", EOF_MARKER, "b"]);
        assert!((table.lookup("a").unwrap().width() - 24.0 / 25.0).abs() < 1e-9);

        let half = u64::MAX / 2;
        let table = FrequencyTable::build([("a", half), ("b", half), ("c", 7)]).unwrap();
        let entries = table.entries();
        assert_eq!(entries[0].lower, 0.0);
        assert_eq!(entries[entries.len() - 1].upper, 1.0);
        for pair in entries.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
        for entry in entries {
            assert!(entry.lower <= entry.upper, "{} runs backwards", entry.word);
        }
        let eof = table.lookup(EOF_MARKER).unwrap();
        assert!((eof.width() - 1.0 / 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_counts_past_u64_are_summed() {
        let table = FrequencyTable::build([("a", u64::MAX), ("b", u64::MAX), ("a", u64::MAX)])
            .unwrap();
        assert_eq!(table.position("a"), Some(0));
        let a = table.lookup("a").unwrap();
        let b = table.lookup("b").unwrap();
        assert!((a.width() / b.width() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicates_are_merged_case_insensitively() {
        let table = FrequencyTable::build([("The", 5u64), ("cat", 4), ("the", 5)]).unwrap();
        assert_eq!(table.position("the"), Some(0));
        assert!(table.lookup("The").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_zero_counts_are_dropped() {
        let table = FrequencyTable::build([("a", 48u64), ("never", 0)]).unwrap();
        assert!(table.lookup("never").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_and_all_zero_fail() {
        let empty: Vec<(&str, u64)> = Vec::new();
        assert!(matches!(FrequencyTable::build(empty), Err(Error::EmptyTable)));
        assert!(matches!(
            FrequencyTable::build([("a", 0u64), ("b", 0)]),
            Err(Error::EmptyTable)
        ));
    }

    #[test]
    fn test_marker_is_reserved() {
        assert!(matches!(
            FrequencyTable::build([("a", 1u64), (";", 1)]),
            Err(Error::ReservedWord(_))
        ));
    }

    #[test]
    fn test_from_entries_accepts_partition() {
        let table = FrequencyTable::from_entries(vec![
            TableEntry { word: "a".into(), lower: 0.0, upper: 0.5 },
            TableEntry { word: "b".into(), lower: 0.5, upper: 0.75 },
            TableEntry { word: "c".into(), lower: 0.75, upper: 1.0 },
        ])
        .unwrap();
        assert_eq!(table.lowers(), &[0.0, 0.5, 0.75]);
        assert!(!table.has_end_marker());
    }

    #[test]
    fn test_from_entries_rejects_gaps_and_short_partitions() {
        let gap = FrequencyTable::from_entries(vec![
            TableEntry { word: "a".into(), lower: 0.0, upper: 0.5 },
            TableEntry { word: "b".into(), lower: 0.6, upper: 1.0 },
        ]);
        assert!(matches!(gap, Err(Error::InvalidPartition { index: 1, .. })));

        let short = FrequencyTable::from_entries(vec![TableEntry {
            word: "a".into(),
            lower: 0.0,
            upper: 0.9,
        }]);
        assert!(matches!(short, Err(Error::InvalidPartition { index: 0, .. })));

        let dup = FrequencyTable::from_entries(vec![
            TableEntry { word: "a".into(), lower: 0.0, upper: 0.5 },
            TableEntry { word: "A".into(), lower: 0.5, upper: 1.0 },
        ]);
        assert!(matches!(dup, Err(Error::InvalidPartition { index: 1, .. })));
    }
}
