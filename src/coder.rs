//! Word encoding by interval bisection.
//!
//! A word owns the interval `[lo, hi)` of its [`TableEntry`]. Its code is the
//! shortest bitstring `b1…bn` whose dyadic interval
//! `[0.b1…bn, 0.b1…bn + 2^-n)` fits inside `[lo, hi)`, so a word with
//! probability `p` gets between `⌈-log2 p⌉` and `⌈-log2 p⌉ + 1` bits.
//!
//! The search walks dyadic candidates breadth first from `[0, 1)`. Every
//! candidate at depth `d` is examined before any at depth `d + 1`, and within
//! a depth from left to right, so the first enclosed candidate is both the
//! shortest and the leftmost code.
//!
//! [`TableEntry`]: crate::table::TableEntry

use std::collections::VecDeque;

use tracing::trace;

use crate::bits::{dyadic_width, Bitstring};
use crate::error::{Error, Result};
use crate::table::FrequencyTable;

/// Longest code the bisection will produce.
///
/// Every dyadic bound up to this depth is exactly representable in an `f64`.
pub const MAX_CODE_BITS: u32 = 53;

/// Dyadic interval `[lower, upper)` reached by the bits of `prefix`.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    lower: f64,
    upper: f64,
    depth: u32,
    prefix: u64,
}

impl Candidate {
    fn root() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            depth: 0,
            prefix: 0,
        }
    }

    /// Split at the midpoint into the `0` child and the `1` child.
    fn halves(&self) -> (Candidate, Candidate) {
        let depth = self.depth + 1;
        let mid = self.lower + dyadic_width(depth);
        let low = Candidate {
            lower: self.lower,
            upper: mid,
            depth,
            prefix: self.prefix << 1,
        };
        let high = Candidate {
            lower: mid,
            upper: self.upper,
            depth,
            prefix: (self.prefix << 1) | 1,
        };
        (low, high)
    }

    fn code(&self) -> Bitstring {
        let mut code = Bitstring::with_capacity(self.depth as usize);
        code.push_bits(self.prefix, self.depth);
        code
    }
}

/// Shortest code whose dyadic interval lies inside `[lower, upper)`.
///
/// Returns `None` if no such code exists within [`MAX_CODE_BITS`] bits,
/// which happens only for empty or vanishingly narrow targets.
pub fn shortest_code(lower: f64, upper: f64) -> Option<Bitstring> {
    let mut worklist = VecDeque::new();
    worklist.push_back(Candidate::root());

    while let Some(c) = worklist.pop_front() {
        if c.lower >= upper || c.upper <= lower {
            continue;
        }
        if c.lower >= lower && c.upper <= upper {
            return Some(c.code());
        }
        if c.depth == MAX_CODE_BITS {
            continue;
        }

        let (low, high) = c.halves();
        if c.lower <= lower && c.upper >= upper {
            worklist.push_back(low);
            worklist.push_back(high);
        } else if c.lower <= lower {
            // Straddles `lower` only: whenever `low` overlaps the target,
            // `high` is already enclosed one level down.
            worklist.push_back(high);
        } else {
            // Straddles `upper` only.
            worklist.push_back(low);
        }
    }
    None
}

/// Encodes single words against a [`FrequencyTable`].
#[derive(Clone, Copy, Debug)]
pub struct WordCoder<'t> {
    table: &'t FrequencyTable,
}

impl<'t> WordCoder<'t> {
    /// Create a coder over `table`.
    pub fn new(table: &'t FrequencyTable) -> Self {
        Self { table }
    }

    /// Encode one word. Lookup is case-insensitive.
    ///
    /// # Errors
    /// - `Error::UnknownWord` if the word has no table entry.
    /// - `Error::CodeTooLong` if its interval is narrower than `2^-53`.
    pub fn encode(&self, word: &str) -> Result<Bitstring> {
        let word = word.to_lowercase();
        let Some(entry) = self.table.lookup(&word) else {
            return Err(Error::UnknownWord(word));
        };
        let code = shortest_code(entry.lower, entry.upper).ok_or_else(|| Error::CodeTooLong {
            word: word.clone(),
            max_bits: MAX_CODE_BITS,
        })?;
        trace!(word = %word, bits = code.len(), code = %code, "encoded word");
        Ok(code)
    }
}
