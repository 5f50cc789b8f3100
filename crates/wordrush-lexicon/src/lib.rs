//! The lexicon: an immutable, length-indexed collection of (word, clue)
//! pairs.
//!
//! Built once at startup from a tab-separated source and queried by the
//! room engine for random selection within a length range. Selection is
//! uniform over all qualifying entries — a length with more entries is
//! proportionally more likely — not uniform-per-length-bucket.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rand::Rng;

/// One secret word and its display clue. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordClue {
    pub word: String,
    pub clue: String,
}

/// Errors from building or querying the lexicon.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The source could not be read. Fatal at startup.
    #[error("failed to read lexicon source: {0}")]
    Io(#[from] std::io::Error),

    /// The source produced no usable entries. Fatal at startup.
    #[error("lexicon is empty")]
    Empty,

    /// No entry exists in the requested (clamped) length range.
    #[error("no words with length in {min}..={max}")]
    EmptyRange { min: usize, max: usize },
}

/// Immutable word store, indexed by word length.
///
/// The supported length domain is [`Lexicon::MIN_LEN`]..=[`Lexicon::MAX_LEN`];
/// queries are clamped into it and entries outside it are rejected at
/// load time, so the two can never disagree.
#[derive(Debug)]
pub struct Lexicon {
    /// Length → entries of that length. BTreeMap so bucket iteration is
    /// in increasing length order, which the selection walk relies on.
    buckets: BTreeMap<usize, Vec<WordClue>>,
    total: usize,
}

impl Lexicon {
    /// Shortest supported word length.
    pub const MIN_LEN: usize = 3;
    /// Longest supported word length.
    pub const MAX_LEN: usize = 21;

    /// Builds a lexicon from a line-oriented reader.
    ///
    /// Each line is `word<TAB>clue`. Lines without a tab, or whose word
    /// length falls outside the supported domain, are skipped with a
    /// logged diagnostic.
    ///
    /// # Errors
    /// [`LexiconError::Io`] if reading fails, [`LexiconError::Empty`]
    /// if no line survives filtering.
    pub fn from_reader(reader: impl Read) -> Result<Self, LexiconError> {
        let mut buckets: BTreeMap<usize, Vec<WordClue>> = BTreeMap::new();
        let mut total = 0usize;

        for (lineno, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let Some((word, clue)) = line.split_once('\t') else {
                if !line.trim().is_empty() {
                    tracing::debug!(line = lineno + 1, "skipping lexicon line without tab");
                }
                continue;
            };
            let len = word.chars().count();
            if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
                tracing::debug!(
                    line = lineno + 1,
                    word,
                    len,
                    "skipping word outside supported length range"
                );
                continue;
            }
            buckets.entry(len).or_default().push(WordClue {
                word: word.to_string(),
                clue: clue.to_string(),
            });
            total += 1;
        }

        if total == 0 {
            return Err(LexiconError::Empty);
        }
        tracing::info!(entries = total, lengths = buckets.len(), "lexicon loaded");
        Ok(Self { buckets, total })
    }

    /// Loads a lexicon from a TSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    /// Total number of entries across all lengths.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether the lexicon holds no entries. Always `false` for a
    /// constructed lexicon, but keeps clippy and callers honest.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Clamps a requested length range into the supported domain.
    pub fn clamp_range(min_len: usize, max_len: usize) -> (usize, usize) {
        (
            min_len.clamp(Self::MIN_LEN, Self::MAX_LEN),
            max_len.clamp(Self::MIN_LEN, Self::MAX_LEN),
        )
    }

    /// Whether at least one entry exists in the clamped range.
    pub fn has_words_in(&self, min_len: usize, max_len: usize) -> bool {
        let (min, max) = Self::clamp_range(min_len, max_len);
        self.qualifying_count(min, max) > 0
    }

    fn qualifying_count(&self, min: usize, max: usize) -> usize {
        if min > max {
            return 0;
        }
        self.buckets
            .range(min..=max)
            .map(|(_, bucket)| bucket.len())
            .sum()
    }

    /// Picks one entry uniformly at random among all entries whose
    /// length falls in the clamped `[min_len, max_len]` range.
    ///
    /// Draws a single integer in `[0, total_qualifying)` and walks the
    /// length buckets in increasing order, subtracting each bucket's
    /// size until the draw lands inside one.
    ///
    /// # Errors
    /// [`LexiconError::EmptyRange`] if no entry qualifies.
    pub fn random_word(
        &self,
        rng: &mut impl Rng,
        min_len: usize,
        max_len: usize,
    ) -> Result<&WordClue, LexiconError> {
        let (min, max) = Self::clamp_range(min_len, max_len);
        let total = self.qualifying_count(min, max);
        if total == 0 {
            return Err(LexiconError::EmptyRange { min, max });
        }
        debug_assert!(min <= max);

        let mut draw = rng.random_range(0..total);
        for (_, bucket) in self.buckets.range(min..=max) {
            if draw < bucket.len() {
                return Ok(&bucket[draw]);
            }
            draw -= bucket.len();
        }
        unreachable!("draw < total qualifying count")
    }
}

// =========================================================================
// Tests
// =========================================================================
