//! Index types and constants.

use doxs_types::{DocumentRef, SearchConfig, BUCKET_COUNT, INDEX_MAGIC};

/// Size of the magic plus the bucket table.
pub const HEADER_SIZE: u64 = INDEX_MAGIC.len() as u64 + BUCKET_COUNT as u64 * 4;

/// Bytes per `(doc_offset, freq)` pair in a stats record.
pub const POSTING_SIZE: u64 = 8;

/// Typical number of index words sharing a queried prefix.
pub const INLINE_BUCKET_MATCHES: usize = 8;

/// Decoded bucket chain entry that matched a queried word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexWord {
    /// The index word as stored
    pub text: String,
    /// Offset of the word's stats record
    pub stats_offset: u32,
    /// `true` when the index word is exactly as long as the queried word
    pub full: bool,
}

/// One (word, document) pair found while resolving a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub doc_offset: u32,
    pub frequency: u32,
    /// Frequency share of the query total; 0 until scored.
    pub rank: f64,
    pub document: DocumentRef,
    /// URL bytes exactly as stored. `document.url` may have had invalid
    /// UTF-8 replaced, so results are merged on these instead.
    pub url_key: Vec<u8>,
}

/// Everything one queried word resolved to through one index word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordMatch {
    /// Queried word (lower-cased)
    pub word: String,
    /// Index word it matched
    pub matched: String,
    pub full: bool,
    pub occurrences: Vec<Occurrence>,
}

/// Running sum of raw frequencies across every occurrence of a query.
///
/// Lives for exactly one query execution and is the denominator of every
/// occurrence rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyTotal(u64);

impl FrequencyTotal {
    #[inline(always)]
    pub fn add(&mut self, frequency: u32) {
        self.0 += u64::from(frequency);
    }

    #[inline(always)]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Executes queries against DOXS index files.
///
/// Holds configuration only. All per-query state (the reader, the frequency
/// total, the result set) is created inside each call, so a `Searcher` can be
/// shared freely between threads as long as every query brings its own
/// [`IndexReader`](super::IndexReader).
#[derive(Debug, Clone, Copy, Default)]
pub struct Searcher {
    pub(crate) config: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher with custom configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
