//! Core types for the DOXS index search engine.
//!
//! This crate holds the value types that cross the boundary between the
//! query engine and whatever presents its results:
//!
//! - **Bucket keys**: the two-byte prefix hash used by the index header table
//! - **Ranked documents**: the plain result records handed to callers
//! - **Configuration and errors**: shared by the engine and its front ends

#![warn(missing_docs)]

use core::fmt;
use std::path::PathBuf;

/// Magic bytes at the start of every index file.
pub const INDEX_MAGIC: [u8; 4] = *b"DOXS";

/// Number of entries in the bucket table that follows the magic.
pub const BUCKET_COUNT: usize = 65536;

/// Key of a bucket in the index header table.
///
/// Built from the first two bytes of a word as `(b0 << 8) | b1`.
/// Zero bytes are reserved as "no entry", so a word whose first or
/// second byte is zero has no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct BucketKey(pub u16);

impl BucketKey {
    /// Size in bytes of one bucket table entry.
    pub const ENTRY_SIZE: u64 = 4;

    /// Computes the bucket key for a word.
    ///
    /// Returns `None` for words shorter than two bytes. Length is counted in
    /// bytes, so a single multi-byte character such as `é` has a key.
    #[inline(always)]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.as_bytes() {
            [hi, lo, ..] if *hi != 0 && *lo != 0 => Some(Self::from_bytes(*hi, *lo)),
            _ => None,
        }
    }

    /// Creates a key from its two prefix bytes.
    #[inline(always)]
    pub const fn from_bytes(hi: u8, lo: u8) -> Self {
        Self(((hi as u16) << 8) | lo as u16)
    }

    /// Returns the underlying table index.
    #[inline(always)]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Absolute file offset of this key's entry in the bucket table.
    #[inline(always)]
    pub const fn table_offset(self) -> u64 {
        INDEX_MAGIC.len() as u64 + self.0 as u64 * Self::ENTRY_SIZE
    }
}

impl From<BucketKey> for u16 {
    #[inline(always)]
    fn from(key: BucketKey) -> Self {
        key.0
    }
}

/// Display name and location of an indexed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Human readable document name
    pub name: String,
    /// Document URL, unique per document
    pub url: String,
}

/// One word hit recorded against a ranked document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// The word as it was queried (lower-cased).
    pub word: String,
    /// The index word it matched; the queried word is a prefix of it.
    pub matched: String,
    /// Raw occurrence count of the matched word in the document.
    pub frequency: u32,
}

impl Contribution {
    /// Returns the part of the matched word that extends past the queried word.
    ///
    /// Empty for full matches.
    pub fn matched_suffix(&self) -> &str {
        self.matched.get(self.word.len()..).unwrap_or("")
    }

    /// Returns `true` if the index word equals the queried word in length.
    pub fn is_full_match(&self) -> bool {
        self.matched.len() == self.word.len()
    }
}

/// A document in a query result.
///
/// Created on the first word hit for its URL; later hits accumulate into
/// `rank` and append to `contributions`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    /// Document URL (unique key within a result)
    pub url: String,
    /// Document display name
    pub name: String,
    /// Relevance score; in `(0, 100]` once a result is normalized
    pub rank: f64,
    /// Power-of-two exponent of `rank` while results are merged. The raw
    /// rank is `rank * 2^scale`; normalized results always carry 0.
    pub scale: i32,
    /// Word hits in the order they were merged
    pub contributions: Vec<Contribution>,
}

impl RankedDocument {
    /// Creates a document with no contributions yet.
    pub fn new(document: DocumentRef, rank: f64) -> Self {
        Self {
            url: document.url,
            name: document.name,
            rank,
            scale: 0,
            contributions: Vec::new(),
        }
    }

    /// Raw rank as `rank * 2^scale`. Overflows to infinity for documents
    /// hit more than about a thousand times.
    #[inline]
    pub fn raw_rank(&self) -> f64 {
        self.rank * 2f64.powi(self.scale)
    }

    /// Returns `true` if any contribution came from the queried `word`.
    #[inline]
    pub fn has_word(&self, word: &str) -> bool {
        self.contributions.iter().any(|c| c.word == word)
    }
}

impl fmt::Display for RankedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> rank={:.2}", self.name, self.url, self.rank)
    }
}

/// Query execution options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Lower bound for the maximum rank used during normalization.
    /// Default: 1e-7
    pub rank_floor: f64,
    /// Compare index words byte for byte instead of ignoring ASCII case.
    pub case_sensitive: bool,
    /// Keep at most this many documents after sorting.
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rank_floor: 0.000_000_1,
            case_sensitive: false,
            limit: None,
        }
    }
}

impl SearchConfig {
    /// Configuration that matches index words byte for byte.
    pub const fn exact() -> Self {
        Self {
            rank_floor: 0.000_000_1,
            case_sensitive: true,
            limit: None,
        }
    }

    /// Returns a copy of this configuration with a result limit.
    pub const fn with_limit(self, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}

/// Errors raised while executing a query against an index file.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The index file does not exist.
    #[error("index file not found: {}", .path.display())]
    NotFound {
        /// Path that was opened
        path: PathBuf,
    },
    /// Any other failure opening, seeking or reading the index.
    #[error("index I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file does not start with the `DOXS` magic.
    #[error("invalid index header: expected \"DOXS\", found {found:?}")]
    BadMagic {
        /// Bytes found where the magic was expected (may be short)
        found: Vec<u8>,
    },
    /// A record points outside the file or declares an impossible size.
    #[error("corrupt index at offset {offset}: {reason}")]
    Corrupt {
        /// Offset of the offending record
        offset: u64,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl SearchError {
    /// Returns `true` if the error means the index file itself is unusable.
    pub fn is_index_defect(&self) -> bool {
        matches!(self, SearchError::BadMagic { .. } | SearchError::Corrupt { .. })
    }
}

/// Result type alias for query execution.
pub type Result<T> = std::result::Result<T, SearchError>;
