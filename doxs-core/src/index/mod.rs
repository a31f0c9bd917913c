//! Lookup and ranking over DOXS index files.
//!
//! A query moves through the index in a fixed order:
//!
//! 1. [`IndexReader`] validates the `DOXS` magic
//! 2. each query word is hashed to a [`BucketKey`](doxs_types::BucketKey)
//!    and its bucket chain is scanned for prefix matches
//! 3. each matched word's occurrence list is decoded and its documents
//!    resolved, feeding a query-wide [`FrequencyTotal`]
//! 4. occurrences are scored as their share of that total
//! 5. word matches are merged per URL, filtered, normalized to `(0, 100]`
//!    and sorted
//!
//! File Layout:
//! - `DOXS` magic, then 65536 big-endian `u32` bucket offsets
//! - bucket chains of `(word\0, stats_offset)` ended by an empty word
//! - stats records: `num_docs`, then `num_docs` pairs of `(doc_offset, freq)`
//! - document records: `name\0url\0`
//!
//! Threading:
//! - [`Searcher`] holds configuration only and is `Send + Sync`. Each query
//!   needs its own [`IndexReader`]; nothing is shared between queries.

mod bucket;
mod combine;
#[cfg(test)]
pub(crate) mod fixture;
mod rank;
mod reader;
mod scoring;
mod search;
mod stats;
mod types;

pub use bucket::BucketMatches;
pub use rank::MAX_RANK;
pub use reader::IndexReader;
pub use search::{execute_query, search_file};
pub use types::{FrequencyTotal, IndexWord, Occurrence, Searcher, WordMatch, HEADER_SIZE};
