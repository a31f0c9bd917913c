//! Query engine for precomputed DOXS search indexes.
//!
//! The engine answers free-text queries against a binary, disk-resident
//! inverted index and returns plain ranked results. Rendering them is left
//! to the caller.
//!
//! ```no_run
//! use doxs_core::search_file;
//!
//! let docs = search_file("search.idx", "+parser token")?;
//! for doc in &docs {
//!     println!("{:>6.2} {} <{}>", doc.rank, doc.name, doc.url);
//! }
//! # Ok::<(), doxs_core::SearchError>(())
//! ```

pub mod analyzer;
pub mod index;

pub use analyzer::Query;
pub use index::{execute_query, search_file, IndexReader, Searcher};

pub use doxs_types::{
    BucketKey, Contribution, DocumentRef, RankedDocument, Result, SearchConfig, SearchError,
};
