//! Query analysis.
//!
//! - **Tokenizer**: splits a raw query into words and their `+`/`-` modifiers
//! - **Query**: lower-cased, de-duplicated lookup words plus the required and
//!   forbidden sets used to filter results

pub mod query;
pub mod tokenizer;

pub use query::Query;
pub use tokenizer::{Modifier, QueryTokenizer};
