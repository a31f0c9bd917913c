//! Parsed search queries.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::analyzer::tokenizer::{Modifier, QueryTokenizer};

/// Typical number of distinct words in a query.
pub const INLINE_QUERY_WORDS: usize = 8;

/// A raw query split into lookup words and result constraints.
///
/// Every word (including required and forbidden ones) is lower-cased and
/// appears once in `words`, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub words: SmallVec<[String; INLINE_QUERY_WORDS]>,
    pub required: FxHashSet<String>,
    pub forbidden: FxHashSet<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let mut query = Query::default();

        QueryTokenizer::new().tokenize(raw, |token, modifier| {
            let word = token.to_lowercase();
            match modifier {
                Modifier::Required => {
                    query.required.insert(word.clone());
                }
                Modifier::Forbidden => {
                    query.forbidden.insert(word.clone());
                }
                Modifier::Plain => {}
            }
            if !query.words.contains(&word) {
                query.words.push(word);
            }
        });

        query
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
