//! Streaming query tokenizer.
//!
//! Splits a raw query on ASCII spaces and classifies each token by its
//! leading modifier:
//!
//! ```ignore
//! "+apple -banana cherry"
//!   ("apple",  Modifier::Required)
//!   ("banana", Modifier::Forbidden)
//!   ("cherry", Modifier::Plain)
//! ```
//!
//! Tokens are slices of the input; lower-casing and de-duplication happen
//! one layer up in [`Query`](super::Query).
//!
//! ## Splitting rules
//!
//! - Only the space byte (0x20) separates tokens; runs of spaces produce no
//!   empty tokens
//! - A leading `+` marks a required word, otherwise a leading `-` marks a
//!   forbidden word; only one modifier is stripped
//! - A token that is empty once its modifier is stripped is dropped

use memchr::memchr_iter;

/// How a query word constrains the result set.
///
/// `#[repr(u8)]` keeps the tag to one byte alongside the token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Modifier {
    /// Contributes to ranking only
    Plain = 0,
    /// `+word`: documents without it are dropped
    Required = 1,
    /// `-word`: documents with it are dropped
    Forbidden = 2,
}

impl Modifier {
    /// Splits the modifier prefix off a raw token.
    #[inline(always)]
    pub fn strip(token: &str) -> (&str, Self) {
        if let Some(word) = token.strip_prefix('+') {
            (word, Modifier::Required)
        } else if let Some(word) = token.strip_prefix('-') {
            (word, Modifier::Forbidden)
        } else {
            (token, Modifier::Plain)
        }
    }
}

/// Zero-allocation tokenizer for raw query strings.
#[derive(Debug, Default, Copy, Clone)]
pub struct QueryTokenizer;

impl QueryTokenizer {
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `query` and emits `(word, modifier)` left to right.
    #[inline]
    pub fn tokenize<'q, F>(&self, query: &'q str, mut emit: F)
    where
        F: FnMut(&'q str, Modifier),
    {
        let mut emit_token = |token: &'q str| {
            let (word, modifier) = Modifier::strip(token);
            if !word.is_empty() {
                emit(word, modifier);
            }
        };

        let bytes = query.as_bytes();
        let mut start = 0usize;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // splitting on an ASCII byte always lands on a char boundary
                emit_token(&query[start..i]);
            }
            start = i + 1;
        }

        if start < bytes.len() {
            emit_token(&query[start..]);
        }
    }
}
