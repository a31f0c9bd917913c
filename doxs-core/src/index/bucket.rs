//! Bucket table lookup and prefix scanning of bucket chains.

use std::io::{BufRead, Seek};

use doxs_types::{BucketKey, Result};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::index::reader::{into_text, IndexReader};
use crate::index::types::{IndexWord, INLINE_BUCKET_MATCHES};

pub type BucketMatches = SmallVec<[IndexWord; INLINE_BUCKET_MATCHES]>;

impl<R: BufRead + Seek> IndexReader<R> {
    /// Reads the bucket table entry for `key`. Zero means the bucket is empty.
    #[inline]
    pub fn bucket_offset(&mut self, key: BucketKey) -> Result<u32> {
        self.read_u32_be(key.table_offset())
    }

    /// Walks the bucket chain at `offset` and returns every entry that
    /// `word` is a prefix of.
    ///
    /// The chain is a run of `(word\0, stats_offset)` pairs ended by an
    /// empty word.
    pub fn scan_bucket(
        &mut self,
        offset: u32,
        word: &str,
        case_sensitive: bool,
    ) -> Result<BucketMatches> {
        self.seek(u64::from(offset))?;
        let query = word.as_bytes();
        let mut matches = BucketMatches::new();

        loop {
            let entry = self.next_cstring()?;
            if entry.is_empty() {
                break;
            }
            let stats_offset = self.next_u32()?;
            trace!(entry = %String::from_utf8_lossy(&entry), stats_offset, "bucket entry");

            if is_prefix_of(query, &entry, case_sensitive) {
                matches.push(IndexWord {
                    full: entry.len() == query.len(),
                    text: into_text(entry),
                    stats_offset,
                });
            }
        }

        Ok(matches)
    }

    /// Finds every index word that starts with `word`.
    ///
    /// Words without a bucket key and words whose bucket is empty yield no
    /// matches.
    pub fn lookup_word(&mut self, word: &str, case_sensitive: bool) -> Result<BucketMatches> {
        let Some(key) = BucketKey::from_word(word) else {
            debug!(word, "word too short for a bucket");
            return Ok(BucketMatches::new());
        };

        let offset = self.bucket_offset(key)?;
        if offset == 0 {
            debug!(word, bucket = key.as_u16(), "empty bucket");
            return Ok(BucketMatches::new());
        }

        let matches = self.scan_bucket(offset, word, case_sensitive)?;
        debug!(word, bucket = key.as_u16(), matched = matches.len(), "bucket scanned");
        Ok(matches)
    }
}

#[inline(always)]
fn is_prefix_of(query: &[u8], entry: &[u8], case_sensitive: bool) -> bool {
    match entry.get(..query.len()) {
        Some(head) if case_sensitive => head == query,
        Some(head) => head.eq_ignore_ascii_case(query),
        None => false,
    }
}
