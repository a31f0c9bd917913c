//! Occurrence lists and document records.

use std::io::{BufRead, Seek};

use doxs_types::{DocumentRef, Result, SearchError};
use tracing::trace;

use crate::index::reader::IndexReader;
use crate::index::types::{FrequencyTotal, IndexWord, Occurrence, WordMatch, POSTING_SIZE};

impl<R: BufRead + Seek> IndexReader<R> {
    /// Decodes the occurrence list of a matched index word and resolves the
    /// name and URL of every document in it.
    ///
    /// Every frequency read is added to `total`, which spans the whole query.
    /// Ranks are left at zero; they can only be computed once `total` is
    /// final.
    pub fn read_word_stats(
        &mut self,
        word: &str,
        entry: IndexWord,
        total: &mut FrequencyTotal,
    ) -> Result<WordMatch> {
        let stats_offset = u64::from(entry.stats_offset);
        let num_docs = self.read_u32_be(stats_offset)?;
        if u64::from(num_docs) * POSTING_SIZE > self.remaining() {
            return Err(SearchError::Corrupt {
                offset: stats_offset,
                reason: "occurrence list runs past end of file",
            });
        }

        let mut postings = Vec::with_capacity(num_docs as usize);
        for _ in 0..num_docs {
            let doc_offset = self.next_u32()?;
            let frequency = self.next_u32()?;
            total.add(frequency);
            postings.push((doc_offset, frequency));
        }

        let mut occurrences = Vec::with_capacity(postings.len());
        for (doc_offset, frequency) in postings {
            let (document, url_key) = self.read_document_record(doc_offset)?;
            trace!(word, url = %document.url, frequency, "occurrence");
            occurrences.push(Occurrence {
                doc_offset,
                frequency,
                rank: 0.0,
                document,
                url_key,
            });
        }

        Ok(WordMatch {
            word: word.to_owned(),
            matched: entry.text,
            full: entry.full,
            occurrences,
        })
    }

    /// Reads the `name\0url\0` record at `offset`.
    pub fn read_document(&mut self, offset: u32) -> Result<DocumentRef> {
        self.read_document_record(offset).map(|(document, _)| document)
    }

    /// Like [`read_document`](Self::read_document), also returning the raw
    /// URL bytes.
    pub(crate) fn read_document_record(&mut self, offset: u32) -> Result<(DocumentRef, Vec<u8>)> {
        self.seek(u64::from(offset))?;
        let name = self.next_string()?;
        let url_key = self.next_cstring()?;
        let url = String::from_utf8_lossy(&url_key).into_owned();
        Ok((DocumentRef { name, url }, url_key))
    }
}
