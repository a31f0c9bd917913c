//! In-memory DOXS index images for tests.
//!
//! Layout written: magic, bucket table, document records, stats records,
//! then one chain per bucket in first-use order.

use std::io::Cursor;

use doxs_types::{BucketKey, INDEX_MAGIC};

use crate::index::reader::IndexReader;
use crate::index::types::HEADER_SIZE;

pub(crate) struct IndexFixture {
    docs: Vec<(Vec<u8>, Vec<u8>)>,
    words: Vec<(String, Vec<(usize, u32)>)>,
}

impl IndexFixture {
    pub(crate) fn new() -> Self {
        Self {
            docs: Vec::new(),
            words: Vec::new(),
        }
    }

    /// Adds a document and returns its slot for use in postings.
    pub(crate) fn doc(&mut self, name: &str, url: &str) -> usize {
        self.doc_bytes(name.as_bytes(), url.as_bytes())
    }

    /// Adds a document whose name and URL need not be valid UTF-8.
    pub(crate) fn doc_bytes(&mut self, name: &[u8], url: &[u8]) -> usize {
        self.docs.push((name.to_vec(), url.to_vec()));
        self.docs.len() - 1
    }

    /// Adds an index word with `(doc slot, frequency)` postings.
    pub(crate) fn word(&mut self, word: &str, postings: &[(usize, u32)]) -> &mut Self {
        self.words.push((word.to_owned(), postings.to_vec()));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE as usize * 2);
        buf.extend_from_slice(&INDEX_MAGIC);
        buf.resize(HEADER_SIZE as usize, 0);

        let mut doc_offsets = Vec::with_capacity(self.docs.len());
        for (name, url) in &self.docs {
            doc_offsets.push(buf.len() as u32);
            push_cstring(&mut buf, name);
            push_cstring(&mut buf, url);
        }

        let mut stats_offsets = Vec::with_capacity(self.words.len());
        for (_, postings) in &self.words {
            stats_offsets.push(buf.len() as u32);
            buf.extend_from_slice(&(postings.len() as u32).to_be_bytes());
            for &(doc, freq) in postings {
                buf.extend_from_slice(&doc_offsets[doc].to_be_bytes());
                buf.extend_from_slice(&freq.to_be_bytes());
            }
        }

        let mut buckets: Vec<(BucketKey, Vec<usize>)> = Vec::new();
        for (slot, (word, _)) in self.words.iter().enumerate() {
            let key = BucketKey::from_word(word).expect("fixture words need two bytes");
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(slot),
                None => buckets.push((key, vec![slot])),
            }
        }

        for (key, members) in buckets {
            let chain = buf.len() as u32;
            for slot in members {
                push_cstring(&mut buf, self.words[slot].0.as_bytes());
                buf.extend_from_slice(&stats_offsets[slot].to_be_bytes());
            }
            buf.push(0);

            let entry = key.table_offset() as usize;
            buf[entry..entry + 4].copy_from_slice(&chain.to_be_bytes());
        }

        buf
    }

    pub(crate) fn reader(&self) -> IndexReader<Cursor<Vec<u8>>> {
        Self::reader_over(self.build())
    }

    pub(crate) fn reader_over(bytes: Vec<u8>) -> IndexReader<Cursor<Vec<u8>>> {
        IndexReader::new(Cursor::new(bytes)).expect("cursor is seekable")
    }
}

fn push_cstring(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
    buf.push(0);
}
