//! Query execution.

use std::io::{BufRead, Seek};
use std::path::Path;

use doxs_types::{RankedDocument, Result};
use tracing::debug;

use crate::analyzer::Query;
use crate::index::reader::IndexReader;
use crate::index::types::{FrequencyTotal, Searcher, WordMatch};

impl Searcher {
    /// Runs a raw query against an open index and returns documents ordered
    /// by descending rank.
    ///
    /// The header is validated before anything else is read, so a file with
    /// the wrong magic fails without a single bucket lookup. A query with no
    /// usable words returns an empty list.
    #[inline(never)]
    pub fn execute_query<R: BufRead + Seek>(
        &self,
        reader: &mut IndexReader<R>,
        raw_query: &str,
    ) -> Result<Vec<RankedDocument>> {
        reader.validate_header()?;

        let query = Query::parse(raw_query);
        debug!(
            words = query.words.len(),
            required = query.required.len(),
            forbidden = query.forbidden.len(),
            "executing query"
        );
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let matches = self.collect_matches(reader, &query)?;
        let docs = Self::combine(matches);
        let combined = docs.len();

        let mut docs = Self::filter(docs, &query.required, &query.forbidden);
        debug!(combined, kept = docs.len(), "results filtered");

        self.normalize(&mut docs);
        Self::sort(&mut docs);
        if let Some(limit) = self.config.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    /// Resolves every query word to its scored word matches.
    ///
    /// Decoding happens first and accumulates the query-wide frequency
    /// total; ranks are assigned in a second pass once the total is known.
    pub fn collect_matches<R: BufRead + Seek>(
        &self,
        reader: &mut IndexReader<R>,
        query: &Query,
    ) -> Result<Vec<WordMatch>> {
        let mut total = FrequencyTotal::default();
        let mut decoded = Vec::new();

        for word in &query.words {
            for entry in reader.lookup_word(word, self.config.case_sensitive)? {
                decoded.push(reader.read_word_stats(word, entry, &mut total)?);
            }
        }

        debug!(matched = decoded.len(), total = total.get(), "query words resolved");
        Ok(Self::score(decoded, total))
    }

    /// Opens `path`, runs the query and closes the file again.
    pub fn search_file(&self, path: impl AsRef<Path>, raw_query: &str) -> Result<Vec<RankedDocument>> {
        let mut reader = IndexReader::open(path)?;
        self.execute_query(&mut reader, raw_query)
    }
}

/// Runs a query with the default configuration.
pub fn execute_query<R: BufRead + Seek>(
    reader: &mut IndexReader<R>,
    raw_query: &str,
) -> Result<Vec<RankedDocument>> {
    Searcher::new().execute_query(reader, raw_query)
}

/// Opens an index file and runs a query with the default configuration.
pub fn search_file(path: impl AsRef<Path>, raw_query: &str) -> Result<Vec<RankedDocument>> {
    Searcher::new().search_file(path, raw_query)
}
