//! Merging of per-word results into per-document records.

use doxs_types::{Contribution, RankedDocument};
use rustc_hash::FxHashMap;

use crate::index::types::{Searcher, WordMatch};

/// Exponent moved into [`RankedDocument::scale`] whenever a merged rank
/// reaches `2^RESCALE_BITS`.
const RESCALE_BITS: i32 = 512;

impl Searcher {
    /// Folds scored word matches into one [`RankedDocument`] per URL.
    ///
    /// Matches are visited in query order and occurrences in decode order.
    /// The first hit on a URL sets its rank; every further hit adds its own
    /// rank and then doubles the sum, so documents hit by several words
    /// pull ahead faster than a plain sum would allow. Documents come back
    /// in first-seen order.
    ///
    /// URLs are compared as stored bytes, so two URLs that only differ in
    /// invalid UTF-8 stay separate documents. Ranks that would overflow
    /// keep their excess as a power-of-two `scale`; see
    /// [`normalize`](Self::normalize).
    pub fn combine(matches: Vec<WordMatch>) -> Vec<RankedDocument> {
        let mut docs: Vec<RankedDocument> = Vec::new();
        let mut slots: FxHashMap<Vec<u8>, usize> = FxHashMap::default();

        for m in matches {
            for occurrence in m.occurrences {
                let contribution = Contribution {
                    word: m.word.clone(),
                    matched: m.matched.clone(),
                    frequency: occurrence.frequency,
                };

                match slots.get(&occurrence.url_key) {
                    Some(&slot) => {
                        let doc = &mut docs[slot];
                        add_repeat_hit(doc, occurrence.rank);
                        doc.contributions.push(contribution);
                    }
                    None => {
                        slots.insert(occurrence.url_key, docs.len());
                        let mut doc = RankedDocument::new(occurrence.document, occurrence.rank);
                        doc.contributions.push(contribution);
                        docs.push(doc);
                    }
                }
            }
        }

        docs
    }
}

/// Applies `raw = (raw + rank) * 2` to a document whose raw rank is
/// `doc.rank * 2^doc.scale`.
///
/// Invariant: `doc.rank < 2^RESCALE_BITS`, and `doc.rank >= 1` whenever
/// `doc.scale > 0`.
fn add_repeat_hit(doc: &mut RankedDocument, rank: f64) {
    let added = if doc.scale == 0 {
        rank
    } else {
        rank * 2f64.powi(-doc.scale)
    };
    doc.rank = (doc.rank + added) * 2.0;

    let limit = 2f64.powi(RESCALE_BITS);
    if doc.rank >= limit {
        doc.rank /= limit;
        doc.scale += RESCALE_BITS;
    }
}
