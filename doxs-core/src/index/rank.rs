//! Required/forbidden filtering, rank normalization and ordering.

use std::cmp::Ordering;

use doxs_types::RankedDocument;
use rustc_hash::FxHashSet;

use crate::index::types::Searcher;

/// Rank given to the best document of a normalized result.
pub const MAX_RANK: f64 = 100.0;

impl Searcher {
    /// Keeps documents that contain every required word and no forbidden one.
    ///
    /// Words are compared against the queried word of each contribution,
    /// not the index word it matched. Order is preserved.
    pub fn filter(
        docs: Vec<RankedDocument>,
        required: &FxHashSet<String>,
        forbidden: &FxHashSet<String>,
    ) -> Vec<RankedDocument> {
        docs.into_iter()
            .filter(|doc| {
                required.iter().all(|word| doc.has_word(word))
                    && !doc.contributions.iter().any(|c| forbidden.contains(&c.word))
            })
            .collect()
    }

    /// Rescales ranks into `(0, 100]` relative to the best document.
    ///
    /// Scaled ranks from [`combine`](Self::combine) are folded back in, so
    /// every document leaves with `scale == 0`. A positive rank too small
    /// to express next to the best one becomes `f64::MIN_POSITIVE` rather
    /// than 0.
    pub fn normalize(&self, docs: &mut [RankedDocument]) {
        let Some(best) = docs.iter().max_by(|a, b| by_raw_rank(a, b)) else {
            return;
        };
        let max_scale = best.scale;
        let max_rank = if max_scale == 0 {
            best.rank.max(self.config.rank_floor)
        } else {
            best.rank
        };

        // already normalized
        if max_scale == 0 && max_rank == MAX_RANK {
            return;
        }

        for doc in docs.iter_mut() {
            doc.rank = if doc.scale == max_scale && doc.rank >= max_rank {
                MAX_RANK
            } else {
                let scaled = doc.rank * MAX_RANK / max_rank * 2f64.powi(doc.scale - max_scale);
                if doc.rank > 0.0 {
                    scaled.max(f64::MIN_POSITIVE)
                } else {
                    scaled
                }
            };
            doc.scale = 0;
        }
    }

    /// Orders documents by descending rank. Equal ranks keep their
    /// first-seen order.
    pub fn sort(docs: &mut [RankedDocument]) {
        docs.sort_by(|a, b| by_raw_rank(b, a));
    }
}

/// Compares raw ranks `rank * 2^scale`.
///
/// Relies on the shape `combine` leaves behind: ranks stay below `2^512`,
/// and a document with a non-zero scale has a rank of at least 1, so the
/// larger scale always holds the larger raw rank.
fn by_raw_rank(a: &RankedDocument, b: &RankedDocument) -> Ordering {
    a.scale.cmp(&b.scale).then(a.rank.total_cmp(&b.rank))
}
