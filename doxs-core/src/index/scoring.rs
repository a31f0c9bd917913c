//! Scoring functions.

use crate::index::types::{FrequencyTotal, Occurrence, Searcher, WordMatch};

impl FrequencyTotal {
    /// Share of the query total held by `frequency`.
    #[inline(always)]
    pub fn share(self, frequency: u32) -> f64 {
        if self.get() == 0 {
            return 0.0;
        }
        f64::from(frequency) / self.get() as f64
    }
}

impl Searcher {
    /// Produces ranked copies of `matches` once `total` is final.
    ///
    /// Each occurrence's rank is its frequency divided by the total of all
    /// frequencies decoded for the query.
    pub fn score(matches: Vec<WordMatch>, total: FrequencyTotal) -> Vec<WordMatch> {
        matches
            .into_iter()
            .map(|m| WordMatch {
                occurrences: m
                    .occurrences
                    .into_iter()
                    .map(|o| Occurrence {
                        rank: total.share(o.frequency),
                        ..o
                    })
                    .collect(),
                ..m
            })
            .collect()
    }
}
