// ============================================================
// Example Domain Type
// ============================================================
// One encoded training instance: a 0-based class id plus the
// ordered sequence of vocabulary ids for the review's tokens
// (unigrams and n-grams alike — the bag model ignores order).
// Immutable once produced.

use serde::{Deserialize, Serialize};

/// One labeled, fully encoded training instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// 0-based class id (star rating minus one)
    pub label: usize,

    /// Vocabulary ids of the review's tokens, in input order.
    /// May be empty — an empty review is a legal example.
    pub tokens: Vec<u32>,
}

impl Example {
    pub fn new(label: usize, tokens: Vec<u32>) -> Self {
        Self { label, tokens }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
