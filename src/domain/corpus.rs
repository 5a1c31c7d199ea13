// ============================================================
// Corpus
// ============================================================
// The full in-memory labeled dataset a source produces at
// startup: ordered train and test example sequences, the
// vocabulary they were encoded with, and the class count.
// Invariant: every token id in every example is a valid index
// into the vocabulary (sources validate ids that come from
// disk). Never mutated after construction — splitting into
// train/validation happens non-destructively downstream.

use crate::domain::example::Example;
use crate::domain::vocabulary::Vocabulary;

#[derive(Debug)]
pub struct Corpus {
    /// Training split, in source order
    pub train: Vec<Example>,

    /// Held-out test split, in source order
    pub test: Vec<Example>,

    /// The vocabulary all token ids refer to
    pub vocab: Vocabulary,

    /// Number of distinct classes (5 for Yelp full)
    pub num_classes: usize,
}

impl Corpus {
    /// Per-class example counts over the training split,
    /// indexed by 0-based class id. Logged after loading so a
    /// skewed corpus is visible before training starts.
    pub fn label_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_classes];
        for example in &self.train {
            if let Some(slot) = counts.get_mut(example.label) {
                *slot += 1;
            }
        }
        counts
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_histogram() {
        let corpus = Corpus {
            train: vec![
                Example::new(0, vec![2]),
                Example::new(1, vec![3]),
                Example::new(1, vec![4]),
            ],
            test: vec![],
            vocab: Vocabulary::build(["a", "b", "c"]),
            num_classes: 3,
        };
        assert_eq!(corpus.label_histogram(), vec![1, 2, 0]);
    }
}
