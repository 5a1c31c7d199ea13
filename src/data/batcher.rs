// ============================================================
// Batch Collator
// ============================================================
// Packs a list of variable-length examples into the flat
// representation the embedding-bag model consumes. Instead of
// padding every sequence to a common length, all token
// sequences are concatenated into one flat buffer and each
// example is described by the start index of its segment:
//
//   examples: [5,9] [2]        →  flat_tokens: [5, 9, 2]
//                                 offsets:     [0, 2]
//                                 labels:      [1, 0]
//
// An empty token sequence contributes an offset but no tokens,
// so offsets are non-decreasing rather than strictly
// increasing. `collate` is a pure function with no framework
// types; ReviewBatcher wraps it into Burn's Batcher trait to
// produce device tensors for the DataLoader.

use burn::data::dataloader::batcher::Batcher;
use burn::prelude::*;

use crate::domain::example::Example;

/// Pack examples into (flat_tokens, offsets, labels).
///
/// offsets[i] is the sum of the token counts of examples
/// [0, i); offsets[0] is always 0 and the offsets sequence has
/// exactly one entry per example.
pub fn collate(examples: &[Example]) -> (Vec<u32>, Vec<usize>, Vec<usize>) {
    let total: usize = examples.iter().map(Example::token_count).sum();
    let mut flat_tokens = Vec::with_capacity(total);
    let mut offsets = Vec::with_capacity(examples.len());
    let mut labels = Vec::with_capacity(examples.len());

    for example in examples {
        offsets.push(flat_tokens.len());
        flat_tokens.extend_from_slice(&example.tokens);
        labels.push(example.label);
    }

    (flat_tokens, offsets, labels)
}

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A collated batch ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// All examples' token ids concatenated — shape: [total_tokens]
    pub tokens: Tensor<B, 1, Int>,

    /// Start index of each example's segment within `tokens`.
    /// Kept host-side because segment slicing needs usize ranges.
    pub offsets: Vec<usize>,

    /// 0-based class ids — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the right
/// place. The DataLoader calls .batch() with each mini-batch.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<Example, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<Example>) -> ReviewBatch<B> {
        let (flat_tokens, offsets, labels) = collate(&items);

        let token_ints: Vec<i32> = flat_tokens.iter().map(|&t| t as i32).collect();
        let label_ints: Vec<i32> = labels.iter().map(|&l| l as i32).collect();

        let tokens = Tensor::<B, 1, Int>::from_ints(token_ints.as_slice(), &self.device);
        let labels = Tensor::<B, 1, Int>::from_ints(label_ints.as_slice(), &self.device);

        ReviewBatch { tokens, offsets, labels }
    }
}
