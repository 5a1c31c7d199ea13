// ============================================================
// ML / Model Layer (Burn)
// ============================================================
// All Burn-specific training and inference code lives here.
//
//   model.rs      — the bag-of-embeddings classifier:
//                   an Embedding table mean-reduced per example
//                   segment, followed by a Linear head
//
//   trainer.rs    — the epoch loop: SGD step per batch,
//                   per-epoch learning-rate decay, validation
//                   pass, metrics reporting, final snapshot
//
//   inferencer.rs — single-review prediction: tokenize,
//                   n-gram, vocabulary lookup, forward pass
//                   with a singleton offsets vector

/// Bag-of-embeddings classifier architecture
pub mod model;

/// Full training loop with validation and final snapshot
pub mod trainer;

/// Single-review inference over a trained snapshot
pub mod inferencer;
