// ============================================================
// Application Layer
// ============================================================
// One use case per CLI command. This layer wires the data
// sources, the training loop and the persistence pieces
// together; it owns no ML or parsing logic of its own.

/// End-to-end training run: load, split, train, evaluate
pub mod train_use_case;

/// Rate a single review with a trained snapshot
pub mod predict_use_case;
