// ============================================================
// Infrastructure Layer
// ============================================================
// Filesystem and experiment-tracking concerns with no model or
// data-pipeline logic of their own.
//
//   vocab_store.rs — vocabulary persistence (vocab.json)
//   checkpoint.rs  — model snapshots and the training config
//   metrics.rs     — per-epoch metrics CSV under the log dir
//   run_context.rs — pluggable experiment tracking sink

/// Model snapshot and training-config persistence
pub mod checkpoint;

/// Per-epoch metrics CSV
pub mod metrics;

/// Experiment tracking abstraction
pub mod run_context;

/// Vocabulary save/load
pub mod vocab_store;
