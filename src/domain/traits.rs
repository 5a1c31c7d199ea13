// ============================================================
// Core Traits (Abstractions)
// ============================================================
// The two original training scripts differed only in how they
// obtained their data; everything downstream of loading was
// duplicated. CorpusSource is that seam: the application layer
// programs against it and never learns whether examples came
// from raw CSV text or pre-tokenized Parquet shards.

use crate::domain::corpus::Corpus;
use anyhow::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full labeled dataset:
/// an ordered Example sequence per split, a Vocabulary, and
/// the label set.
///
/// Implementations:
///   - CsvSource     → (label, review) rows; builds the vocabulary
///   - ParquetSource → pre-tokenized shards + persisted vocabulary
pub trait CorpusSource {
    /// Load the corpus from this source. Construction happens
    /// once at startup; the result is immutable afterwards.
    fn load(&self) -> Result<Corpus>;
}
