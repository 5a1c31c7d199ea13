// ============================================================
// Data Pipeline
// ============================================================
// Everything from raw files to backend-ready tensor batches.
//
// The pipeline flows in this order:
//
//   train.csv / *.parquet shards
//       │
//       ▼
//   CsvSource / ParquetSource  → ordered Examples + Vocabulary
//       │
//       ▼
//   split_train_val            → disjoint train/validation split
//       │
//       ▼
//   ReviewDataset              → implements Burn's Dataset trait
//       │
//       ▼
//   collate / ReviewBatcher    → flat tokens + offsets + labels
//       │
//       ▼
//   DataLoader                 → feeds batches to the training loop
//
// Each module is responsible for exactly one step, so each
// step is independently testable and replaceable.

/// basic-english tokenization and n-gram expansion
pub mod tokenizer;

/// Loads (label, review) CSV pairs and builds the vocabulary
pub mod csv_source;

/// Loads pre-tokenized Parquet shards plus a vocabulary snapshot
pub mod parquet_source;

/// Implements Burn's Dataset trait over encoded examples
pub mod dataset;

/// Pure batch collation and Burn's Batcher trait on top of it
pub mod batcher;

/// Shuffles and splits examples into train/validation sets
pub mod splitter;
