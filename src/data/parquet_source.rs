// ============================================================
// Parquet Corpus Source
// ============================================================
// Loads a corpus that was tokenized ahead of time: a directory
// of Parquet shards named train-*.parquet / test-*.parquet
// (Hugging Face shard naming) with columns
//
//   label:     Int64        (already 0-based)
//   input_ids: List<Int64>  (vocabulary ids, n-grams included)
//
// plus one vocab.json snapshot of the vocabulary the ids refer
// to. Because ids arrive from disk, every id is validated
// against the vocabulary size — a shard produced with a
// different vocabulary aborts the run instead of silently
// training on garbage rows.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Int64Array, ListArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::domain::corpus::Corpus;
use crate::domain::example::Example;
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::vocab_store::VocabStore;

/// Loads pre-tokenized Parquet shards plus the vocabulary
/// snapshot they were encoded with.
pub struct ParquetSource {
    dir: PathBuf,
}

impl ParquetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Whether `dir` looks like a shard directory: at least one
    /// .parquet file next to a vocab.json.
    pub fn detect(dir: &Path) -> bool {
        VocabStore::new(dir).exists() && !shard_paths(dir).unwrap_or_default().is_empty()
    }
}

impl CorpusSource for ParquetSource {
    fn load(&self) -> Result<Corpus> {
        let vocab = VocabStore::new(&self.dir).load()?;

        let mut train = Vec::new();
        let mut test = Vec::new();
        for path in shard_paths(&self.dir)? {
            let examples = read_shard(&path, &vocab)?;
            tracing::debug!(
                count = examples.len(),
                path = %path.display(),
                "Read shard"
            );
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem.starts_with("test") {
                test.extend(examples);
            } else {
                train.extend(examples);
            }
        }

        if train.is_empty() {
            bail!("No training shards found in '{}'", self.dir.display());
        }
        tracing::info!(
            "Read {} training and {} test examples from '{}'",
            train.len(),
            test.len(),
            self.dir.display()
        );

        let num_classes = train
            .iter()
            .chain(test.iter())
            .map(|e| e.label + 1)
            .max()
            .unwrap_or(0);

        Ok(Corpus { train, test, vocab, num_classes })
    }
}

/// All .parquet files in the directory, sorted by name so the
/// example order is stable across runs.
fn shard_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("parquet") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read all examples from one shard.
fn read_shard(path: &Path, vocab: &Vocabulary) -> Result<Vec<Example>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Cannot open shard '{}'", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("'{}' is not a readable Parquet file", path.display()))?
        .build()?;

    let mut examples = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        examples.append(&mut extract_examples(&batch, vocab, path)?);
    }
    Ok(examples)
}

/// Extract examples from a single Arrow RecordBatch.
fn extract_examples(
    batch: &RecordBatch,
    vocab: &Vocabulary,
    path: &Path,
) -> Result<Vec<Example>> {
    let labels = batch
        .column_by_name("label")
        .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
        .ok_or_else(|| anyhow::anyhow!("'{}': column 'label' is not Int64", path.display()))?;

    let token_lists = batch
        .column_by_name("input_ids")
        .and_then(|c| c.as_any().downcast_ref::<ListArray>())
        .ok_or_else(|| {
            anyhow::anyhow!("'{}': column 'input_ids' is not List<Int64>", path.display())
        })?;

    let vocab_size = vocab.len() as i64;
    let mut examples = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let label = labels.value(row);
        if label < 0 {
            bail!("'{}' row {}: negative label {}", path.display(), row, label);
        }

        let values = token_lists.value(row);
        let ids = values
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| {
                anyhow::anyhow!("'{}': 'input_ids' values are not Int64", path.display())
            })?;

        let mut tokens = Vec::with_capacity(ids.len());
        for i in 0..ids.len() {
            let id = ids.value(i);
            if id < 0 || id >= vocab_size {
                bail!(
                    "'{}' row {}: token id {} outside vocabulary of {} entries",
                    path.display(),
                    row,
                    id,
                    vocab_size
                );
            }
            tokens.push(id as u32);
        }
        examples.push(Example::new(label as usize, tokens));
    }
    Ok(examples)
}
