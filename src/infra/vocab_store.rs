// ============================================================
// Vocabulary Store
// ============================================================
// Persists the vocabulary as vocab.json: a plain JSON array of
// token strings ordered by id. A list is all the mapping needs
// — the token → id direction is rebuilt on load — and it stays
// readable with any JSON tool.
//
// The same file doubles as the marker a shard directory uses to
// signal "these Parquet shards were tokenized with this
// vocabulary".

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::vocabulary::Vocabulary;

pub const VOCAB_FILE: &str = "vocab.json";

pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(VOCAB_FILE) }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        serde_json::to_writer(BufWriter::new(file), vocab.itos())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!("Saved vocabulary ({} tokens) to {}", vocab.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vocabulary> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let itos: Vec<String> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Malformed vocabulary file {}", self.path.display()))?;
        Ok(Vocabulary::from_itos(itos))
    }
}
