// ============================================================
// Inference
// ============================================================
// Rates a single review with a trained snapshot. The text goes
// through exactly the training-time preparation — basic_english
// tokenization, n-gram expansion, vocabulary lookup with <unk>
// fallback — then one forward pass with a singleton offsets
// vector. The predicted class index is shifted back into the
// 1-based star scale.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use burn::prelude::*;

use crate::application::train_use_case::TrainConfig;
use crate::data::tokenizer::{basic_english, ngrams_iterator};
use crate::domain::vocabulary::Vocabulary;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::vocab_store::VocabStore;
use crate::ml::model::{TextClassifier, TextClassifierConfig};
use crate::ml::trainer::EvalBackend;

/// Internal class ids are 0-based; ratings are 1-based stars.
const LABEL_OFFSET: usize = 1;

#[derive(Debug)]
pub struct Predictor {
    model:  TextClassifier<EvalBackend>,
    vocab:  Vocabulary,
    ngrams: usize,
    device: <EvalBackend as Backend>::Device,
}

impl Predictor {
    /// Restore everything a prediction needs from a training
    /// run's output directory: the config, the vocabulary and
    /// the weight snapshot.
    pub fn from_checkpoint(output_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = output_dir.as_ref();
        let ckpt = CheckpointManager::new(dir);
        ensure!(
            ckpt.snapshot_exists(),
            "No trained snapshot in {} — run `train` first",
            dir.display()
        );

        let cfg: TrainConfig = ckpt
            .load_config()
            .with_context(|| format!("Failed to read training config from {}", dir.display()))?;
        let vocab = VocabStore::new(dir)
            .load()
            .with_context(|| format!("Failed to read vocabulary from {}", dir.display()))?;

        let device = <EvalBackend as Backend>::Device::default();
        let model_cfg = TextClassifierConfig::new(cfg.vocab_size, cfg.num_classes)
            .with_embed_dim(cfg.embed_dim);
        let model = ckpt.load_latest::<EvalBackend>(&model_cfg, &device)?;

        tracing::info!(
            "Loaded snapshot from {} (vocab_size={}, num_classes={})",
            dir.display(),
            cfg.vocab_size,
            cfg.num_classes
        );

        Ok(Self::new(model, vocab, cfg.ngrams))
    }

    pub fn new(model: TextClassifier<EvalBackend>, vocab: Vocabulary, ngrams: usize) -> Self {
        Self { model, vocab, ngrams, device: Default::default() }
    }

    /// Rate a review: returns a 1-based star rating.
    pub fn predict(&self, text: &str) -> usize {
        let words = basic_english(text);
        let grams = ngrams_iterator(&words, self.ngrams);
        let ids: Vec<i32> = grams.iter().map(|g| self.vocab.id(g) as i32).collect();

        let tokens = Tensor::<EvalBackend, 1, Int>::from_ints(ids.as_slice(), &self.device);
        let logits = self.model.forward(tokens, &[0]);

        let class = logits
            .argmax(1)
            .flatten::<1>(0, 1)
            .into_scalar()
            .elem::<i64>() as usize;
        class + LABEL_OFFSET
    }
}
